// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui: initialization and cleanup, the event
// loop (keyboard, mouse, timer ticks), rendering, and applying worker events
// to the page controls.

pub mod app;
pub mod ui;

use crate::events::UiEvent;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal (with mouse capture - hover depends on it), runs the
/// event loop, and restores the terminal when done.
pub async fn run_tui(app: &mut App, mut event_rx: mpsc::Receiver<UiEvent>) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the event loop
    let result = run_event_loop(&mut terminal, app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keyboard and mouse)
/// 2. Timer ticks (periodic redraws)
/// 3. Worker events (star request lifecycle)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<UiEvent>,
) -> Result<()> {
    // Ticker for periodic redraws (uptime, in-flight counter)
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Draw the UI; this also records the button rectangles for hit-testing
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Worker events
            Some(ui_event) = event_rx.recv() => {
                app.add_event(ui_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        // Keyboard synonym for clicking the star button
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
            app.star_key_pressed();
        }
        _ => {}
    }
}

/// Handle mouse input
///
/// Moves drive the hover toggle on the flag button; left-button presses on
/// the star button are clicks. Everything else is ignored.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_moved(mouse_event.column, mouse_event.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer_pressed(mouse_event.column, mouse_event.row);
        }
        _ => {}
    }
}
