// TUI application state
//
// Holds the interaction handler (which owns the page controls), the activity
// history, counters, and the button rectangles recorded at render time for
// mouse hit-testing.

use std::time::Instant;

use ratatui::layout::{Position, Rect};

use crate::config::Config;
use crate::events::{Stats, UiEvent};
use crate::handler::InteractionHandler;
use crate::logging::LogBuffer;

/// How many activity entries to keep for the panel
const MAX_ACTIVITY_ENTRIES: usize = 200;

/// Main application state for the TUI
pub struct App {
    /// Interaction handler owning the flag and star controls
    pub handler: InteractionHandler,

    /// Recent star activity (requested/resolved events)
    pub activity: Vec<UiEvent>,

    /// Accumulated counters for the status bar
    pub stats: Stats,

    /// Whether the app should quit
    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Log buffer for the system log panel
    pub log_buffer: LogBuffer,

    /// Whether the pointer is currently over the flag button
    /// (drives enter/leave transitions from raw mouse-move events)
    hovering_flag: bool,

    /// Button rectangles from the last rendered frame, for hit-testing
    pub flag_area: Option<Rect>,
    pub star_area: Option<Rect>,

    /// Site URL for the title bar
    pub base_url: String,

    /// Demo mode indicator for the title bar
    pub demo_mode: bool,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer, handler: InteractionHandler) -> Self {
        Self {
            handler,
            activity: Vec::new(),
            stats: Stats::default(),
            should_quit: false,
            start_time: Instant::now(),
            log_buffer,
            hovering_flag: false,
            flag_area: None,
            star_area: None,
            base_url: config.base_url.clone(),
            demo_mode: config.demo_mode,
        }
    }

    /// Record a worker event: update counters, keep it for the activity
    /// panel, and run the completion continuation on resolution.
    pub fn add_event(&mut self, event: UiEvent) {
        self.stats.record(&event);

        if let UiEvent::StarResolved { starred, .. } = &event {
            // The icon mutates only here, after the outcome is known
            self.handler.on_star_resolved(*starred);
        }

        self.activity.push(event);
        if self.activity.len() > MAX_ACTIVITY_ENTRIES {
            self.activity.remove(0);
        }
    }

    /// Pointer moved: translate position changes over the flag button into
    /// enter/leave transitions. Moves within the button (or outside it) are
    /// not re-delivered, matching pointer-enter/leave semantics.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let inside = self
            .flag_area
            .is_some_and(|area| area.contains(Position::new(column, row)));

        if inside && !self.hovering_flag {
            self.hovering_flag = true;
            self.handler.on_pointer_enter();
        } else if !inside && self.hovering_flag {
            self.hovering_flag = false;
            self.handler.on_pointer_leave();
        }
    }

    /// Left mouse button pressed: a press on the star button is a click.
    pub fn pointer_pressed(&mut self, column: u16, row: u16) {
        let on_star = self
            .star_area
            .is_some_and(|area| area.contains(Position::new(column, row)));

        if on_star {
            self.handler.on_star_click();
        }
    }

    /// Keyboard synonym for clicking the star button.
    pub fn star_key_pressed(&mut self) {
        self.handler.on_star_click();
    }

    /// Format uptime as mm:ss or hh:mm:ss
    pub fn uptime(&self) -> String {
        let elapsed = self.start_time.elapsed();
        let secs = elapsed.as_secs();
        if secs >= 3600 {
            format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        } else {
            format!("{}:{:02}", secs / 60, secs % 60)
        }
    }
}
