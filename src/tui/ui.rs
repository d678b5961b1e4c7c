// UI rendering - draws the page controls, activity panel, logs, status bar
//
// The two buttons mirror the page elements this tool drives: the flag button
// shows its hover highlight while btn-danger is present, and the star button
// renders the icon glyph from the icon class set (never from request state).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::events::UiEvent;
use crate::logging::LogLevel;

use super::app::App;

/// Fixed width of each control button
const BUTTON_WIDTH: u16 = 24;

/// Main render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(5), // page controls
            Constraint::Min(4),    // activity panel
            Constraint::Length(8), // system logs
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], app);
    render_controls(f, chunks[1], app);
    render_activity(f, chunks[2], app);
    render_logs(f, chunks[3], app);
    render_status(f, chunks[4], app);
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " stardeck ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("│ {} ", app.base_url), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("│ text {} ", app.handler.star.text_id),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if app.demo_mode {
        spans.push(Span::styled(
            "│ DEMO ",
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the flag and star buttons, recording their rectangles on the App
/// so mouse events can be hit-tested against the frame that is on screen.
fn render_controls(f: &mut Frame, area: Rect, app: &mut App) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .split(area);

    let flag_area = row[1];
    let star_area = row[3];
    app.flag_area = Some(flag_area);
    app.star_area = Some(star_area);

    // Flag button: red while the hover class is applied
    let flag_style = if app.handler.flag.is_highlighted() {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let flag_button = Paragraph::new(center_label("⚑ Flag text", BUTTON_WIDTH.saturating_sub(2)))
        .style(flag_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.handler.flag.element_id),
        );
    f.render_widget(flag_button, flag_area);

    // Star button: the glyph comes from the icon class set
    let (glyph, star_style) = if app.handler.star.is_starred() {
        ("★", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        ("☆", Style::default().fg(Color::Gray))
    };
    let star_label = format!("{} Star text", glyph);
    let star_button = Paragraph::new(center_label(&star_label, BUTTON_WIDTH.saturating_sub(2)))
        .style(star_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.handler.star.element_id),
        );
    f.render_widget(star_button, star_area);
}

/// Pad a label to the given display width so the bordered button renders a
/// stable shape; the glyphs are double-checked with unicode-width because
/// the stars are not single-column in every font table.
fn center_label(label: &str, width: u16) -> Line<'static> {
    let width = width as usize;
    let label_width = UnicodeWidthStr::width(label);
    let padding = width.saturating_sub(label_width) / 2;
    Line::from(format!("{}{}", " ".repeat(padding), label))
}

fn render_activity(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .activity
        .iter()
        .rev()
        .take(visible)
        .map(format_activity_line)
        .map(ListItem::new)
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Star activity "),
    );
    f.render_widget(list, area);
}

/// One line per worker event, newest first.
fn format_activity_line(event: &UiEvent) -> Line<'static> {
    let time = event.timestamp().format("%H:%M:%S");
    match event {
        UiEvent::StarRequested { text_id, .. } => Line::from(vec![
            Span::styled(format!("{} ", time), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("→ POST /texts/{}/star", text_id)),
        ]),
        UiEvent::StarResolved {
            text_id,
            starred,
            status,
            duration,
            ..
        } => {
            let (marker, style) = if *starred {
                ("★", Style::default().fg(Color::Yellow))
            } else {
                ("·", Style::default().fg(Color::DarkGray))
            };
            let status_text = match status {
                Some(code) => format!("{}", code),
                None if *starred => "ok".to_string(),
                None => "no response".to_string(),
            };
            Line::from(vec![
                Span::styled(format!("{} ", time), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!(
                        "{} text {} - {} ({}ms)",
                        marker,
                        text_id,
                        status_text,
                        duration.as_millis()
                    ),
                    style,
                ),
            ])
        }
    }
}

fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.log_buffer.get_all();
    let visible = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = entries
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => Color::Red,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Info => Color::Green,
                LogLevel::Debug => Color::Blue,
                LogLevel::Trace => Color::DarkGray,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::raw(entry.message.clone()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" System logs "),
    );
    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let stats = &app.stats;
    let status_text = format!(
        " {} │ ⭐ {} sent │ {} in flight │ ✓ {:.0}% │ ~{}ms │ q quit · s star · hover the flag",
        app.uptime(),
        stats.star_requests,
        stats.in_flight(),
        stats.success_rate(),
        stats.avg_duration().as_millis(),
    );

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, area);
}
