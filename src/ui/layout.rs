//! Layout components (form area, action panel, status bar)

use super::action_panel::ACTION_PANEL_WIDTH;
use super::forms::help_text;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen regions
pub struct ScreenAreas {
    pub form: Rect,
    pub actions: Rect,
    pub status: Rect,
}

/// Split the screen into form, action panel and a one-line status bar
pub fn create_layout(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),                     // Form
            Constraint::Length(ACTION_PANEL_WIDTH), // Actions
        ])
        .split(rows[0]);

    ScreenAreas {
        form: columns[0],
        actions: columns[1],
        status: rows[1],
    }
}

/// Outcome segment of the status bar: form-wide error, pending field errors, or last message
fn outcome_span(app: &App) -> Option<Span<'_>> {
    let errors = &app.state.errors;
    if let Some(message) = errors.global_message() {
        return Some(Span::styled(message, Style::default().fg(Color::Red)));
    }
    if !errors.is_empty() {
        let count = errors.len();
        let noun = if count == 1 { "field needs" } else { "fields need" };
        return Some(Span::styled(
            format!("{count} {noun} attention"),
            Style::default().fg(Color::Red),
        ));
    }
    app.state
        .status_message
        .as_deref()
        .map(|msg| Span::styled(msg, Style::default().fg(Color::Green)))
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    if let Some(outcome) = outcome_span(app) {
        spans.push(outcome);
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(
        help_text(app),
        Style::default().fg(Color::Gray),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
