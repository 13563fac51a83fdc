//! Load dialog: paste or type a form document

use super::base::{centered_rect, key_hint};
use crate::platform::PASTE_SHORTCUT;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the JSON input box used by Load
pub fn render_load_dialog(frame: &mut Frame, input: &str, document_name: &str) {
    let area = centered_rect(frame.area(), 70, 16);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Load JSON Configuration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    let body = if input.is_empty() {
        Paragraph::new(Span::styled(
            "Paste or type a form document here",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        // Keep the tail of long input in view
        let lines: Vec<Line> = input.lines().map(|l| Line::from(l.to_string())).collect();
        let visible = chunks[0].height as usize;
        let skip = lines.len().saturating_sub(visible);
        Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
    };
    frame.render_widget(body.wrap(Wrap { trim: false }), chunks[0]);

    let hints = Paragraph::new(vec![
        Line::from(vec![
            key_hint("Enter"),
            Span::raw(" load  "),
            key_hint(PASTE_SHORTCUT),
            Span::raw(" paste  "),
            key_hint("Ctrl+U"),
            Span::raw(" clear  "),
            key_hint("Esc"),
            Span::raw(" cancel"),
        ]),
        Line::from(vec![
            key_hint("Ctrl+O"),
            Span::raw(format!(" read {document_name}")),
        ]),
    ]);
    frame.render_widget(hints, chunks[1]);
}
