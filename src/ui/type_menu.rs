//! Field type picker shown by Add Field

use super::components::centered_rect;
use crate::state::FieldType;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Draw the type menu with `selected` indexing `FieldType::ALL`
pub fn draw_type_menu(frame: &mut Frame, selected: usize) {
    let height = FieldType::ALL.len() as u16 + 2;
    let area = centered_rect(frame.area(), 30, height);
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = FieldType::ALL
        .iter()
        .map(|ty| {
            ListItem::new(Line::from(vec![
                Span::raw(ty.label()),
                Span::styled(
                    format!(" ({})", ty.as_str()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Add Field ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state =
        ListState::default().with_selected(Some(selected.min(FieldType::ALL.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}
