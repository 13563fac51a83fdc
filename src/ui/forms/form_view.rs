//! The form being designed: a scrolling column of field cards

use super::field_renderer::{draw_field, FieldCard};
use crate::app::App;
use crate::state::{FieldRow, Focus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Build the card for every field, in collection order
fn build_cards(app: &App) -> Vec<FieldCard<'_>> {
    let state = &app.state;
    app.session
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let is_active = state.focus == Focus::Fields && index == state.active_field;
            FieldCard {
                field,
                value: app.session.values().get_value(field),
                error: state.errors.for_field(&field.id),
                active_row: is_active.then_some(state.active_row),
                label_draft: state.label_draft.as_deref(),
                option_draft: &state.option_draft,
            }
        })
        .collect()
}

/// Index of the first card to draw so the active card is fully visible
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let mut used = 0u16;
    let mut first = active.min(heights.len().saturating_sub(1));
    for index in (0..=first).rev() {
        used = used.saturating_add(heights[index]);
        if used > available && index != first {
            break;
        }
        first = index;
    }
    first
}

/// Draw the form area
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let border_color = if app.state.focus == Focus::Fields {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Dynamic Form Builder ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = build_cards(app);
    if cards.is_empty() {
        let hint = Paragraph::new("No fields yet. Press Ctrl+N to add one.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    let heights: Vec<u16> = cards.iter().map(FieldCard::height).collect();
    let start = first_visible(&heights, app.state.active_field, inner.height);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (index, card) in cards.iter().enumerate().skip(start) {
        if y >= bottom {
            break;
        }
        let height = heights[index].min(bottom - y);
        if height < 3 {
            break;
        }
        let card_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        draw_field(frame, card_area, card, index);
        y += height;
    }
}

/// Context-sensitive key hints for the current row
pub fn help_text(app: &App) -> &'static str {
    if app.state.focus == Focus::Actions {
        return "↑↓: choose  Enter: run  Esc: back to form  q: quit";
    }
    if app.state.is_editing_label() {
        return "Enter: save label  Esc: cancel";
    }
    let Some(field) = app.current_field() else {
        return "Ctrl+N: add field  Esc: actions";
    };
    match app.state.active_row {
        FieldRow::Label => "Enter: edit label  Ctrl+X: delete field  Tab: next field",
        FieldRow::Value if field.field_type.is_free_text() => {
            "Type to fill in  Ctrl+U: clear  ↑↓: move  Tab: next field"
        }
        FieldRow::Value => "←→: choose option  Ctrl+U: clear  ↑↓: move",
        FieldRow::Option(_) => "Type to rename  Enter: select  Ctrl+D: delete option",
        FieldRow::NewOption => "Type, then Enter to add an option",
    }
}
