//! Field card rendering

use crate::state::{Field, FieldRow, FieldType, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CURSOR: &str = "▌";

/// Everything needed to draw one field card
pub struct FieldCard<'a> {
    pub field: &'a Field,
    pub value: FieldValue,
    pub error: Option<&'a str>,
    /// Cursor row when this card is focused
    pub active_row: Option<FieldRow>,
    pub label_draft: Option<&'a str>,
    pub option_draft: &'a str,
}

impl FieldCard<'_> {
    /// Card height including borders
    pub fn height(&self) -> u16 {
        self.lines().len() as u16 + 2
    }

    fn row_style(&self, row: FieldRow) -> Style {
        if self.active_row == Some(row) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    fn cursor(&self, row: FieldRow) -> Span<'static> {
        if self.active_row == Some(row) {
            Span::styled(CURSOR, Style::default().fg(Color::Cyan))
        } else {
            Span::raw("")
        }
    }

    fn label_line(&self) -> Line<'_> {
        let row = FieldRow::Label;
        let label = match self.label_draft {
            Some(draft) if self.active_row == Some(row) => Span::styled(
                draft.to_string(),
                Style::default().fg(Color::Yellow),
            ),
            _ if self.field.label.is_empty() => Span::styled(
                self.field.display_label().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            _ => Span::styled(self.field.label.clone(), self.row_style(row)),
        };
        Line::from(vec![label, self.cursor(row)])
    }

    fn value_lines(&self) -> Vec<Line<'_>> {
        let row = FieldRow::Value;
        let style = self.row_style(row);

        if self.field.field_type == FieldType::Select {
            let choice = match self.value.as_text() {
                "" => Span::styled("Options", Style::default().fg(Color::DarkGray)),
                selected => Span::styled(selected.to_string(), style),
            };
            return vec![Line::from(vec![Span::styled("▾ ", style), choice, self.cursor(row)])];
        }

        if self.value.is_empty() {
            let placeholder = self.field.field_type.label();
            return vec![Line::from(vec![
                Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
                self.cursor(row),
            ])];
        }

        let mut lines: Vec<Line> = self
            .value
            .as_text()
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(self.cursor(row));
        }
        lines
    }

    fn option_line(&self, index: usize, option: &str) -> Line<'_> {
        let row = FieldRow::Option(index);
        let selected = self.value.is_selected(option);
        let marker = match (self.field.field_type, selected) {
            (FieldType::Checkbox, true) => "[x] ",
            (FieldType::Checkbox, false) => "[ ] ",
            (FieldType::Radio, true) => "(•) ",
            (FieldType::Radio, false) => "( ) ",
            (_, true) => " ✓  ",
            (_, false) => "  • ",
        };
        let text = if option.is_empty() {
            Span::styled(format!("Option {}", index + 1), Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(option.to_string(), self.row_style(row))
        };
        Line::from(vec![
            Span::styled(marker, self.row_style(row)),
            text,
            self.cursor(row),
        ])
    }

    fn new_option_line(&self) -> Line<'_> {
        let row = FieldRow::NewOption;
        let text = if self.active_row == Some(row) && !self.option_draft.is_empty() {
            Span::styled(self.option_draft.to_string(), Style::default().fg(Color::Yellow))
        } else {
            Span::styled("Add Option", Style::default().fg(Color::DarkGray))
        };
        Line::from(vec![Span::styled("  + ", self.row_style(row)), text, self.cursor(row)])
    }

    /// Card body, one entry per `FieldRow` plus an optional error line
    pub fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        for row in FieldRow::rows_for(self.field) {
            match row {
                FieldRow::Label => lines.push(self.label_line()),
                FieldRow::Value => lines.extend(self.value_lines()),
                FieldRow::Option(index) => {
                    lines.push(self.option_line(index, &self.field.options[index]))
                }
                FieldRow::NewOption => lines.push(self.new_option_line()),
            }
        }
        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }
}

/// Draw a field card
pub fn draw_field(frame: &mut Frame, area: Rect, card: &FieldCard, position: usize) {
    let border_color = if card.active_row.is_some() {
        Color::Cyan
    } else if card.error.is_some() {
        Color::Red
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" {}. {} ", position + 1, card.field.field_type.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(card.lines()).block(block), area);
}
