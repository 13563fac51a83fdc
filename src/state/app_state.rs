//! Application state definitions
//!
//! Everything here is presentation state. The form itself lives in
//! `FormSession`; this only tracks where the user is and what they are
//! in the middle of typing.

use super::forms::{ErrorReport, Field};
use std::collections::VecDeque;

/// Which half of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Fields,
    Actions,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Fields => Self::Actions,
            Self::Actions => Self::Fields,
        };
    }
}

/// A selectable row inside a field card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldRow {
    #[default]
    Label,
    /// Text input, or the dropdown's current choice
    Value,
    Option(usize),
    /// Input for a new option
    NewOption,
}

impl FieldRow {
    /// Rows a field card shows, top to bottom
    pub fn rows_for(field: &Field) -> Vec<FieldRow> {
        let ty = field.field_type;
        let mut rows = vec![FieldRow::Label];
        if ty.is_free_text() || ty == super::forms::FieldType::Select {
            rows.push(FieldRow::Value);
        }
        if ty.has_options() {
            rows.extend((0..field.options.len()).map(FieldRow::Option));
            rows.push(FieldRow::NewOption);
        }
        rows
    }
}

/// Buttons in the action panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddField,
    Submit,
    Save,
    Load,
    CopyJson,
    Quit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Self::AddField,
        Self::Submit,
        Self::Save,
        Self::Load,
        Self::CopyJson,
        Self::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AddField => "Add Field",
            Self::Submit => "Submit",
            Self::Save => "Save",
            Self::Load => "Load",
            Self::CopyJson => "Copy JSON",
            Self::Quit => "Quit",
        }
    }
}

/// Popup drawn over the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// Field type picker; `selected` indexes `FieldType::ALL`
    TypeMenu { selected: usize },
    LoadDialog,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub focus: Focus,
    pub active_field: usize,
    pub active_row: FieldRow,
    pub selected_action: usize,
    pub overlay: Overlay,

    // In-progress input
    pub label_draft: Option<String>,
    pub option_draft: String,
    pub load_input: String,

    // Feedback
    pub errors: ErrorReport,
    pub status_message: Option<String>,
    pub error_queue: VecDeque<String>,
}

impl AppState {
    /// Drop half-typed label and option text
    pub fn reset_drafts(&mut self) {
        self.label_draft = None;
        self.option_draft.clear();
    }

    /// Move to the next field's label, wrapping around
    pub fn next_field(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_field = (self.active_field + 1) % count;
        self.active_row = FieldRow::Label;
        self.reset_drafts();
    }

    /// Move to the previous field's label, wrapping around
    pub fn prev_field(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_field = if self.active_field == 0 {
            count - 1
        } else {
            self.active_field - 1
        };
        self.active_row = FieldRow::Label;
        self.reset_drafts();
    }

    /// Move down one row, continuing into the next field
    pub fn next_row(&mut self, fields: &[Field]) {
        let Some(field) = fields.get(self.active_field) else {
            return;
        };
        let rows = FieldRow::rows_for(field);
        let current = rows.iter().position(|r| *r == self.active_row).unwrap_or(0);
        if current + 1 < rows.len() {
            self.active_row = rows[current + 1];
            self.reset_drafts();
        } else if self.active_field + 1 < fields.len() {
            self.next_field(fields.len());
        }
    }

    /// Move up one row, continuing into the previous field's last row
    pub fn prev_row(&mut self, fields: &[Field]) {
        let Some(field) = fields.get(self.active_field) else {
            return;
        };
        let rows = FieldRow::rows_for(field);
        let current = rows.iter().position(|r| *r == self.active_row).unwrap_or(0);
        if current > 0 {
            self.active_row = rows[current - 1];
            self.reset_drafts();
        } else if self.active_field > 0 {
            self.active_field -= 1;
            self.active_row = FieldRow::rows_for(&fields[self.active_field])
                .last()
                .copied()
                .unwrap_or_default();
            self.reset_drafts();
        }
    }

    /// Pull the cursor back inside the form after fields or options changed
    pub fn clamp(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            self.active_field = 0;
            self.active_row = FieldRow::Label;
            self.reset_drafts();
            return;
        }
        if self.active_field >= fields.len() {
            self.active_field = fields.len() - 1;
            self.active_row = FieldRow::Label;
            self.reset_drafts();
        }
        let rows = FieldRow::rows_for(&fields[self.active_field]);
        if !rows.contains(&self.active_row) {
            self.active_row = match self.active_row {
                // Removing the last option lands on the one above it
                FieldRow::Option(_) => rows
                    .iter()
                    .rev()
                    .find(|r| matches!(r, FieldRow::Option(_)))
                    .copied()
                    .unwrap_or(FieldRow::NewOption),
                _ => FieldRow::Label,
            };
        }
    }

    /// Jump to a field's label row
    pub fn focus_field(&mut self, index: usize) {
        self.focus = Focus::Fields;
        self.active_field = index;
        self.active_row = FieldRow::Label;
        self.reset_drafts();
    }

    pub fn selected_action(&self) -> Action {
        Action::ALL[self.selected_action.min(Action::ALL.len() - 1)]
    }

    pub fn next_action(&mut self) {
        self.selected_action = (self.selected_action + 1) % Action::ALL.len();
    }

    pub fn prev_action(&mut self) {
        if self.selected_action == 0 {
            self.selected_action = Action::ALL.len() - 1;
        } else {
            self.selected_action -= 1;
        }
    }

    pub fn is_editing_label(&self) -> bool {
        self.label_draft.is_some()
    }

    /// Push an error message onto the queue for display
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// Error currently shown in the error dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldId, FieldType};

    fn field(id: u64, ty: FieldType, options: &[&str]) -> Field {
        let mut f = Field::new(FieldId::from(id), ty);
        f.options = options.iter().map(|s| s.to_string()).collect();
        f
    }

    mod rows {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_text_rows() {
            let rows = FieldRow::rows_for(&field(1, FieldType::Text, &["ignored"]));
            assert_eq!(rows, vec![FieldRow::Label, FieldRow::Value]);
        }

        #[test]
        fn test_select_rows() {
            let rows = FieldRow::rows_for(&field(1, FieldType::Select, &["A"]));
            assert_eq!(
                rows,
                vec![
                    FieldRow::Label,
                    FieldRow::Value,
                    FieldRow::Option(0),
                    FieldRow::NewOption
                ]
            );
        }

        #[test]
        fn test_radio_rows() {
            let rows = FieldRow::rows_for(&field(1, FieldType::Radio, &["A", "B"]));
            assert_eq!(
                rows,
                vec![
                    FieldRow::Label,
                    FieldRow::Option(0),
                    FieldRow::Option(1),
                    FieldRow::NewOption
                ]
            );
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        fn form() -> Vec<Field> {
            vec![
                field(1, FieldType::Text, &[]),
                field(2, FieldType::Checkbox, &["A"]),
            ]
        }

        #[test]
        fn test_next_row_flows_into_next_field() {
            let fields = form();
            let mut state = AppState::default();
            state.next_row(&fields);
            assert_eq!(state.active_row, FieldRow::Value);
            state.next_row(&fields);
            assert_eq!((state.active_field, state.active_row), (1, FieldRow::Label));
            state.next_row(&fields);
            state.next_row(&fields);
            assert_eq!(state.active_row, FieldRow::NewOption);
            // Stays put at the very end
            state.next_row(&fields);
            assert_eq!((state.active_field, state.active_row), (1, FieldRow::NewOption));
        }

        #[test]
        fn test_prev_row_lands_on_previous_last_row() {
            let fields = form();
            let mut state = AppState::default();
            state.active_field = 1;
            state.prev_row(&fields);
            assert_eq!((state.active_field, state.active_row), (0, FieldRow::Value));
        }

        #[test]
        fn test_field_cycling_wraps() {
            let mut state = AppState::default();
            state.prev_field(3);
            assert_eq!(state.active_field, 2);
            state.next_field(3);
            assert_eq!(state.active_field, 0);
        }

        #[test]
        fn test_moving_discards_drafts() {
            let fields = form();
            let mut state = AppState {
                label_draft: Some("half".into()),
                option_draft: "typed".into(),
                ..Default::default()
            };
            state.next_row(&fields);
            assert!(!state.is_editing_label());
            assert!(state.option_draft.is_empty());
        }

        #[test]
        fn test_clamp_after_field_removed() {
            let fields = form();
            let mut state = AppState {
                active_field: 5,
                active_row: FieldRow::Value,
                ..Default::default()
            };
            state.clamp(&fields);
            assert_eq!((state.active_field, state.active_row), (1, FieldRow::Label));
        }

        #[test]
        fn test_clamp_after_option_removed() {
            let fields = vec![field(1, FieldType::Radio, &["A", "B"])];
            let mut state = AppState {
                active_row: FieldRow::Option(2),
                ..Default::default()
            };
            state.clamp(&fields);
            assert_eq!(state.active_row, FieldRow::Option(1));
        }

        #[test]
        fn test_clamp_on_empty_form() {
            let mut state = AppState {
                active_field: 3,
                ..Default::default()
            };
            state.clamp(&[]);
            assert_eq!(state.active_field, 0);
        }
    }

    mod actions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_action_cycle_wraps() {
            let mut state = AppState::default();
            state.prev_action();
            assert_eq!(state.selected_action(), Action::Quit);
            state.next_action();
            assert_eq!(state.selected_action(), Action::AddField);
        }

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            state.push_error("first".into());
            state.push_error("second".into());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert_eq!(state.current_error(), None);
        }

        #[test]
        fn test_focus_toggle() {
            let mut focus = Focus::default();
            focus.toggle();
            assert_eq!(focus, Focus::Actions);
        }
    }
}
