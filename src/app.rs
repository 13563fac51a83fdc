//! Application state and core logic

use crate::config::DesignerConfig;
use crate::state::{
    Action, AppState, ErrorReport, Field, FieldRow, FieldType, FieldUpdate, FieldValue, Focus,
    FormError, FormResult, FormSession, Overlay, LOAD_FAILED_MESSAGE,
};
use crate::transfer::DocumentTransfer;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Main application struct
pub struct App {
    /// Presentation state
    pub state: AppState,
    /// The form being designed
    pub session: FormSession,
    /// Where Save writes and startup reads
    document: Box<dyn DocumentTransfer>,
    /// System clipboard
    clipboard: Box<dyn DocumentTransfer>,
    config: DesignerConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: DesignerConfig,
        document: Box<dyn DocumentTransfer>,
        clipboard: Box<dyn DocumentTransfer>,
    ) -> Self {
        let session = if config.seed_starter_fields() {
            FormSession::seeded()
        } else {
            FormSession::new()
        };

        Self {
            state: AppState::default(),
            session,
            document,
            clipboard,
            config,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Description of the document location, for help text
    pub fn document_name(&self) -> String {
        self.document.describe()
    }

    /// Field under the cursor
    pub fn current_field(&self) -> Option<&Field> {
        self.session.fields().get(self.state.active_field)
    }

    /// Surface a failed form operation and resync the cursor
    fn report(&mut self, result: FormResult<()>) {
        if let Err(err) = result {
            warn!(error = %err, "form operation failed");
            self.push_error(err.to_string());
        }
        self.state.clamp(self.session.fields());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog swallows keys until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.overlay {
            Overlay::TypeMenu { selected } => return self.handle_type_menu_key(key, selected),
            Overlay::LoadDialog => return self.handle_load_dialog_key(key),
            Overlay::None => {}
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('l') => self.open_load_dialog(),
                KeyCode::Char('r') => self.submit(),
                KeyCode::Char('n') => self.open_type_menu(),
                KeyCode::Char('x') => self.delete_current_field(),
                KeyCode::Char('d') => self.delete_current_option(),
                KeyCode::Char('u') => self.clear_current_value(),
                _ => {}
            }
            return Ok(());
        }

        match self.state.focus {
            Focus::Fields => self.handle_fields_key(key),
            Focus::Actions => self.handle_actions_key(key),
        }
    }

    /// Handle pasted text (bracketed paste)
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.overlay == Overlay::LoadDialog {
            self.state.load_input.push_str(text);
            return;
        }
        if self.state.overlay != Overlay::None || self.state.focus != Focus::Fields {
            return;
        }
        let single_line: String = text.lines().collect::<Vec<_>>().join(" ");
        if let Some(draft) = self.state.label_draft.as_mut() {
            draft.push_str(&single_line);
            return;
        }
        match self.state.active_row {
            FieldRow::Value => {
                let multiline = self
                    .current_field()
                    .is_some_and(|f| f.field_type.is_multiline());
                self.edit_text_value(|value| {
                    value.push_str(if multiline { text } else { single_line.as_str() })
                });
            }
            FieldRow::NewOption => self.state.option_draft.push_str(&single_line),
            _ => {}
        }
    }

    fn handle_fields_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(field) = self.current_field().cloned() else {
            match key.code {
                KeyCode::Esc | KeyCode::Tab => self.state.focus.toggle(),
                _ => {}
            }
            return Ok(());
        };

        if self.state.is_editing_label() {
            self.handle_label_edit_key(key, &field);
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.focus.toggle(),
            KeyCode::Tab => self.state.next_field(self.session.fields().len()),
            KeyCode::BackTab => self.state.prev_field(self.session.fields().len()),
            KeyCode::Up => self.state.prev_row(self.session.fields()),
            KeyCode::Down => self.state.next_row(self.session.fields()),
            _ => match self.state.active_row {
                FieldRow::Label => self.handle_label_row_key(key, &field),
                FieldRow::Value => self.handle_value_row_key(key, &field),
                FieldRow::Option(index) => self.handle_option_row_key(key, &field, index),
                FieldRow::NewOption => self.handle_new_option_key(key, &field),
            },
        }
        Ok(())
    }

    fn handle_label_row_key(&mut self, key: KeyEvent, field: &Field) {
        match key.code {
            KeyCode::Enter => self.state.label_draft = Some(field.label.clone()),
            KeyCode::Delete => self.delete_current_field(),
            _ => {}
        }
    }

    fn handle_label_edit_key(&mut self, key: KeyEvent, field: &Field) {
        let Some(draft) = self.state.label_draft.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => draft.push(c),
            KeyCode::Backspace => {
                draft.pop();
            }
            KeyCode::Enter => {
                let label = draft.clone();
                self.state.label_draft = None;
                let result = self
                    .session
                    .update_field(&field.id, FieldUpdate::label(label))
                    .map(|_| ());
                self.report(result);
            }
            KeyCode::Esc => self.state.label_draft = None,
            _ => {}
        }
    }

    fn handle_value_row_key(&mut self, key: KeyEvent, field: &Field) {
        if field.field_type == FieldType::Select {
            let step: isize = match key.code {
                KeyCode::Right | KeyCode::Enter => 1,
                KeyCode::Left => -1,
                _ => return,
            };
            self.cycle_selection(field, step);
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.edit_text_value(|value| value.push(c)),
            KeyCode::Backspace => self.edit_text_value(|value| {
                value.pop();
            }),
            KeyCode::Enter if field.field_type.is_multiline() => {
                self.edit_text_value(|value| value.push('\n'))
            }
            _ => {}
        }
    }

    fn handle_option_row_key(&mut self, key: KeyEvent, field: &Field, index: usize) {
        let Some(current) = field.options.get(index) else {
            return;
        };
        let result = match key.code {
            KeyCode::Char(c) => {
                let mut option = current.clone();
                option.push(c);
                self.session.replace_option_at(&field.id, index, &option)
            }
            KeyCode::Backspace => {
                let mut option = current.clone();
                option.pop();
                self.session.replace_option_at(&field.id, index, &option)
            }
            KeyCode::Enter => self.session.pick_option(&field.id, index),
            KeyCode::Delete => self.session.remove_option_at(&field.id, index).map(|_| ()),
            _ => return,
        };
        self.report(result);
    }

    fn handle_new_option_key(&mut self, key: KeyEvent, field: &Field) {
        match key.code {
            KeyCode::Char(c) => self.state.option_draft.push(c),
            KeyCode::Backspace => {
                self.state.option_draft.pop();
            }
            KeyCode::Enter => {
                let draft = std::mem::take(&mut self.state.option_draft);
                match self.session.append_option(&field.id, &draft) {
                    Ok(_) => {}
                    Err(FormError::BlankOption) => {
                        self.state.option_draft = draft;
                        self.state.status_message = Some(FormError::BlankOption.to_string());
                    }
                    Err(err) => self.report(Err(err)),
                }
            }
            _ => {}
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.prev_action(),
            KeyCode::Down | KeyCode::Char('j') => self.state.next_action(),
            KeyCode::Enter => self.run_action(self.state.selected_action()),
            KeyCode::Esc | KeyCode::Tab => self.state.focus.toggle(),
            KeyCode::Char('q') => self.request_quit(),
            _ => {}
        }
        Ok(())
    }

    fn handle_type_menu_key(&mut self, key: KeyEvent, selected: usize) -> Result<()> {
        let count = FieldType::ALL.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = if selected == 0 { count - 1 } else { selected - 1 };
                self.state.overlay = Overlay::TypeMenu { selected };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.overlay = Overlay::TypeMenu {
                    selected: (selected + 1) % count,
                };
            }
            KeyCode::Enter => self.add_field(FieldType::ALL[selected.min(count - 1)]),
            KeyCode::Esc => self.state.overlay = Overlay::None,
            _ => {}
        }
        Ok(())
    }

    fn handle_load_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('v') && key.modifiers.contains(crate::platform::PASTE_MODIFIER)
        {
            match self.clipboard.read() {
                Ok(bytes) => self
                    .state
                    .load_input
                    .push_str(&String::from_utf8_lossy(&bytes)),
                Err(err) => self.push_error(format!("Failed to read clipboard: {err}")),
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('o') => match self.document.read() {
                    Ok(bytes) => self.state.load_input = String::from_utf8_lossy(&bytes).into_owned(),
                    Err(err) => self.push_error(format!("{err:#}")),
                },
                KeyCode::Char('u') => self.state.load_input.clear(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char(c) => self.state.load_input.push(c),
            KeyCode::Backspace => {
                self.state.load_input.pop();
            }
            KeyCode::Enter => {
                self.state.overlay = Overlay::None;
                let input = self.state.load_input.clone();
                self.load_bytes(input.as_bytes(), "pasted JSON");
            }
            KeyCode::Esc => self.state.overlay = Overlay::None,
            _ => {}
        }
        Ok(())
    }

    /// Run an action panel button
    pub fn run_action(&mut self, action: Action) {
        match action {
            Action::AddField => self.open_type_menu(),
            Action::Submit => self.submit(),
            Action::Save => self.save(),
            Action::Load => self.open_load_dialog(),
            Action::CopyJson => self.copy_json(),
            Action::Quit => self.request_quit(),
        }
    }

    pub fn open_type_menu(&mut self) {
        self.state.overlay = Overlay::TypeMenu { selected: 0 };
    }

    pub fn open_load_dialog(&mut self) {
        self.state.overlay = Overlay::LoadDialog;
    }

    /// Append a field and put the cursor on it
    pub fn add_field(&mut self, field_type: FieldType) {
        self.session.add_field(field_type);
        self.state.overlay = Overlay::None;
        self.state.focus_field(self.session.fields().len() - 1);
    }

    /// Delete the field under the cursor, keeping at least one field
    pub fn delete_current_field(&mut self) {
        if !self.session.is_deletable() {
            self.state.status_message = Some("The last field cannot be deleted".to_string());
            return;
        }
        let Some(id) = self.current_field().map(|f| f.id.clone()) else {
            return;
        };
        let result = self.session.remove_field(&id).map(|_| ());
        if result.is_ok() {
            // Drafts belonged to the removed field, not whichever slides into its place
            self.state.reset_drafts();
        }
        self.report(result);
    }

    fn delete_current_option(&mut self) {
        let FieldRow::Option(index) = self.state.active_row else {
            return;
        };
        let Some(id) = self.current_field().map(|f| f.id.clone()) else {
            return;
        };
        let result = self.session.remove_option_at(&id, index).map(|_| ());
        self.report(result);
    }

    /// Reset the current field's value to its type's empty value
    fn clear_current_value(&mut self) {
        let Some(id) = self.current_field().map(|f| f.id.clone()) else {
            return;
        };
        if !self.session.values().contains(&id) {
            return;
        }
        self.session.clear_value(&id);
        self.state.status_message = Some("Value cleared".to_string());
    }

    /// Apply `edit` to the current text field's value
    fn edit_text_value(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(id) = self.current_field().map(|f| f.id.clone()) else {
            return;
        };
        let mut value = self.session.get_value(&id).as_text().to_string();
        edit(&mut value);
        self.session.set_value(&id, FieldValue::Text(value));
    }

    /// Step a dropdown's choice through its options, wrapping around
    fn cycle_selection(&mut self, field: &Field, step: isize) {
        let count = field.options.len();
        if count == 0 {
            return;
        }
        let current = self.session.get_value(&field.id);
        let next = match field.options.iter().position(|o| current.is_selected(o)) {
            Some(index) => (index as isize + step).rem_euclid(count as isize) as usize,
            None if step < 0 => count - 1,
            None => 0,
        };
        let result = self.session.pick_option(&field.id, next);
        self.report(result);
    }

    /// Validate the form and publish the outcome
    pub fn submit(&mut self) {
        let validation = self.session.validate();
        if validation.is_valid {
            info!("form submitted");
            self.state.errors = ErrorReport::new();
            self.state.status_message = Some(SUBMIT_SUCCESS_MESSAGE.to_string());
        } else {
            info!(errors = validation.errors.len(), "form failed validation");
            self.state.errors = validation.errors;
            self.state.status_message = None;
        }
    }

    /// Write the form document (and optionally copy it)
    pub fn save(&mut self) {
        match self.try_save() {
            Ok(message) => self.state.status_message = Some(message),
            Err(err) => {
                warn!(error = %err, "save failed");
                self.push_error(format!("Failed to save: {err:#}"));
            }
        }
    }

    fn try_save(&mut self) -> Result<String> {
        let bytes = self.session.save()?;
        self.document.write(&bytes)?;
        if self.config.copy_on_save() {
            self.clipboard.write(&bytes)?;
        }
        Ok(format!(
            "Saved to {} at {}",
            self.document.describe(),
            Local::now().format("%H:%M:%S")
        ))
    }

    /// Copy the form document to the clipboard
    pub fn copy_json(&mut self) {
        let result = self
            .session
            .save()
            .map_err(anyhow::Error::from)
            .and_then(|bytes| self.clipboard.write(&bytes));
        match result {
            Ok(()) => self.state.status_message = Some("Copied form JSON".to_string()),
            Err(err) => {
                warn!(error = %err, "copy failed");
                self.push_error(format!("Failed to copy: {err:#}"));
            }
        }
    }

    /// Load the document from its configured location
    pub fn load_document(&mut self) -> Result<()> {
        let bytes = self.document.read()?;
        let source = self.document.describe();
        self.load_bytes(&bytes, &source);
        Ok(())
    }

    /// Replace the form with a decoded document, or report a global error
    pub fn load_bytes(&mut self, bytes: &[u8], source: &str) {
        match self.session.load(bytes) {
            Ok(()) => {
                self.state.errors = ErrorReport::new();
                self.state.status_message = Some(format!(
                    "Loaded {} fields from {source}",
                    self.session.fields().len()
                ));
                self.state.focus_field(0);
            }
            Err(err) => {
                warn!(%source, error = %err, "load failed");
                self.state.errors = ErrorReport::global(LOAD_FAILED_MESSAGE);
                self.state.status_message = None;
            }
        }
        self.state.clamp(self.session.fields());
    }
}
