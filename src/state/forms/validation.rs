//! Submit-time validation of a form's values

use super::field::{Field, FieldId, FieldType};
use super::values::{FieldValue, FormValues};
use std::collections::BTreeMap;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const MIN_LENGTH_MESSAGE: &str = "Minimum 1 character required.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load configuration.";

/// What an error message is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorScope {
    /// Whole-document problems, such as a failed load
    Global,
    Field(FieldId),
}

/// Error messages keyed by scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    entries: BTreeMap<ErrorScope, String>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding a single global message
    pub fn global(message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.insert(ErrorScope::Global, message);
        report
    }

    pub fn insert(&mut self, scope: ErrorScope, message: impl Into<String>) {
        self.entries.insert(scope, message.into());
    }

    pub fn for_field(&self, id: &FieldId) -> Option<&str> {
        self.entries
            .get(&ErrorScope::Field(id.clone()))
            .map(String::as_str)
    }

    pub fn global_message(&self) -> Option<&str> {
        self.entries.get(&ErrorScope::Global).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: ErrorReport,
}

/// Check every field's value in collection order.
///
/// Only text and textarea fields carry rules; option-bearing fields are
/// never required to have a selection.
pub fn validate(fields: &[Field], values: &FormValues) -> Validation {
    let mut errors = ErrorReport::new();

    for field in fields {
        let value = values.get_value(field);
        if let Some(message) = check_field(field.field_type, &value) {
            errors.insert(ErrorScope::Field(field.id.clone()), message);
        }
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_field(field_type: FieldType, value: &FieldValue) -> Option<&'static str> {
    let trimmed_len = value.as_text().trim().chars().count();
    match field_type {
        FieldType::Text if trimmed_len == 0 => Some(REQUIRED_MESSAGE),
        FieldType::Textarea if trimmed_len < 1 => Some(MIN_LENGTH_MESSAGE),
        _ => None,
    }
}
