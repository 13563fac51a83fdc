//! Form field definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque field identifier.
///
/// Documents may carry either numeric or string identifiers; whichever
/// spelling was read is the one written back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldId {
    Number(u64),
    Name(String),
}

impl FieldId {
    /// Key under which this field's value is stored in `formValues`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Numeric value of the key; a string id like `"7"` shares key space with `7`
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Name(name) => name.parse().ok(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<u64> for FieldId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

/// The closed set of field kinds a form can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

impl FieldType {
    /// Menu order for the "add field" menu
    pub const ALL: [FieldType; 5] = [
        Self::Text,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }

    /// Human-readable name shown in menus
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Textarea => "Text Area",
            Self::Select => "Dropdown",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Button",
        }
    }

    /// Whether the field's `options` mean anything
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }

    /// Whether values are typed in rather than picked from options
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Textarea)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form element's definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Field {
    /// Create a field with an empty label and no options
    pub fn new(id: FieldId, field_type: FieldType) -> Self {
        Self {
            id,
            field_type,
            label: String::new(),
            options: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Label to render, with a placeholder for unlabeled fields
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "Label"
        } else {
            &self.label
        }
    }

    /// Merge a partial update. Identifier and type are never touched.
    pub fn apply(&mut self, update: FieldUpdate) {
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(options) = update.options {
            self.options = options;
        }
    }
}

/// Partial set of attributes for `FormSession::update_field`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    pub label: Option<String>,
    pub options: Option<Vec<String>>,
}

impl FieldUpdate {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            options: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.options.is_none()
    }
}
