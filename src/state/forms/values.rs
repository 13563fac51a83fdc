//! Submitted values, keyed by field identifier

use super::field::{Field, FieldId, FieldType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A value as it is persisted: one string, or a set of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Single(String),
    Many(BTreeSet<String>),
}

/// A value as seen through its field's declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Typed input of a text or textarea field
    Text(String),
    /// The chosen option of a select or radio field (empty when unset)
    Selection(String),
    /// The checked options of a checkbox field
    MultiSelection(BTreeSet<String>),
}

impl FieldValue {
    /// The empty value for a field of type `ty`
    pub fn empty_for(ty: FieldType) -> Self {
        match ty {
            FieldType::Text | FieldType::Textarea => Self::Text(String::new()),
            FieldType::Select | FieldType::Radio => Self::Selection(String::new()),
            FieldType::Checkbox => Self::MultiSelection(BTreeSet::new()),
        }
    }

    /// Interpret a stored value for a field of type `ty`.
    ///
    /// Shapes that don't fit the type resolve to the type's empty value,
    /// except that a single checkbox string is treated as a one-item set and
    /// a one-item set is accepted as a select/radio choice.
    pub fn resolve(stored: Option<&StoredValue>, ty: FieldType) -> Self {
        let Some(stored) = stored else {
            return Self::empty_for(ty);
        };
        match (ty, stored) {
            (FieldType::Text | FieldType::Textarea, StoredValue::Single(s)) => Self::Text(s.clone()),
            (FieldType::Select | FieldType::Radio, StoredValue::Single(s)) => {
                Self::Selection(s.clone())
            }
            (FieldType::Select | FieldType::Radio, StoredValue::Many(set)) if set.len() == 1 => {
                Self::Selection(set.iter().next().cloned().unwrap_or_default())
            }
            (FieldType::Checkbox, StoredValue::Single(s)) if !s.is_empty() => {
                Self::MultiSelection(BTreeSet::from([s.clone()]))
            }
            (FieldType::Checkbox, StoredValue::Many(set)) => Self::MultiSelection(set.clone()),
            _ => Self::empty_for(ty),
        }
    }

    /// Text content, empty for multi-selections
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Selection(s) => s,
            Self::MultiSelection(_) => "",
        }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Selection(s) => !s.is_empty() && s == option,
            Self::MultiSelection(set) => set.contains(option),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Selection(s) => s.is_empty(),
            Self::MultiSelection(set) => set.is_empty(),
        }
    }

}

impl From<FieldValue> for StoredValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) | FieldValue::Selection(s) => StoredValue::Single(s),
            FieldValue::MultiSelection(set) => StoredValue::Many(set),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Single(value.to_string())
    }
}

/// Mapping from field key to stored value.
///
/// Independent of field definitions: nothing here checks that a key belongs
/// to an existing field or that a value fits the field's type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    entries: BTreeMap<String, StoredValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the value for `id`
    pub fn set_value(&mut self, id: &FieldId, value: impl Into<StoredValue>) {
        self.entries.insert(id.key(), value.into());
    }

    /// Raw stored value for `id`
    pub fn get(&self, id: &FieldId) -> Option<&StoredValue> {
        self.entries.get(&id.key())
    }

    /// Value for `field`, or its type's empty value if nothing is stored
    pub fn get_value(&self, field: &Field) -> FieldValue {
        FieldValue::resolve(self.get(&field.id), field.field_type)
    }

    /// Remove the entry for `id` entirely
    pub fn clear_value(&mut self, id: &FieldId) -> Option<StoredValue> {
        self.entries.remove(&id.key())
    }

    /// Whether `id` has a stored entry
    pub fn contains(&self, id: &FieldId) -> bool {
        self.entries.contains_key(&id.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
