//! The form being designed: fields, their values, and identifier allocation

use super::document;
use super::error::{FormError, FormResult};
use super::field::{Field, FieldId, FieldType, FieldUpdate};
use super::validation::{self, Validation};
use super::values::{FieldValue, FormValues, StoredValue};
use tracing::{debug, info, warn};

/// Owns the field collection and the value store.
///
/// Field order in the collection is display order and the order used by
/// validation and serialization. Every mutation either succeeds completely
/// or leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    fields: Vec<Field>,
    values: FormValues,
    next_id: u64,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// An empty form
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            values: FormValues::new(),
            next_id: 1,
        }
    }

    /// A form pre-populated with the starter "Name" and "Address" fields
    pub fn seeded() -> Self {
        let mut session = Self::new();
        for (field_type, label) in [(FieldType::Text, "Name"), (FieldType::Textarea, "Address")] {
            let id = session.allocate_id();
            session.fields.push(Field::new(id, field_type).with_label(label));
        }
        debug!(fields = session.fields.len(), "seeded starter form");
        session
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    fn field_mut(&mut self, id: &FieldId) -> FormResult<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| FormError::NotFound(id.clone()))
    }

    fn allocate_id(&mut self) -> FieldId {
        let id = self.next_id;
        // Loaded ids are capped at MAX_FIELD_ID, so this never saturates in practice
        self.next_id = self.next_id.saturating_add(1);
        FieldId::Number(id)
    }

    /// Add an empty field of `field_type` at the end of the form
    pub fn add_field(&mut self, field_type: FieldType) -> &Field {
        let id = self.allocate_id();
        debug!(%id, %field_type, "add field");
        self.fields.push(Field::new(id, field_type));
        &self.fields[self.fields.len() - 1]
    }

    /// Merge `update` into the field with `id`
    pub fn update_field(&mut self, id: &FieldId, update: FieldUpdate) -> FormResult<&Field> {
        let field = self.field_mut(id)?;
        if !update.is_empty() {
            debug!(%id, ?update, "update field");
            field.apply(update);
        }
        Ok(&*field)
    }

    /// Remove a field and its stored value
    pub fn remove_field(&mut self, id: &FieldId) -> FormResult<Field> {
        let index = self
            .position(id)
            .ok_or_else(|| FormError::NotFound(id.clone()))?;
        let field = self.fields.remove(index);
        self.values.clear_value(id);
        debug!(%id, "remove field");
        Ok(field)
    }

    /// Whether the presentation layer should offer deletion
    pub fn is_deletable(&self) -> bool {
        self.fields.len() > 1
    }

    pub fn append_option(&mut self, id: &FieldId, value: &str) -> FormResult<usize> {
        let index = self.field_mut(id)?.append_option(value)?;
        debug!(%id, index, "append option");
        Ok(index)
    }

    pub fn replace_option_at(&mut self, id: &FieldId, index: usize, value: &str) -> FormResult<()> {
        self.field_mut(id)?.replace_option_at(index, value)
    }

    pub fn remove_option_at(&mut self, id: &FieldId, index: usize) -> FormResult<String> {
        let removed = self.field_mut(id)?.remove_option_at(index)?;
        debug!(%id, index, "remove option");
        Ok(removed)
    }

    /// Store a value for `id`; no type check happens here
    pub fn set_value(&mut self, id: &FieldId, value: impl Into<StoredValue>) {
        self.values.set_value(id, value);
    }

    /// Value for `id` seen through its field's type.
    ///
    /// Values without a field are returned as stored, or as empty text.
    pub fn get_value(&self, id: &FieldId) -> FieldValue {
        match self.field(id) {
            Some(field) => self.values.get_value(field),
            None => match self.values.get(id) {
                Some(StoredValue::Single(s)) => FieldValue::Text(s.clone()),
                Some(StoredValue::Many(set)) => FieldValue::MultiSelection(set.clone()),
                None => FieldValue::Text(String::new()),
            },
        }
    }

    pub fn clear_value(&mut self, id: &FieldId) {
        self.values.clear_value(id);
    }

    /// Pick the option at `index`: selects it for select/radio fields,
    /// toggles it for checkbox fields
    pub fn pick_option(&mut self, id: &FieldId, index: usize) -> FormResult<()> {
        let field = self.field(id).ok_or_else(|| FormError::NotFound(id.clone()))?;
        if !field.field_type.has_options() {
            return Err(FormError::OptionsNotSupported(field.field_type));
        }
        let option = field
            .options
            .get(index)
            .cloned()
            .ok_or(FormError::IndexOutOfRange {
                index,
                len: field.options.len(),
            })?;

        let value = match self.values.get_value(field) {
            FieldValue::MultiSelection(mut set) => {
                if !set.remove(&option) {
                    set.insert(option);
                }
                FieldValue::MultiSelection(set)
            }
            _ => FieldValue::Selection(option),
        };
        self.values.set_value(id, value);
        Ok(())
    }

    pub fn validate(&self) -> Validation {
        validation::validate(&self.fields, &self.values)
    }

    /// Encode the whole form as a JSON document
    pub fn save(&self) -> FormResult<Vec<u8>> {
        let bytes = document::save(&self.fields, &self.values)?;
        info!(
            fields = self.fields.len(),
            values = self.values.len(),
            bytes = bytes.len(),
            "saved form document"
        );
        Ok(bytes)
    }

    /// Replace fields and values with a decoded document.
    ///
    /// On failure the current fields and values are kept as they were.
    pub fn load(&mut self, bytes: &[u8]) -> FormResult<()> {
        let document = match document::load(bytes) {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "rejected form document");
                return Err(err);
            }
        };
        let (fields, values) = document.into_parts();

        let highest = fields.iter().filter_map(|f| f.id.as_number()).max();
        if let Some(highest) = highest {
            self.next_id = self.next_id.max(highest + 1);
        }

        info!(fields = fields.len(), values = values.len(), "loaded form document");
        self.fields = fields;
        self.values = values;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::document::MAX_FIELD_ID;
    use crate::state::forms::validation::{MIN_LENGTH_MESSAGE, REQUIRED_MESSAGE};
    use std::collections::BTreeSet;

    fn ids(session: &FormSession) -> Vec<FieldId> {
        session.fields().iter().map(|f| f.id.clone()).collect()
    }

    mod field_model {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_field_defaults() {
            let mut session = FormSession::new();
            let field = session.add_field(FieldType::Select);
            assert_eq!(field.id, FieldId::from(1));
            assert_eq!(field.field_type, FieldType::Select);
            assert!(field.label.is_empty());
            assert!(field.options.is_empty());
        }

        #[test]
        fn test_seeded_form() {
            let session = FormSession::seeded();
            let summary: Vec<_> = session
                .fields()
                .iter()
                .map(|f| (f.id.clone(), f.field_type, f.label.as_str()))
                .collect();
            assert_eq!(
                summary,
                vec![
                    (FieldId::from(1), FieldType::Text, "Name"),
                    (FieldId::from(2), FieldType::Textarea, "Address"),
                ]
            );
        }

        #[test]
        fn test_order_and_ids_across_add_remove() {
            let mut session = FormSession::new();
            for ty in FieldType::ALL {
                session.add_field(ty);
            }
            session.remove_field(&FieldId::from(2)).unwrap();
            session.remove_field(&FieldId::from(5)).unwrap();
            let new_id = session.add_field(FieldType::Text).id.clone();

            assert_eq!(new_id, FieldId::from(6));
            assert_eq!(
                ids(&session),
                vec![FieldId::from(1), FieldId::from(3), FieldId::from(4), FieldId::from(6)]
            );
        }

        #[test]
        fn test_ids_not_reused_after_removing_last() {
            let mut session = FormSession::new();
            session.add_field(FieldType::Text);
            session.remove_field(&FieldId::from(1)).unwrap();
            assert_eq!(session.add_field(FieldType::Text).id, FieldId::from(2));
        }

        #[test]
        fn test_update_field() {
            let mut session = FormSession::new();
            session.add_field(FieldType::Radio);
            let field = session
                .update_field(&FieldId::from(1), FieldUpdate::label("Size"))
                .unwrap();
            assert_eq!(field.label, "Size");
            assert_eq!(field.field_type, FieldType::Radio);
        }

        #[test]
        fn test_update_missing_field() {
            let mut session = FormSession::new();
            let err = session
                .update_field(&FieldId::from(9), FieldUpdate::label("x"))
                .unwrap_err();
            assert!(matches!(err, FormError::NotFound(id) if id == FieldId::from(9)));
        }

        #[test]
        fn test_remove_clears_value() {
            let mut session = FormSession::seeded();
            let id = FieldId::from(1);
            session.set_value(&id, "Alice");
            session.remove_field(&id).unwrap();
            assert!(!session.values().contains(&id));
            assert_eq!(session.get_value(&id), FieldValue::Text(String::new()));
        }

        #[test]
        fn test_remove_missing_field_fails_without_change() {
            let mut session = FormSession::seeded();
            let before = session.clone();
            assert!(matches!(
                session.remove_field(&FieldId::from(42)),
                Err(FormError::NotFound(_))
            ));
            assert_eq!(session, before);
        }

        #[test]
        fn test_is_deletable() {
            let mut session = FormSession::new();
            session.add_field(FieldType::Text);
            assert!(!session.is_deletable());
            session.add_field(FieldType::Text);
            assert!(session.is_deletable());
        }
    }

    mod options {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_option_edits_through_session() {
            let mut session = FormSession::new();
            let id = session.add_field(FieldType::Checkbox).id.clone();
            session.append_option(&id, "").unwrap();
            session.append_option(&id, "Blue").unwrap();
            session.replace_option_at(&id, 0, "Red").unwrap();
            assert_eq!(session.field(&id).unwrap().options, vec!["Red", "Blue"]);

            assert_eq!(session.remove_option_at(&id, 0).unwrap(), "Red");
            assert_eq!(session.field(&id).unwrap().options, vec!["Blue"]);
        }

        #[test]
        fn test_option_edit_on_missing_field() {
            let mut session = FormSession::new();
            assert!(matches!(
                session.append_option(&FieldId::from(1), "A"),
                Err(FormError::NotFound(_))
            ));
        }
    }

    mod values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_get_value_uses_field_type() {
            let mut session = FormSession::new();
            let radio = session.add_field(FieldType::Radio).id.clone();
            let check = session.add_field(FieldType::Checkbox).id.clone();
            assert_eq!(session.get_value(&radio), FieldValue::Selection(String::new()));
            assert_eq!(session.get_value(&check), FieldValue::MultiSelection(BTreeSet::new()));
        }

        #[test]
        fn test_orphan_values_are_kept() {
            let mut session = FormSession::new();
            session.set_value(&FieldId::from("ghost"), "boo");
            assert_eq!(session.get_value(&FieldId::from("ghost")), FieldValue::Text("boo".into()));
            session.clear_value(&FieldId::from("ghost"));
            assert!(session.values().is_empty());
        }

        #[test]
        fn test_pick_option_radio_replaces() {
            let mut session = FormSession::new();
            let id = session.add_field(FieldType::Radio).id.clone();
            session.append_option(&id, "S").unwrap();
            session.append_option(&id, "M").unwrap();
            session.pick_option(&id, 0).unwrap();
            session.pick_option(&id, 1).unwrap();
            assert_eq!(session.get_value(&id), FieldValue::Selection("M".into()));
        }

        #[test]
        fn test_pick_option_checkbox_toggles() {
            let mut session = FormSession::new();
            let id = session.add_field(FieldType::Checkbox).id.clone();
            session.append_option(&id, "A").unwrap();
            session.append_option(&id, "B").unwrap();
            session.pick_option(&id, 0).unwrap();
            session.pick_option(&id, 1).unwrap();
            session.pick_option(&id, 0).unwrap();
            assert_eq!(
                session.get_value(&id),
                FieldValue::MultiSelection(BTreeSet::from(["B".to_string()]))
            );
        }

        #[test]
        fn test_pick_option_errors() {
            let mut session = FormSession::seeded();
            assert!(matches!(
                session.pick_option(&FieldId::from(1), 0),
                Err(FormError::OptionsNotSupported(FieldType::Text))
            ));
            let id = session.add_field(FieldType::Select).id.clone();
            assert!(matches!(
                session.pick_option(&id, 0),
                Err(FormError::IndexOutOfRange { index: 0, len: 0 })
            ));
        }
    }

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_seeded_form_needs_both_values() {
            let mut session = FormSession::seeded();
            let result = session.validate();
            assert_eq!(result.errors.for_field(&FieldId::from(1)), Some(REQUIRED_MESSAGE));
            assert_eq!(result.errors.for_field(&FieldId::from(2)), Some(MIN_LENGTH_MESSAGE));

            session.set_value(&FieldId::from(1), "Alice");
            session.set_value(&FieldId::from(2), "a");
            assert!(session.validate().is_valid);
        }
    }

    mod persistence {
        use super::*;
        use pretty_assertions::assert_eq;

        fn populated() -> FormSession {
            let mut session = FormSession::seeded();
            let colors = session.add_field(FieldType::Checkbox).id.clone();
            session.append_option(&colors, "Red").unwrap();
            session.append_option(&colors, "").unwrap();
            session.pick_option(&colors, 1).unwrap();
            session.set_value(&FieldId::from(1), "Alice");
            session
        }

        #[test]
        fn test_round_trip() {
            let before = populated();
            let bytes = before.save().unwrap();

            let mut restored = FormSession::new();
            restored.load(&bytes).unwrap();
            assert_eq!(restored.fields(), before.fields());
            assert_eq!(restored.values(), before.values());
        }

        #[test]
        fn test_malformed_load_keeps_state() {
            let mut session = populated();
            let before = session.clone();
            let err = session.load(b"{not json").unwrap_err();
            assert!(matches!(err, FormError::MalformedInput(_)));
            assert_eq!(session, before);
        }

        #[test]
        fn test_load_replaces_wholesale() {
            let mut session = populated();
            session.load(br#"{"fields": [{"id": "x", "type": "text"}]}"#).unwrap();
            assert_eq!(ids(&session), vec![FieldId::from("x")]);
            assert!(session.values().is_empty());
        }

        #[test]
        fn test_ids_after_load_skip_loaded_ids() {
            let mut session = FormSession::new();
            session
                .load(br#"{"fields": [{"id": 1700000000000, "type": "text"}, {"id": "a", "type": "radio"}]}"#)
                .unwrap();
            assert_eq!(session.add_field(FieldType::Text).id, FieldId::from(1_700_000_000_001));
        }

        #[test]
        fn test_ids_never_move_backwards_on_load() {
            let mut session = FormSession::new();
            for _ in 0..5 {
                session.add_field(FieldType::Text);
            }
            session.load(br#"{"fields": [{"id": 1, "type": "text"}]}"#).unwrap();
            assert_eq!(session.add_field(FieldType::Text).id, FieldId::from(6));
        }

        #[test]
        fn test_ids_after_loading_largest_allowed_id() {
            let mut session = FormSession::new();
            let json = format!(r#"{{"fields": [{{"id": {MAX_FIELD_ID}, "type": "text"}}]}}"#);
            session.load(json.as_bytes()).unwrap();
            let first = session.add_field(FieldType::Text).id.clone();
            let second = session.add_field(FieldType::Text).id.clone();
            assert_eq!(first, FieldId::from(MAX_FIELD_ID + 1));
            assert_eq!(second, FieldId::from(MAX_FIELD_ID + 2));
        }

        #[test]
        fn test_out_of_range_id_is_rejected_without_change() {
            let mut session = FormSession::seeded();
            let before = session.clone();
            let result = session.load(br#"{"fields": [{"id": 18446744073709551615, "type": "text"}]}"#);
            assert!(matches!(result, Err(FormError::MalformedInput(_))));
            assert_eq!(session, before);
            assert_eq!(session.add_field(FieldType::Text).id, FieldId::from(3));
        }

        #[test]
        fn test_numeric_string_ids_are_skipped() {
            let mut session = FormSession::new();
            session.load(br#"{"fields": [{"id": "3", "type": "text"}]}"#).unwrap();
            assert_eq!(session.add_field(FieldType::Text).id, FieldId::from(4));
        }
    }
}
