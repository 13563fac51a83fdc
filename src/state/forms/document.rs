//! JSON persistence of a form's fields and values

use super::error::{FormError, FormResult};
use super::field::Field;
use super::values::FormValues;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Largest numeric field id a document may carry (2^53 - 1, the integer
/// range JSON tools keep exact). Keeps the id counter far from overflow.
pub const MAX_FIELD_ID: u64 = (1 << 53) - 1;

/// A decoded form document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormDocument {
    #[serde(default)]
    fields: Option<Vec<Field>>,
    #[serde(default, rename = "formValues")]
    form_values: Option<FormValues>,
}

impl FormDocument {
    /// Split into fields and values, defaulting absent (or null) sections to empty
    pub fn into_parts(self) -> (Vec<Field>, FormValues) {
        (
            self.fields.unwrap_or_default(),
            self.form_values.unwrap_or_default(),
        )
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    fields: &'a [Field],
    #[serde(rename = "formValues")]
    form_values: &'a FormValues,
}

/// Encode fields and values as a pretty-printed JSON document
pub fn save(fields: &[Field], values: &FormValues) -> FormResult<Vec<u8>> {
    let document = DocumentRef {
        fields,
        form_values: values,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Decode a document. The top level must be a JSON object.
pub fn load(bytes: &[u8]) -> FormResult<FormDocument> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| FormError::MalformedInput(e.to_string()))?;

    if !value.is_object() {
        return Err(FormError::MalformedInput(
            "top-level value is not an object".to_string(),
        ));
    }

    let document: FormDocument =
        serde_json::from_value(value).map_err(|e| FormError::MalformedInput(e.to_string()))?;
    check_ids(document.fields.as_deref().unwrap_or_default())?;
    Ok(document)
}

/// Ids must stay in range and map to distinct `formValues` keys (`1` and `"1"` collide)
fn check_ids(fields: &[Field]) -> FormResult<()> {
    let mut keys = BTreeSet::new();
    for field in fields {
        if field.id.as_number().is_some_and(|n| n > MAX_FIELD_ID) {
            return Err(FormError::MalformedInput(format!(
                "field id {} is larger than {MAX_FIELD_ID}",
                field.id
            )));
        }
        if !keys.insert(field.id.key()) {
            return Err(FormError::MalformedInput(format!(
                "more than one field has id {}",
                field.id
            )));
        }
    }
    Ok(())
}
