//! Errors raised by form operations

use super::field::{FieldId, FieldType};
use thiserror::Error;

/// Failure of a field model, option list or document operation.
///
/// Validation failures are not errors; see `Validation`.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("no field with id {0}")]
    NotFound(FieldId),

    #[error("option index {index} is out of range (field has {len} options)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} fields do not take options")]
    OptionsNotSupported(FieldType),

    #[error("dropdown options cannot be blank")]
    BlankOption,

    #[error("malformed form document: {0}")]
    MalformedInput(String),

    #[error("failed to encode form document: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type FormResult<T> = std::result::Result<T, FormError>;
