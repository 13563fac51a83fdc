//! Form domain layer
//!
//! Field definitions, option editing, the value store, validation and the
//! JSON document format. Nothing in here knows about the terminal UI.

mod document;
mod error;
mod field;
mod options;
mod session;
mod validation;
mod values;

pub use error::{FormError, FormResult};
pub use field::{Field, FieldType, FieldUpdate};
pub use session::FormSession;
pub use validation::{ErrorReport, LOAD_FAILED_MESSAGE};
pub use values::FieldValue;

#[cfg(test)]
pub use field::FieldId;
#[cfg(test)]
pub use validation::{MIN_LENGTH_MESSAGE, REQUIRED_MESSAGE};
