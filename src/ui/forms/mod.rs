//! Form rendering module
//!
//! - `field_renderer`: one card per field
//! - `form_view`: the scrolling column of cards and key hints

mod field_renderer;
mod form_view;

pub use form_view::{draw_form, help_text};
