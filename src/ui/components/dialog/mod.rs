//! Dialog components for TUI

mod base;
mod error_dialog;
mod load_dialog;

pub use base::centered_rect;
pub use error_dialog::render_error_dialog;
pub use load_dialog::render_load_dialog;
