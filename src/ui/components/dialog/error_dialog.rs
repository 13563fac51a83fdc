//! Error dialog component

use super::base::{key_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, text::Span, Frame};

/// Render the oldest queued error, noting how many more are waiting
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, pending: usize) {
    let mut hint = vec![
        Span::raw("Press "),
        key_hint("Enter"),
        Span::raw(" or "),
        key_hint("Esc"),
        Span::raw(" to dismiss"),
    ];
    if pending > 1 {
        hint.push(Span::raw(format!(" ({} more)", pending - 1)));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            color: Color::Red,
            message: error_message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
