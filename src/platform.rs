//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for clipboard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Paste shortcut display for the load dialog
#[cfg(target_os = "macos")]
pub const PASTE_SHORTCUT: &str = "Cmd+V";

#[cfg(not(target_os = "macos"))]
pub const PASTE_SHORTCUT: &str = "Ctrl+V";

/// Shortcuts that use Ctrl on every platform
pub const SAVE_SHORTCUT: &str = "Ctrl+S";
pub const LOAD_SHORTCUT: &str = "Ctrl+L";
pub const SUBMIT_SHORTCUT: &str = "Ctrl+R";
pub const ADD_FIELD_SHORTCUT: &str = "Ctrl+N";
