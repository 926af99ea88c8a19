//! Abstract input key event, independent of terminal library.
//!
//! Keyboard input is converted from crossterm's event type at the TUI
//! boundary so this crate stays free of terminal-specific dependencies.

/// Keyboard input as seen by the update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl held (Ctrl+c etc.)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
}
