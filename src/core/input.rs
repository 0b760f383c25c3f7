//! Symbolic input alphabet.
//!
//! The terminal adapter translates raw key events into these values. Nothing
//! in `core` ever sees a terminal key code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Enter.
    Confirm,
    /// A printable character. Only text capture consumes these.
    Char(char),
    Backspace,
    /// Accept gesture for checkbox and radio groups (Esc).
    Finish,
    /// Ctrl+C. Leaves the navigator from any state.
    Interrupt,
    /// Terminal size changed, the screen must be redrawn.
    Resize,
    Other,
}
