//! # Actions
//!
//! Every menu item carries an action string in its configuration. That string
//! is parsed exactly once, when the menu model is built, into an `ActionKind`.
//! From then on the navigation controller matches on the enum, so adding a new
//! kind is a compile error everywhere it has to be handled.
//!
//! ```text
//! "submenu"  →  ActionKind::parse()  →  ActionKind::Submenu
//! "teleport" →  ActionKind::parse()  →  ActionKind::Unknown("teleport")
//! ```
//!
//! Unrecognized names are never fatal: `Unknown` behaves like `None`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Side-effecting task owned by the caller. The navigator only logs it.
    StartTask,
    Exit,
    Submenu,
    Back,
    TextInput,
    /// Single-choice list, yields `Chosen`.
    Select,
    /// Accumulating select that stops after the first confirmed choice.
    MultipleSelect,
    Checkbox,
    Radio,
    None,
    /// An action name this build does not know. Treated as a no-op.
    Unknown(String),
}

impl ActionKind {
    /// Parse a configuration action name. Case-insensitive, surrounding
    /// whitespace ignored.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "start_task" | "start_game" => ActionKind::StartTask,
            "exit" | "quit" => ActionKind::Exit,
            "submenu" => ActionKind::Submenu,
            "back" => ActionKind::Back,
            "input" | "text_input" => ActionKind::TextInput,
            "select" | "list" => ActionKind::Select,
            "multiple_select" | "multi_select" => ActionKind::MultipleSelect,
            "checkbox" => ActionKind::Checkbox,
            "radio" => ActionKind::Radio,
            "none" | "" => ActionKind::None,
            _ => ActionKind::Unknown(raw.to_string()),
        }
    }

    /// True for kinds that hand control to a selection machine.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            ActionKind::TextInput
                | ActionKind::Select
                | ActionKind::MultipleSelect
                | ActionKind::Checkbox
                | ActionKind::Radio
        )
    }

    /// True for kinds that cannot work without an `options` list.
    pub fn needs_options(&self) -> bool {
        matches!(
            self,
            ActionKind::Select | ActionKind::MultipleSelect | ActionKind::Checkbox | ActionKind::Radio
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::StartTask => write!(f, "start_task"),
            ActionKind::Exit => write!(f, "exit"),
            ActionKind::Submenu => write!(f, "submenu"),
            ActionKind::Back => write!(f, "back"),
            ActionKind::TextInput => write!(f, "input"),
            ActionKind::Select => write!(f, "select"),
            ActionKind::MultipleSelect => write!(f, "multiple_select"),
            ActionKind::Checkbox => write!(f, "checkbox"),
            ActionKind::Radio => write!(f, "radio"),
            ActionKind::None => write!(f, "none"),
            ActionKind::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}
