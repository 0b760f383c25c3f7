//! # Selection Machines
//!
//! Short-lived state machines for interactive menu items. One is created when
//! the user confirms such an item and dropped as soon as it yields a
//! `SelectionResult`.
//!
//! ```text
//! Key ─► handle_key() ─► None                  (keep going)
//!                    └─► Some(SelectionResult) (done, hand back to navigator)
//! ```
//!
//! List, multi-select, checkbox and radio share the same cursor movement
//! (`OptionCursor`). Only what `Confirm` does differs:
//!
//! | machine   | Confirm                      | Finish (Esc)           |
//! |-----------|------------------------------|------------------------|
//! | list      | `Chosen(option)`             | ignored                |
//! | multi     | `MultiChosen([option])`      | ignored                |
//! | checkbox  | toggle, keep going           | `CheckboxStates(..)`   |
//! | radio     | select, keep going           | `RadioIndex(..)`       |
//! | text      | `Text(buffer)`               | ignored                |

use crate::core::action::ActionKind;
use crate::core::input::Key;
use crate::core::menu::MenuItem;

/// Terminal payload of a selection machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    Chosen(String),
    MultiChosen(Vec<String>),
    /// One flag per option, in option order.
    CheckboxStates(Vec<bool>),
    /// Index of the selected option; 0 for a group without options.
    RadioIndex(usize),
    Text(String),
}

/// A machine that consumes symbolic keys until it produces a result.
pub trait SelectionMachine {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult>;
}

/// Cursor over a fixed number of options. Clamps at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCursor {
    index: usize,
    len: usize,
}

impl OptionCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Apply `Up`/`Down`. Returns true if the cursor moved.
    pub fn step(&mut self, key: Key) -> bool {
        match key {
            Key::Up if self.index > 0 => {
                self.index -= 1;
                true
            }
            Key::Down if self.index + 1 < self.len => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Single-choice list
// ============================================================================

#[derive(Debug, Clone)]
pub struct ListSelect {
    options: Vec<String>,
    cursor: OptionCursor,
}

impl ListSelect {
    pub fn new(options: Vec<String>) -> Self {
        let cursor = OptionCursor::new(options.len());
        Self { options, cursor }
    }
}

impl SelectionMachine for ListSelect {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult> {
        match key {
            Key::Confirm => self
                .options
                .get(self.cursor.index())
                .map(|option| SelectionResult::Chosen(option.clone())),
            _ => {
                self.cursor.step(key);
                None
            }
        }
    }
}

// ============================================================================
// Multi-select
// ============================================================================

/// Accumulates confirmed options, but finishes right after the first one.
#[derive(Debug, Clone)]
pub struct MultiSelect {
    options: Vec<String>,
    cursor: OptionCursor,
    chosen: Vec<String>,
}

impl MultiSelect {
    pub fn new(options: Vec<String>) -> Self {
        let cursor = OptionCursor::new(options.len());
        Self {
            options,
            cursor,
            chosen: Vec::new(),
        }
    }
}

impl SelectionMachine for MultiSelect {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult> {
        match key {
            Key::Confirm => {
                let option = self.options.get(self.cursor.index())?;
                self.chosen.push(option.clone());
                Some(SelectionResult::MultiChosen(std::mem::take(&mut self.chosen)))
            }
            _ => {
                self.cursor.step(key);
                None
            }
        }
    }
}

// ============================================================================
// Checkbox group
// ============================================================================

#[derive(Debug, Clone)]
pub struct CheckboxGroup {
    options: Vec<String>,
    cursor: OptionCursor,
    toggled: Vec<bool>,
}

impl CheckboxGroup {
    pub fn new(options: Vec<String>) -> Self {
        let cursor = OptionCursor::new(options.len());
        let toggled = vec![false; options.len()];
        Self {
            options,
            cursor,
            toggled,
        }
    }

    pub fn toggled(&self) -> &[bool] {
        &self.toggled
    }
}

impl SelectionMachine for CheckboxGroup {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult> {
        match key {
            Key::Confirm => {
                if let Some(flag) = self.toggled.get_mut(self.cursor.index()) {
                    *flag = !*flag;
                }
                None
            }
            Key::Finish => Some(SelectionResult::CheckboxStates(self.toggled.clone())),
            _ => {
                self.cursor.step(key);
                None
            }
        }
    }
}

// ============================================================================
// Radio group
// ============================================================================

#[derive(Debug, Clone)]
pub struct RadioGroup {
    options: Vec<String>,
    cursor: OptionCursor,
    selected: usize,
}

impl RadioGroup {
    pub fn new(options: Vec<String>) -> Self {
        let cursor = OptionCursor::new(options.len());
        Self {
            options,
            cursor,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl SelectionMachine for RadioGroup {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult> {
        match key {
            Key::Confirm => {
                if self.cursor.index() < self.options.len() {
                    self.selected = self.cursor.index();
                }
                None
            }
            // Option-less groups still finish, reporting the initial 0.
            Key::Finish => Some(SelectionResult::RadioIndex(self.selected)),
            _ => {
                self.cursor.step(key);
                None
            }
        }
    }
}

// ============================================================================
// Text capture
// ============================================================================

#[derive(Debug, Clone)]
pub struct TextCapture {
    prompt: String,
    buffer: String,
}

impl TextCapture {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            buffer: String::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

impl SelectionMachine for TextCapture {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult> {
        match key {
            Key::Char(c) => {
                self.buffer.push(c);
                None
            }
            Key::Backspace => {
                self.buffer.pop();
                None
            }
            Key::Confirm => Some(SelectionResult::Text(std::mem::take(&mut self.buffer))),
            _ => None,
        }
    }
}

// ============================================================================
// Selector: the machine for one interactive item
// ============================================================================

#[derive(Debug, Clone)]
pub enum Selector {
    List(ListSelect),
    Multi(MultiSelect),
    Checkbox(CheckboxGroup),
    Radio(RadioGroup),
    Text(TextCapture),
}

impl Selector {
    /// Machine for an interactive item, `None` for every other action.
    pub fn for_item(item: &MenuItem) -> Option<Self> {
        let options = item.options.clone();
        match item.action {
            ActionKind::TextInput => Some(Selector::Text(TextCapture::new(item.label.clone()))),
            ActionKind::Select => Some(Selector::List(ListSelect::new(options))),
            ActionKind::MultipleSelect => Some(Selector::Multi(MultiSelect::new(options))),
            ActionKind::Checkbox => Some(Selector::Checkbox(CheckboxGroup::new(options))),
            ActionKind::Radio => Some(Selector::Radio(RadioGroup::new(options))),
            _ => None,
        }
    }

    /// Options shown by list-shaped machines. Empty for text capture.
    pub fn options(&self) -> &[String] {
        match self {
            Selector::List(m) => &m.options,
            Selector::Multi(m) => &m.options,
            Selector::Checkbox(m) => &m.options,
            Selector::Radio(m) => &m.options,
            Selector::Text(_) => &[],
        }
    }

    pub fn cursor(&self) -> usize {
        match self {
            Selector::List(m) => m.cursor.index(),
            Selector::Multi(m) => m.cursor.index(),
            Selector::Checkbox(m) => m.cursor.index(),
            Selector::Radio(m) => m.cursor.index(),
            Selector::Text(_) => 0,
        }
    }
}

impl SelectionMachine for Selector {
    fn handle_key(&mut self, key: Key) -> Option<SelectionResult> {
        match self {
            Selector::List(m) => m.handle_key(key),
            Selector::Multi(m) => m.handle_key(key),
            Selector::Checkbox(m) => m.handle_key(key),
            Selector::Radio(m) => m.handle_key(key),
            Selector::Text(m) => m.handle_key(key),
        }
    }
}
