//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use crate::core::config::{parse_str, ConfigFormat, MenuConfig};
use crate::core::input::Key;
use crate::core::menu::MenuModel;
use crate::core::surface::{EventLog, RenderSurface, Severity, TextAttr};

/// Root menu with a "play" submenu that only goes back.
pub const PLAY_MENU_JSON: &str = r#"{
    "menu_title": "Main",
    "menu_items": [
        {"label": "Play", "action": "submenu", "submenu": "play"},
        {"label": "Quit", "action": "exit"}
    ],
    "submenus": {
        "play": {"menu_title": "Play", "menu_items": [{"label": "Back", "action": "back"}]}
    }
}"#;

/// One item per action kind, plus a two-level submenu chain.
pub const WIDGETS_MENU_JSON: &str = r#"{
    "menu_title": "Widgets",
    "language": "en",
    "menu_items": [
        {"label": "Deep", "action": "submenu", "submenu": "deep"},
        {"label": "Launch", "action": "start_task"},
        {"label": "Name", "action": "input"},
        {"label": "Colour", "action": "multiple_select", "options": ["red", "green", "blue"]},
        {"label": "Flags", "action": "checkbox", "options": ["a", "b", "c"]},
        {"label": "Level", "action": "radio", "options": ["lo", "hi"]},
        {"label": "Pick", "action": "select", "options": ["x", "y"]},
        {"label": "Nothing", "action": "none"},
        {"label": "Mystery", "action": "teleport"},
        {"label": "Back", "action": "back"},
        {"label": "Quit", "action": "exit"}
    ],
    "submenus": {
        "deep": {
            "menu_title": "Deep",
            "menu_items": [
                {"label": "Deeper", "action": "submenu", "submenu": "deeper"},
                {"label": "Back", "action": "back"}
            ]
        },
        "deeper": {"menu_items": [{"label": "Back", "action": "back"}]}
    },
    "languages": {"en": {"lo": "low", "hi": "high"}}
}"#;

pub fn sample_config() -> MenuConfig {
    parse_str(PLAY_MENU_JSON, ConfigFormat::Json).unwrap()
}

pub fn sample_model() -> MenuModel {
    MenuModel::from_config(&sample_config()).unwrap()
}

pub fn widgets_model() -> MenuModel {
    MenuModel::from_config(&parse_str(WIDGETS_MENU_JSON, ConfigFormat::Json).unwrap()).unwrap()
}

/// Records every event instead of forwarding it to `log`.
#[derive(Default)]
pub struct CapturingLog {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl CapturingLog {
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(s, m)| *s == severity && m.contains(needle))
    }
}

impl EventLog for CapturingLog {
    fn log(&self, severity: Severity, message: &str) {
        self.entries.borrow_mut().push((severity, message.to_string()));
    }
}

/// In-memory render surface with scripted keys.
///
/// `drawn` holds the text queued since the last `clear`. Once the scripted
/// keys run out `read_key` fails with `UnexpectedEof`.
pub struct FakeSurface {
    pub rows: u16,
    pub cols: u16,
    pub drawn: Vec<(u16, u16, String, TextAttr)>,
    pub frames: usize,
    pub cursor_visible: bool,
    keys: VecDeque<Key>,
}

impl FakeSurface {
    pub fn new(rows: u16, cols: u16, keys: Vec<Key>) -> Self {
        Self {
            rows,
            cols,
            drawn: Vec::new(),
            frames: 0,
            cursor_visible: true,
            keys: keys.into(),
        }
    }

    /// Row and attributes of the first draw whose text is exactly `text`.
    pub fn find(&self, text: &str) -> Option<(u16, TextAttr)> {
        self.drawn
            .iter()
            .find(|(_, _, t, _)| t == text)
            .map(|(row, _, _, attr)| (*row, *attr))
    }
}

impl RenderSurface for FakeSurface {
    fn clear(&mut self) {
        self.drawn.clear();
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str, attr: TextAttr) {
        self.drawn.push((row, col, text.to_string(), attr));
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn dimensions(&self) -> io::Result<(u16, u16)> {
        Ok((self.rows, self.cols))
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }
}
