//! # Navigation Controller
//!
//! Owns where the user is and drives the render → read key → transition loop.
//!
//! ```text
//!            Up/Down, Submenu, Back, StartTask, None
//!               ┌──────────┐
//!               ▼          │
//!  start ──► Viewing ──────┘
//!               │  ▲
//!  interactive  │  │ selection result
//!  item         ▼  │
//!          Delegated(kind)
//!               │
//!  Exit / Ctrl+C (from either state)
//!               ▼
//!            Exiting
//! ```
//!
//! `NavigationState` is only ever mutated here, and `selected_index` is
//! clamped to the current menu on every mutation. Rendering is skipped while
//! `needs_redraw` is false.

use std::fmt;
use std::io;

use crate::core::action::ActionKind;
use crate::core::input::Key;
use crate::core::menu::{MenuError, MenuItem, MenuModel, ROOT_MENU_ID};
use crate::core::render::{self, MenuScreen, SelectorScreen};
use crate::core::selection::{SelectionMachine, SelectionResult, Selector};
use crate::core::surface::{EventLog, RenderSurface, Severity};
use crate::core::theme::ThemeProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current_menu_id: String,
    pub selected_index: usize,
    /// Menu ids entered through `Submenu`, most recent last.
    pub history: Vec<String>,
    pub needs_redraw: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            current_menu_id: ROOT_MENU_ID.to_string(),
            selected_index: 0,
            history: Vec::new(),
            needs_redraw: true,
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum Mode {
    Viewing,
    /// A selection machine owns the keyboard until it yields a result.
    Delegated {
        kind: ActionKind,
        label: String,
        selector: Selector,
    },
    Exiting,
}

impl Mode {
    fn name(&self) -> String {
        match self {
            Mode::Viewing => "Viewing".to_string(),
            Mode::Delegated { kind, .. } => format!("Delegated({kind})"),
            Mode::Exiting => "Exiting".to_string(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum RunError {
    Io(io::Error),
    Menu(MenuError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Io(e) => write!(f, "terminal error: {e}"),
            RunError::Menu(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

impl From<MenuError> for RunError {
    fn from(e: MenuError) -> Self {
        RunError::Menu(e)
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct NavigationController<'a> {
    model: &'a MenuModel,
    theme: &'a ThemeProvider,
    log: &'a dyn EventLog,
    state: NavigationState,
    mode: Mode,
}

impl<'a> NavigationController<'a> {
    pub fn new(model: &'a MenuModel, theme: &'a ThemeProvider, log: &'a dyn EventLog) -> Self {
        log.log(Severity::Debug, "Navigator created on menu 'main'");
        Self {
            model,
            theme,
            log,
            state: NavigationState::new(),
            mode: Mode::Viewing,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self.mode, Mode::Exiting)
    }

    /// Feed one key. Returns the result of a selection machine when this key
    /// completed one.
    ///
    /// On error the state is left exactly as it was before the key.
    pub fn handle_key(&mut self, key: Key) -> Result<Option<SelectionResult>, MenuError> {
        self.debug(format!("Handling {:?} in {}", key, self.mode.name()));

        match key {
            Key::Interrupt => {
                self.info("Interrupted, exiting");
                self.mode = Mode::Exiting;
                return Ok(None);
            }
            Key::Resize => {
                self.state.needs_redraw = true;
                return Ok(None);
            }
            _ => {}
        }

        match self.mode {
            Mode::Viewing => {
                self.handle_viewing(key)?;
                Ok(None)
            }
            Mode::Delegated { .. } => Ok(self.handle_delegated(key)),
            Mode::Exiting => Ok(None),
        }
    }

    fn handle_viewing(&mut self, key: Key) -> Result<(), MenuError> {
        match key {
            Key::Up | Key::Down => self.move_cursor(key),
            Key::Confirm => self.confirm(),
            _ => Ok(()),
        }
    }

    fn current_items(&self) -> Result<&'a [MenuItem], MenuError> {
        let model: &'a MenuModel = self.model;
        model.items_of(&self.state.current_menu_id)
    }

    fn move_cursor(&mut self, key: Key) -> Result<(), MenuError> {
        let len = self.current_items()?.len();
        let before = self.state.selected_index;
        let after = match key {
            Key::Up => before.saturating_sub(1),
            Key::Down => (before + 1).min(len.saturating_sub(1)),
            _ => before,
        };
        if after != before {
            self.state.selected_index = after;
            self.state.needs_redraw = true;
            self.debug(format!("Cursor {before} -> {after}"));
        }
        Ok(())
    }

    fn confirm(&mut self) -> Result<(), MenuError> {
        let items = self.current_items()?;
        let Some(item) = items.get(self.state.selected_index) else {
            return Ok(());
        };
        self.debug(format!("Dispatching {} for '{}'", item.action, item.label));

        match &item.action {
            ActionKind::StartTask => {
                self.info(format!("Starting task '{}'", item.label));
            }
            ActionKind::Exit => {
                self.info("Exit selected");
                self.mode = Mode::Exiting;
            }
            ActionKind::Submenu => {
                let target = item.submenu_id.as_deref().ok_or_else(|| {
                    MenuError::MalformedConfiguration(format!(
                        "item '{}' has no submenu id",
                        item.label
                    ))
                })?;
                self.enter_submenu(target)?;
            }
            ActionKind::Back => self.go_back()?,
            ActionKind::None => {
                self.debug(format!("'{}' has no action", item.label));
            }
            ActionKind::Unknown(raw) => {
                self.debug(format!("'{}' has unsupported action '{raw}', ignored", item.label));
            }
            kind => {
                if kind.is_interactive()
                    && let Some(selector) = Selector::for_item(item)
                {
                    self.debug(format!("Entering Delegated({kind}) for '{}'", item.label));
                    self.mode = Mode::Delegated {
                        kind: kind.clone(),
                        label: item.label.clone(),
                        selector,
                    };
                    self.state.needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    fn enter_submenu(&mut self, target: &str) -> Result<(), MenuError> {
        if !self.model.contains(target) {
            return Err(MenuError::UnknownMenu(target.to_string()));
        }
        let previous = std::mem::replace(&mut self.state.current_menu_id, target.to_string());
        self.state.history.push(previous);
        self.state.selected_index = 0;
        self.state.needs_redraw = true;
        self.debug(format!(
            "Entered submenu '{target}' (history depth {})",
            self.state.history.len()
        ));
        Ok(())
    }

    fn go_back(&mut self) -> Result<(), MenuError> {
        let previous = self
            .state
            .history
            .last()
            .ok_or(MenuError::HistoryUnderflow)?;
        if !self.model.contains(previous) {
            return Err(MenuError::UnknownMenu(previous.clone()));
        }
        if let Some(previous) = self.state.history.pop() {
            self.state.current_menu_id = previous;
        }
        self.state.selected_index = 0;
        self.state.needs_redraw = true;
        self.debug(format!(
            "Back to '{}' (history depth {})",
            self.state.current_menu_id,
            self.state.history.len()
        ));
        Ok(())
    }

    fn handle_delegated(&mut self, key: Key) -> Option<SelectionResult> {
        let Mode::Delegated { selector, .. } = &mut self.mode else {
            return None;
        };
        let result = selector.handle_key(key);
        self.state.needs_redraw = true;

        let result = result?;
        if let Mode::Delegated { kind, label, .. } = std::mem::replace(&mut self.mode, Mode::Viewing) {
            self.info(format!("{label}: {result:?}"));
            self.debug(format!("Leaving Delegated({kind})"));
        }
        Some(result)
    }

    /// Draw the current screen if anything changed. Returns true if it drew.
    pub fn render<S>(&mut self, surface: &mut S) -> Result<bool, RunError>
    where
        S: RenderSurface + ?Sized,
    {
        if !self.state.needs_redraw {
            return Ok(false);
        }

        let model = self.model;
        let theme = self.theme.theme();
        let path: Vec<&str> = self
            .state
            .history
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.state.current_menu_id.as_str()))
            .collect();

        match &self.mode {
            Mode::Delegated { label, selector, .. } => {
                let screen = SelectorScreen {
                    path,
                    heading: model.label(label),
                    options: selector.options().iter().map(|o| model.label(o)).collect(),
                    selector,
                };
                render::draw_selector(surface, &screen, theme)?;
            }
            Mode::Viewing | Mode::Exiting => {
                let menu_id = self.state.current_menu_id.as_str();
                let screen = MenuScreen {
                    path,
                    title: model.label(model.title_of(menu_id)?),
                    labels: model
                        .items_of(menu_id)?
                        .iter()
                        .map(|item| model.label(&item.label))
                        .collect(),
                    selected: self.state.selected_index,
                };
                render::draw_menu(surface, &screen, theme)?;
            }
        }

        self.state.needs_redraw = false;
        Ok(true)
    }

    /// Render, block for a key, transition, repeat until `Exiting`.
    ///
    /// `HistoryUnderflow` is reported and the loop carries on. Any other
    /// navigation error ends the loop.
    pub fn run<S>(&mut self, surface: &mut S) -> Result<(), RunError>
    where
        S: RenderSurface + ?Sized,
    {
        self.debug("Entering navigation loop".to_string());
        while !self.is_exiting() {
            self.render(surface)?;
            let key = surface.read_key()?;
            match self.handle_key(key) {
                Ok(_) => {}
                Err(MenuError::HistoryUnderflow) => {
                    self.log.log(
                        Severity::Error,
                        "Back on the root menu: there is no previous menu",
                    );
                }
                Err(e) => {
                    self.log.log(Severity::Critical, &format!("Navigation aborted: {e}"));
                    return Err(e.into());
                }
            }
        }
        self.debug("Leaving navigation loop".to_string());
        Ok(())
    }

    fn debug(&self, message: String) {
        self.log.log(Severity::Debug, &message);
    }

    fn info(&self, message: impl AsRef<str>) {
        self.log.log(Severity::Info, message.as_ref());
    }
}
