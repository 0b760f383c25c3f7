//! # TUI Adapter
//!
//! The ratatui-specific layer. Turns crossterm key events into `core::input::Key`
//! values and paints `RenderSurface` draw calls through a ratatui `Terminal`.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! navigation loop itself lives in `core::navigation`; this module only
//! provides the surface it runs against.
//!
//! ## Terminal lifetime
//!
//! `ratatui::init()` enters the alternate screen and raw mode and installs a
//! panic hook that restores the terminal. `TerminalModeGuard` restores it on
//! every other way out of `run`, including `?` early returns.

pub mod event;
pub mod surface;

use log::info;
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::core::menu::MenuModel;
use crate::core::navigation::{NavigationController, RunError};
use crate::core::surface::EventLog;
use crate::core::theme::ThemeProvider;
use crate::tui::event::{CrosstermKeys, KeySource};
use crate::tui::surface::TerminalSurface;

struct TerminalModeGuard;

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        ratatui::restore();
        info!("Terminal restored");
    }
}

/// Run the navigator on the real terminal until the user exits.
pub fn run(model: &MenuModel, theme: &ThemeProvider, log: &dyn EventLog) -> Result<(), RunError> {
    let terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard;
    info!("Terminal initialized, menus: {}", model.menu_ids().join(", "));

    run_on(terminal, CrosstermKeys, model, theme, log)?;
    Ok(())
}

/// Run the navigator against any backend and key source.
///
/// `run` uses this with crossterm; headless callers pass a `TestBackend` and a
/// scripted `VecDeque<Key>`. Returns the surface so callers can inspect what
/// was last painted.
pub fn run_on<B, K>(
    terminal: Terminal<B>,
    keys: K,
    model: &MenuModel,
    theme: &ThemeProvider,
    log: &dyn EventLog,
) -> Result<TerminalSurface<B, K>, RunError>
where
    B: Backend,
    K: KeySource,
{
    let mut surface = TerminalSurface::new(terminal, keys);
    let mut controller = NavigationController::new(model, theme, log);
    controller.run(&mut surface)?;
    Ok(surface)
}
