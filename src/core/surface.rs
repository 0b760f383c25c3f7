//! Capabilities the navigator consumes but never implements itself.
//!
//! - `RenderSurface`: a character grid plus a blocking key source. The TUI
//!   adapter backs it with ratatui; tests back it with a recording fake.
//! - `EventLog`: where the navigator reports transitions. `LogFacade`
//!   forwards to the `log` crate; tests capture into a vector.

use std::io;

use crate::core::input::Key;
use crate::core::theme::ColorRef;

/// Display attributes for one run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAttr {
    pub color: ColorRef,
    pub bold: bool,
}

impl TextAttr {
    pub fn plain(color: ColorRef) -> Self {
        Self { color, bold: false }
    }

    pub fn bold(color: ColorRef) -> Self {
        Self { color, bold: true }
    }
}

pub trait RenderSurface {
    /// Forget everything drawn since the last refresh.
    fn clear(&mut self);

    /// Queue `text` at (`row`, `col`). Text past the right edge is clipped.
    fn draw_text(&mut self, row: u16, col: u16, text: &str, attr: TextAttr);

    /// Push queued text to the screen.
    fn refresh(&mut self) -> io::Result<()>;

    /// (rows, cols)
    fn dimensions(&self) -> io::Result<(u16, u16)>;

    /// Block until the next symbolic key.
    fn read_key(&mut self) -> io::Result<Key>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

pub trait EventLog {
    fn log(&self, severity: Severity, message: &str);
}

/// Forwards navigator events to the global `log` logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl EventLog for LogFacade {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => log::debug!("{message}"),
            Severity::Info => log::info!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
            Severity::Critical => log::error!("CRITICAL: {message}"),
        }
    }
}
