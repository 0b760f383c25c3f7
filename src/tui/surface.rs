//! `RenderSurface` backed by a ratatui `Terminal`.
//!
//! Draw calls are queued and painted in a single `terminal.draw()` on
//! `refresh()`, so ratatui's diffing still only touches changed cells. Any
//! backend works: `CrosstermBackend` for the real terminal, `TestBackend` in
//! tests.

use std::io;

use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::core::input::Key;
use crate::core::surface::{RenderSurface, TextAttr};
use crate::core::theme::NamedColor;
use crate::tui::event::KeySource;

struct QueuedText {
    row: u16,
    col: u16,
    text: String,
    attr: TextAttr,
}

pub struct TerminalSurface<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    queued: Vec<QueuedText>,
    cursor_visible: bool,
}

impl<B: Backend, K: KeySource> TerminalSurface<B, K> {
    pub fn new(terminal: Terminal<B>, keys: K) -> Self {
        Self {
            terminal,
            keys,
            queued: Vec::new(),
            cursor_visible: false,
        }
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

fn to_color(color: NamedColor) -> Color {
    match color {
        NamedColor::Black => Color::Black,
        NamedColor::Red => Color::Red,
        NamedColor::Green => Color::Green,
        NamedColor::Yellow => Color::Yellow,
        NamedColor::Blue => Color::Blue,
        NamedColor::Magenta => Color::Magenta,
        NamedColor::Cyan => Color::Cyan,
        NamedColor::White => Color::White,
    }
}

pub fn to_style(attr: TextAttr) -> Style {
    let style = Style::new()
        .fg(to_color(attr.color.fg))
        .bg(to_color(attr.color.bg));
    if attr.bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn backend_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::other(e.to_string())
}

impl<B: Backend, K: KeySource> RenderSurface for TerminalSurface<B, K> {
    fn clear(&mut self) {
        self.queued.clear();
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str, attr: TextAttr) {
        self.queued.push(QueuedText {
            row,
            col,
            text: text.to_string(),
            attr,
        });
    }

    fn refresh(&mut self) -> io::Result<()> {
        let queued = std::mem::take(&mut self.queued);
        let cursor_visible = self.cursor_visible;

        self.terminal
            .draw(|frame| {
                let area = frame.area();
                let mut caret = None;
                for item in &queued {
                    if item.row >= area.height || item.col >= area.width {
                        continue;
                    }
                    let rect = Rect::new(
                        area.x + item.col,
                        area.y + item.row,
                        area.width - item.col,
                        1,
                    );
                    frame.render_widget(Span::styled(item.text.as_str(), to_style(item.attr)), rect);

                    let width = u16::try_from(item.text.width()).unwrap_or(u16::MAX);
                    let end = item.col.saturating_add(width).min(area.width - 1);
                    caret = Some((area.x + end, area.y + item.row));
                }
                // The caret follows the last text drawn: the echoed input.
                if cursor_visible && let Some(position) = caret {
                    frame.set_cursor_position(position);
                }
            })
            .map_err(backend_error)?;
        Ok(())
    }

    fn dimensions(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size().map_err(backend_error)?;
        Ok((size.height, size.width))
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys.next_key()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        if visible {
            self.terminal.show_cursor().map_err(backend_error)
        } else {
            self.terminal.hide_cursor().map_err(backend_error)
        }
    }
}
