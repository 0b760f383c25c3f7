//! Screen layout for menus and selection machines.
//!
//! Everything is drawn through `RenderSurface`, so this module only does
//! arithmetic: centering, row placement, which role colors which line.
//!
//! ```text
//! row 0        main > settings                 (breadcrumb)
//!              ...
//! mid - n/2 - 1        Settings                (title, bold)
//! mid - n/2 + 1        Player name             (items, cursor row highlighted)
//!                      Difficulty
//!              ...
//! last row     ↑/↓ move  Enter select          (key hint)
//! ```
//!
//! Lists longer than the screen scroll so the cursor row stays visible.

use std::io;

use unicode_width::UnicodeWidthStr;

use crate::core::selection::Selector;
use crate::core::surface::{RenderSurface, TextAttr};
use crate::core::theme::Theme;

pub const MENU_HINT: &str = "↑/↓ move  Enter select";

/// What the navigator shows while viewing a menu.
pub struct MenuScreen<'a> {
    /// Menu ids from the root to the current menu.
    pub path: Vec<&'a str>,
    pub title: &'a str,
    pub labels: Vec<&'a str>,
    pub selected: usize,
}

/// What the navigator shows while a selection machine is active.
pub struct SelectorScreen<'a> {
    pub path: Vec<&'a str>,
    /// The label of the item that opened the machine.
    pub heading: &'a str,
    /// Option labels, already translated.
    pub options: Vec<&'a str>,
    pub selector: &'a Selector,
}

pub fn draw_menu<S>(surface: &mut S, screen: &MenuScreen<'_>, theme: &Theme) -> io::Result<()>
where
    S: RenderSurface + ?Sized,
{
    surface.set_cursor_visible(false)?;
    surface.clear();
    let (rows, cols) = surface.dimensions()?;
    paint_background(surface, rows, cols, theme);
    draw_breadcrumb(surface, &screen.path, theme);

    let window = ListWindow::new(rows, screen.labels.len(), screen.selected);
    surface.draw_text(
        window.heading_row(),
        centered_col(cols, screen.title),
        screen.title,
        TextAttr::bold(theme.normal),
    );

    for (idx, row) in window.rows() {
        let label = screen.labels[idx];
        let color = if idx == screen.selected {
            theme.highlight
        } else {
            theme.normal
        };
        surface.draw_text(row, centered_col(cols, label), label, TextAttr::plain(color));
    }

    draw_hint(surface, rows, cols, MENU_HINT, theme);
    surface.refresh()
}

pub fn draw_selector<S>(surface: &mut S, screen: &SelectorScreen<'_>, theme: &Theme) -> io::Result<()>
where
    S: RenderSurface + ?Sized,
{
    let is_text = matches!(screen.selector, Selector::Text(_));
    surface.set_cursor_visible(is_text)?;
    surface.clear();
    let (rows, cols) = surface.dimensions()?;
    paint_background(surface, rows, cols, theme);
    draw_breadcrumb(surface, &screen.path, theme);
    draw_hint(surface, rows, cols, selector_hint(screen.selector), theme);

    if let Selector::Text(capture) = screen.selector {
        // Prompt goes last so the caret lands after the echoed text.
        let prompt = format!("{}: ", screen.heading);
        let line = format!("{prompt}{}", capture.buffer());
        surface.draw_text(
            rows / 2,
            centered_col(cols, &prompt),
            &line,
            TextAttr::plain(theme.normal),
        );
        return surface.refresh();
    }

    let cursor = screen.selector.cursor();
    let window = ListWindow::new(rows, screen.options.len(), cursor);
    surface.draw_text(
        window.heading_row(),
        centered_col(cols, screen.heading),
        screen.heading,
        TextAttr::bold(theme.normal),
    );

    for (idx, row) in window.rows() {
        let option = screen.options[idx];
        let text = match screen.selector {
            Selector::Checkbox(group) => {
                let mark = if group.toggled().get(idx).copied().unwrap_or(false) {
                    "[X]"
                } else {
                    "[ ]"
                };
                format!("{mark} {option}")
            }
            Selector::Radio(group) => {
                let mark = if group.selected() == idx { "(O)" } else { "( )" };
                format!("{mark} {option}")
            }
            _ => option.to_string(),
        };
        let color = if idx == cursor {
            theme.highlight
        } else {
            theme.normal
        };
        surface.draw_text(row, centered_col(cols, &text), &text, TextAttr::plain(color));
    }

    surface.refresh()
}

/// The slice of a list that fits between the heading and the hint row.
///
/// Rows 0 (breadcrumb), the heading row and the last row (hint) are
/// reserved, so at most `rows - 4` entries are shown. The window scrolls to
/// keep `selected` visible and is centered vertically when the list is short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListWindow {
    /// Screen row of the first visible entry.
    top: u16,
    /// Index of the first visible entry.
    first: usize,
    visible: usize,
    rows: u16,
}

impl ListWindow {
    fn new(rows: u16, count: usize, selected: usize) -> Self {
        let capacity = usize::from(rows.saturating_sub(4)).max(1);
        let visible = count.min(capacity);
        let first = selected
            .saturating_sub(visible.saturating_sub(1))
            .min(count - visible);
        // visible <= capacity <= u16::MAX
        let half = u16::try_from(visible / 2).unwrap_or(u16::MAX);
        let top = (rows / 2).saturating_sub(half).saturating_add(1);
        Self {
            top,
            first,
            visible,
            rows,
        }
    }

    fn heading_row(&self) -> u16 {
        self.top.saturating_sub(2)
    }

    /// `(entry index, screen row)` for each visible entry that lands on screen.
    fn rows(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        (0..self.visible).filter_map(move |offset| {
            let row = u16::try_from(offset).ok()?.checked_add(self.top)?;
            (row < self.rows).then_some((self.first + offset, row))
        })
    }
}

fn selector_hint(selector: &Selector) -> &'static str {
    match selector {
        Selector::List(_) | Selector::Multi(_) => "↑/↓ move  Enter choose",
        Selector::Checkbox(_) => "↑/↓ move  Enter toggle  Esc done",
        Selector::Radio(_) => "↑/↓ move  Enter select  Esc done",
        Selector::Text(_) => "Enter accept  Backspace erase",
    }
}

fn paint_background<S>(surface: &mut S, rows: u16, cols: u16, theme: &Theme)
where
    S: RenderSurface + ?Sized,
{
    let blank = " ".repeat(cols as usize);
    for row in 0..rows {
        surface.draw_text(row, 0, &blank, TextAttr::plain(theme.background));
    }
}

fn draw_breadcrumb<S>(surface: &mut S, path: &[&str], theme: &Theme)
where
    S: RenderSurface + ?Sized,
{
    if path.len() > 1 {
        surface.draw_text(0, 1, &path.join(" > "), TextAttr::plain(theme.normal));
    }
}

fn draw_hint<S>(surface: &mut S, rows: u16, cols: u16, hint: &str, theme: &Theme)
where
    S: RenderSurface + ?Sized,
{
    if rows > 2 {
        surface.draw_text(rows - 1, centered_col(cols, hint), hint, TextAttr::plain(theme.normal));
    }
}

/// Column that centers `text` in `cols` columns.
pub fn centered_col(cols: u16, text: &str) -> u16 {
    let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    (cols / 2).saturating_sub(width / 2)
}
