//! Theme resolution.
//!
//! Symbolic color names from the configuration are resolved once into
//! `ColorRef` pairs. The provider is immutable after construction and shared
//! by reference with the render path.
//!
//! Roles:
//! - highlight: the cursor row (default cyan on black)
//! - normal: every other line of text (default white on black)
//! - background: the screen fill (default black)

use log::warn;

use crate::core::config::ThemeConfig;

/// The eight basic terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "black" => Some(NamedColor::Black),
            "red" => Some(NamedColor::Red),
            "green" => Some(NamedColor::Green),
            "yellow" => Some(NamedColor::Yellow),
            "blue" => Some(NamedColor::Blue),
            "magenta" => Some(NamedColor::Magenta),
            "cyan" => Some(NamedColor::Cyan),
            "white" => Some(NamedColor::White),
            _ => None,
        }
    }
}

/// Foreground/background pair handed to the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRef {
    pub fg: NamedColor,
    pub bg: NamedColor,
}

impl ColorRef {
    /// White on black. Used for any name that does not resolve.
    pub const FALLBACK: ColorRef = ColorRef {
        fg: NamedColor::White,
        bg: NamedColor::Black,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Highlight,
    Normal,
    Background,
}

impl ColorRole {
    /// Key of this role in the `theme` configuration object.
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Highlight => "highlight_color",
            ColorRole::Normal => "normal_color",
            ColorRole::Background => "background_color",
        }
    }

    fn default_name(self) -> &'static str {
        match self {
            ColorRole::Highlight => "cyan",
            ColorRole::Normal => "white",
            ColorRole::Background => "black",
        }
    }
}

/// Resolve one color name for a role. Unknown names fall back to white on
/// black.
pub fn resolve(role: ColorRole, name: &str) -> ColorRef {
    let Some(color) = NamedColor::parse(name) else {
        warn!("Unknown color '{}' for {}, using white on black", name, role.key());
        return ColorRef::FALLBACK;
    };
    match role {
        ColorRole::Highlight | ColorRole::Normal => ColorRef {
            fg: color,
            bg: NamedColor::Black,
        },
        ColorRole::Background => ColorRef {
            fg: NamedColor::White,
            bg: color,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub highlight: ColorRef,
    pub normal: ColorRef,
    pub background: ColorRef,
}

#[derive(Debug, Clone)]
pub struct ThemeProvider {
    theme: Theme,
}

impl ThemeProvider {
    pub fn new(config: Option<&ThemeConfig>) -> Self {
        let name_for = |role: ColorRole| -> String {
            let configured = config.and_then(|c| match role {
                ColorRole::Highlight => c.highlight_color.clone(),
                ColorRole::Normal => c.normal_color.clone(),
                ColorRole::Background => c.background_color.clone(),
            });
            configured.unwrap_or_else(|| role.default_name().to_string())
        };

        let theme = Theme {
            highlight: resolve(ColorRole::Highlight, &name_for(ColorRole::Highlight)),
            normal: resolve(ColorRole::Normal, &name_for(ColorRole::Normal)),
            background: resolve(ColorRole::Background, &name_for(ColorRole::Background)),
        };
        Self { theme }
    }

    pub fn resolve(&self, role: ColorRole) -> ColorRef {
        match role {
            ColorRole::Highlight => self.theme.highlight,
            ColorRole::Normal => self.theme.normal,
            ColorRole::Background => self.theme.background,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let provider = ThemeProvider::default();
        assert_eq!(provider.resolve(ColorRole::Highlight).fg, NamedColor::Cyan);
        assert_eq!(provider.resolve(ColorRole::Normal), ColorRef::FALLBACK);
        assert_eq!(provider.resolve(ColorRole::Background).bg, NamedColor::Black);
    }

    #[test]
    fn test_configured_names() {
        let config = ThemeConfig {
            highlight_color: Some("Yellow".to_string()),
            normal_color: Some("green".to_string()),
            background_color: Some("blue".to_string()),
        };
        let theme = *ThemeProvider::new(Some(&config)).theme();
        assert_eq!(theme.highlight, ColorRef { fg: NamedColor::Yellow, bg: NamedColor::Black });
        assert_eq!(theme.normal, ColorRef { fg: NamedColor::Green, bg: NamedColor::Black });
        assert_eq!(theme.background, ColorRef { fg: NamedColor::White, bg: NamedColor::Blue });
    }

    #[test]
    fn test_unknown_name_falls_back_to_white_on_black() {
        assert_eq!(resolve(ColorRole::Highlight, "chartreuse"), ColorRef::FALLBACK);
        assert_eq!(resolve(ColorRole::Background, ""), ColorRef::FALLBACK);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = ThemeConfig {
            highlight_color: Some("red".to_string()),
            ..Default::default()
        };
        let provider = ThemeProvider::new(Some(&config));
        assert_eq!(provider.resolve(ColorRole::Highlight).fg, NamedColor::Red);
        assert_eq!(provider.resolve(ColorRole::Normal).fg, NamedColor::White);
    }

    #[test]
    fn test_role_keys() {
        assert_eq!(ColorRole::Highlight.key(), "highlight_color");
        assert_eq!(ColorRole::Normal.key(), "normal_color");
        assert_eq!(ColorRole::Background.key(), "background_color");
    }
}
