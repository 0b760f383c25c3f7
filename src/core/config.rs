//! # Configuration
//!
//! Menu definitions arrive from one of three places:
//! a named file → piped standard input → the default file under `~/.termenu/`.
//!
//! Every field is `Option<T>` so a missing required value is reported by the
//! menu model with a precise path instead of a generic deserialization error.
//!
//! The default file is never created implicitly. `write_default_config` is a
//! separate step the CLI runs only when asked (`--init-config`).

use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

// ============================================================================
// Config Structs (all fields Option<T> for sparse input)
// ============================================================================

/// One menu. The root and every submenu share this shape.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MenuConfig {
    pub menu_title: Option<String>,
    pub language: Option<String>,
    pub theme: Option<ThemeConfig>,
    pub menu_items: Option<Vec<MenuItemConfig>>,
    #[serde(default)]
    pub submenus: BTreeMap<String, MenuConfig>,
    #[serde(default)]
    pub languages: HashMap<String, HashMap<String, String>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MenuItemConfig {
    pub label: Option<String>,
    pub action: Option<String>,
    pub submenu: Option<String>,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ThemeConfig {
    pub highlight_color: Option<String>,
    #[serde(alias = "text_color")]
    pub normal_color: Option<String>,
    pub background_color: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Title given to menus synthesized from a plain list of lines.
pub const DYNAMIC_MENU_TITLE: &str = "Dynamic Menu";

const DEFAULT_CONFIG: &str = r#"{
    "menu_title": "Main Menu",
    "language": "en",
    "theme": {
        "highlight_color": "cyan",
        "normal_color": "white",
        "background_color": "black"
    },
    "menu_items": [
        { "label": "Start", "action": "start_task" },
        { "label": "Settings", "action": "submenu", "submenu": "settings" },
        { "label": "Exit", "action": "exit" }
    ],
    "submenus": {
        "settings": {
            "menu_title": "Settings",
            "menu_items": [
                { "label": "Player name", "action": "input" },
                { "label": "Difficulty", "action": "radio", "options": ["easy", "normal", "hard"] },
                { "label": "Features", "action": "checkbox", "options": ["sound", "music", "hints"] },
                { "label": "Favourite color", "action": "multiple_select", "options": ["red", "green", "blue"] },
                { "label": "Back", "action": "back" }
            ]
        }
    },
    "languages": {
        "en": {},
        "fr": {
            "Main Menu": "Menu principal",
            "Start": "Commencer",
            "Settings": "Paramètres",
            "Exit": "Quitter",
            "Back": "Retour"
        }
    }
}
"#;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    /// `write_default_config` never overwrites.
    AlreadyExists(PathBuf),
    /// No file argument, no piped input and no default file.
    NoSource,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Json(e) => write!(f, "config JSON error: {e}"),
            ConfigError::Toml(e) => write!(f, "config TOML error: {e}"),
            ConfigError::AlreadyExists(path) => {
                write!(f, "refusing to overwrite existing config at {}", path.display())
            }
            ConfigError::NoSource => write!(
                f,
                "no configuration given: pass a file, pipe one on stdin, or run with --init-config"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Returns `~/.termenu/menu.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".termenu").join("menu.json"))
}

pub fn parse_str(contents: &str, format: ConfigFormat) -> Result<MenuConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Json => serde_json::from_str(contents)?,
        ConfigFormat::Toml => toml::from_str(contents)?,
    };
    Ok(config)
}

/// Load a menu configuration from a file.
pub fn load_config(path: &Path) -> Result<MenuConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config = parse_str(&contents, ConfigFormat::from_path(path))?;
    info!("Loaded menu configuration from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Interpret piped input.
///
/// Anything that parses as JSON must be a menu configuration. Anything else
/// becomes a "Dynamic Menu" with one no-op item per non-blank line.
pub fn parse_piped(raw: &str) -> Result<MenuConfig, ConfigError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Ok(serde_json::from_value(value)?),
        Err(e) => {
            debug!("Piped input is not JSON ({e}), treating it as a list of labels");
            Ok(menu_from_lines(raw))
        }
    }
}

fn menu_from_lines(raw: &str) -> MenuConfig {
    let items = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| MenuItemConfig {
            label: Some(line.to_string()),
            action: Some("none".to_string()),
            ..Default::default()
        })
        .collect();

    MenuConfig {
        menu_title: Some(DYNAMIC_MENU_TITLE.to_string()),
        menu_items: Some(items),
        ..Default::default()
    }
}

/// Read a whole piped stream on a producer thread and hand the parsed result
/// over a rendezvous channel. Blocks until the producer is done.
pub fn read_piped_config<R>(mut reader: R) -> Result<MenuConfig, ConfigError>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<Result<MenuConfig, ConfigError>>(0);

    let producer = thread::Builder::new()
        .name("config-reader".to_string())
        .spawn(move || {
            debug!("Reading piped configuration");
            let mut raw = String::new();
            let result = reader
                .read_to_string(&mut raw)
                .map_err(ConfigError::from)
                .and_then(|bytes| {
                    debug!("Read {bytes} bytes of piped configuration");
                    parse_piped(&raw)
                });
            if tx.send(result).is_err() {
                warn!("Configuration consumer dropped before handoff");
            }
        })?;

    let result = rx.recv().map_err(|_| {
        ConfigError::Io(io::Error::other(
            "configuration reader exited without a result",
        ))
    })?;

    if producer.join().is_err() {
        warn!("Configuration reader thread panicked after handoff");
    }
    result
}

/// Write the sample configuration to `path`. Never overwrites.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    info!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// The sample configuration `write_default_config` materializes.
pub fn default_config() -> Result<MenuConfig, ConfigError> {
    parse_str(DEFAULT_CONFIG, ConfigFormat::Json)
}
