//! # Menu Model
//!
//! The immutable menu tree. Built once from a parsed `MenuConfig`, read-only
//! afterwards.
//!
//! ```text
//! MenuModel
//! ├── menus: HashMap<id, MenuNode>   // "main" + every declared submenu
//! ├── default_title: String          // used when a submenu has no title
//! └── translator: Translator         // label lookup for the active language
//! ```
//!
//! Submenus live in one flat id namespace no matter how deeply they were
//! nested in the configuration. Cycles between menus are allowed: only the
//! navigation history walks the graph, never the model.

use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

use crate::core::action::ActionKind;
use crate::core::config::{MenuConfig, MenuItemConfig};

/// Reserved id of the root menu.
pub const ROOT_MENU_ID: &str = "main";
pub const DEFAULT_TITLE: &str = "Menu";
pub const DEFAULT_LANGUAGE: &str = "en";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A menu id that was never registered.
    UnknownMenu(String),
    /// `Back` with nothing to go back to.
    HistoryUnderflow,
    /// Required field missing or inconsistent. Carries a description with the
    /// offending path.
    MalformedConfiguration(String),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::UnknownMenu(id) => write!(f, "unknown menu '{id}'"),
            MenuError::HistoryUnderflow => write!(f, "cannot go back: already at the root menu"),
            MenuError::MalformedConfiguration(msg) => write!(f, "malformed configuration: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {}

fn malformed(msg: impl Into<String>) -> MenuError {
    MenuError::MalformedConfiguration(msg.into())
}

// ============================================================================
// Menu Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: ActionKind,
    /// Target of a `Submenu` action. Always registered when present.
    pub submenu_id: Option<String>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: String,
    pub title: Option<String>,
    /// Never empty.
    pub items: Vec<MenuItem>,
}

/// Label lookup for one language. Keys without a translation map to
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    language: String,
    table: HashMap<String, String>,
}

impl Translator {
    pub fn new(language: &str, languages: &HashMap<String, HashMap<String, String>>) -> Self {
        let table = languages.get(language).cloned().unwrap_or_default();
        if !languages.is_empty() && !languages.contains_key(language) {
            warn!("No translations for language '{language}', showing labels as written");
        }
        Self {
            language: language.to_string(),
            table,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[derive(Debug, Clone)]
pub struct MenuModel {
    menus: HashMap<String, MenuNode>,
    default_title: String,
    translator: Translator,
}

impl MenuModel {
    /// Build the model using the configured language.
    pub fn from_config(config: &MenuConfig) -> Result<Self, MenuError> {
        Self::with_language(config, None)
    }

    /// Build the model, letting `language` override the configured one.
    pub fn with_language(config: &MenuConfig, language: Option<&str>) -> Result<Self, MenuError> {
        if config.menu_title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(malformed("menu_title is required"));
        }

        let mut menus = HashMap::new();
        register(&mut menus, ROOT_MENU_ID, config, "")?;
        check_submenu_targets(&menus)?;

        let language = language
            .or(config.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE);
        let translator = Translator::new(language, &config.languages);

        debug!(
            "Menu model built: {} menus, language '{}'",
            menus.len(),
            translator.language()
        );

        Ok(Self {
            menus,
            default_title: DEFAULT_TITLE.to_string(),
            translator,
        })
    }

    /// Title of a registered menu, or the default title if it declares none.
    pub fn title_of(&self, menu_id: &str) -> Result<&str, MenuError> {
        let node = self.node(menu_id)?;
        Ok(node.title.as_deref().unwrap_or(&self.default_title))
    }

    pub fn items_of(&self, menu_id: &str) -> Result<&[MenuItem], MenuError> {
        Ok(&self.node(menu_id)?.items)
    }

    pub fn node(&self, menu_id: &str) -> Result<&MenuNode, MenuError> {
        self.menus
            .get(menu_id)
            .ok_or_else(|| MenuError::UnknownMenu(menu_id.to_string()))
    }

    pub fn contains(&self, menu_id: &str) -> bool {
        self.menus.contains_key(menu_id)
    }

    /// All registered ids, sorted.
    pub fn menu_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.menus.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Translated text for a label or title.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.translator.text(key)
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Register `config` under `id`, then every submenu it declares.
fn register(
    menus: &mut HashMap<String, MenuNode>,
    id: &str,
    config: &MenuConfig,
    path: &str,
) -> Result<(), MenuError> {
    if menus.contains_key(id) {
        return Err(malformed(format!("duplicate menu id '{id}' at {path}")));
    }

    let items_cfg = config
        .menu_items
        .as_ref()
        .ok_or_else(|| malformed(format!("{path}menu_items is required")))?;
    if items_cfg.is_empty() {
        return Err(malformed(format!("{path}menu_items must not be empty")));
    }

    let items = items_cfg
        .iter()
        .enumerate()
        .map(|(i, item)| build_item(item, &format!("{path}menu_items[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    menus.insert(
        id.to_string(),
        MenuNode {
            id: id.to_string(),
            title: config.menu_title.clone(),
            items,
        },
    );

    for (sub_id, sub_config) in &config.submenus {
        if sub_id == ROOT_MENU_ID {
            return Err(malformed(format!(
                "{path}submenus.{sub_id}: '{ROOT_MENU_ID}' is reserved for the root menu"
            )));
        }
        register(menus, sub_id, sub_config, &format!("{path}submenus.{sub_id}."))?;
    }
    Ok(())
}

fn build_item(item: &MenuItemConfig, path: &str) -> Result<MenuItem, MenuError> {
    let label = item
        .label
        .clone()
        .ok_or_else(|| malformed(format!("{path}.label is required")))?;
    let raw_action = item
        .action
        .as_deref()
        .ok_or_else(|| malformed(format!("{path}.action is required")))?;
    let action = ActionKind::parse(raw_action);
    let options = item.options.clone().unwrap_or_default();

    if action == ActionKind::Submenu && item.submenu.is_none() {
        return Err(malformed(format!("{path}.submenu is required for a submenu action")));
    }

    if action.needs_options() && options.is_empty() {
        match action {
            ActionKind::Checkbox | ActionKind::Radio => {
                warn!("{path} ('{label}') is a {action} item without options, it will show an empty list");
            }
            _ => {
                return Err(malformed(format!("{path}.options must not be empty for a {action} item")));
            }
        }
    }

    if let ActionKind::Unknown(raw) = &action {
        warn!("{path} ('{label}') has unsupported action '{raw}', it will do nothing");
    }

    Ok(MenuItem {
        label,
        action,
        submenu_id: item.submenu.clone(),
        options,
    })
}

fn check_submenu_targets(menus: &HashMap<String, MenuNode>) -> Result<(), MenuError> {
    for node in menus.values() {
        for item in &node.items {
            if item.action != ActionKind::Submenu {
                continue;
            }
            if let Some(target) = &item.submenu_id
                && !menus.contains_key(target)
            {
                return Err(MenuError::UnknownMenu(target.clone()));
            }
        }
    }
    Ok(())
}
