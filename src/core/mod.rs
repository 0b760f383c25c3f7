//! # Core Menu Logic
//!
//! Everything termenu knows about menus, and nothing about terminals.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │                              │
//!   config ────────► │  MenuModel     ThemeProvider │
//!                    │        │            │        │
//!                    │        ▼            ▼        │
//!                    │   NavigationController       │
//!                    │        │      ▲              │
//!                    │        ▼      │ Key          │
//!                    │   selection machines         │
//!                    └────────┬──────┴──────────────┘
//!                             │ RenderSurface / EventLog
//!                    ┌────────┴─────────┐
//!                    │   TUI adapter    │
//!                    │ (ratatui, xterm) │
//!                    └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: configuration structs, loading, piped input, defaults
//! - [`menu`]: the immutable menu tree and label translation
//! - [`action`]: the `ActionKind` enum parsed from action strings
//! - [`theme`]: color names resolved to `ColorRef` pairs
//! - [`input`]: the symbolic key alphabet
//! - [`selection`]: per-item selection machines
//! - [`navigation`]: the controller state machine and its loop
//! - [`render`]: screen layout onto a `RenderSurface`
//! - [`surface`]: the render-surface and logger capabilities

pub mod action;
pub mod config;
pub mod input;
pub mod menu;
pub mod navigation;
pub mod render;
pub mod selection;
pub mod surface;
pub mod theme;
