use std::cell::RefCell;
use std::collections::VecDeque;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use termenu::core::config::{ConfigFormat, parse_piped, parse_str};
use termenu::core::input::Key;
use termenu::core::menu::MenuModel;
use termenu::core::navigation::RunError;
use termenu::core::surface::{EventLog, Severity};
use termenu::core::theme::ThemeProvider;
use termenu::tui::run_on;
use termenu::tui::surface::TerminalSurface;

// ============================================================================
// Helper Functions
// ============================================================================

const PLAY_MENU: &str = r#"{
    "menu_title": "Main",
    "menu_items": [
        {"label": "Play", "action": "submenu", "submenu": "play"},
        {"label": "Quit", "action": "exit"}
    ],
    "submenus": {
        "play": {"menu_title": "Play Menu", "menu_items": [{"label": "Back", "action": "back"}]}
    }
}"#;

const FORM_MENU: &str = r#"
menu_title = "Form"
language = "fr"

[theme]
highlight_color = "yellow"
background_color = "blue"

[[menu_items]]
label = "Name"
action = "text_input"

[[menu_items]]
label = "Colour"
action = "multi_select"
options = ["red", "green", "blue"]

[[menu_items]]
label = "Quit"
action = "quit"

[languages.fr]
Name = "Nom"
green = "vert"
"#;

#[derive(Default)]
struct RecordingLog {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl RecordingLog {
    fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(s, m)| *s == severity && m.contains(needle))
    }
}

impl EventLog for RecordingLog {
    fn log(&self, severity: Severity, message: &str) {
        self.entries.borrow_mut().push((severity, message.to_string()));
    }
}

type Surface = TerminalSurface<TestBackend, VecDeque<Key>>;

/// Runs `keys` against `config` on a 40x12 test terminal.
fn run_script(
    config: &termenu::core::config::MenuConfig,
    keys: Vec<Key>,
    log: &RecordingLog,
) -> Result<Surface, RunError> {
    let model = MenuModel::from_config(config).unwrap();
    let theme = ThemeProvider::new(config.theme.as_ref());
    let terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    run_on(terminal, VecDeque::from(keys), &model, &theme, log)
}

fn screen_rows(surface: &Surface) -> Vec<String> {
    let buffer = surface.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn screen_contains(surface: &Surface, text: &str) -> bool {
    screen_rows(surface).iter().any(|row| row.contains(text))
}

/// Column and row of the first cell of `text`.
fn locate(surface: &Surface, text: &str) -> Option<(u16, u16)> {
    screen_rows(surface).iter().enumerate().find_map(|(y, row)| {
        row.find(text)
            .map(|byte| (row[..byte].chars().count() as u16, y as u16))
    })
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_play_then_back_returns_to_main() {
    let config = parse_str(PLAY_MENU, ConfigFormat::Json).unwrap();
    let log = RecordingLog::default();

    let surface = run_script(
        &config,
        vec![Key::Down, Key::Up, Key::Confirm, Key::Confirm, Key::Interrupt],
        &log,
    )
    .unwrap();

    assert!(screen_contains(&surface, "Main"));
    assert!(screen_contains(&surface, "Quit"));
    assert!(!screen_contains(&surface, "Play Menu"));
    assert!(!screen_contains(&surface, "main > play"));

    let (x, y) = locate(&surface, "Play").unwrap();
    assert_eq!(surface.backend().buffer()[(x, y)].fg, Color::Cyan);
}

#[test]
fn test_submenu_shows_breadcrumb_and_title() {
    let config = parse_str(PLAY_MENU, ConfigFormat::Json).unwrap();
    let log = RecordingLog::default();

    let surface = run_script(&config, vec![Key::Confirm, Key::Interrupt], &log).unwrap();

    assert!(screen_contains(&surface, "main > play"));
    assert!(screen_contains(&surface, "Play Menu"));
    assert!(screen_contains(&surface, "Back"));
}

#[test]
fn test_back_on_root_is_reported_and_loop_continues() {
    let config = parse_str(
        r#"{"menu_title": "Root", "menu_items": [
            {"label": "Back", "action": "back"},
            {"label": "Quit", "action": "exit"}
        ]}"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let log = RecordingLog::default();

    let result = run_script(&config, vec![Key::Confirm, Key::Down, Key::Confirm], &log);

    assert!(result.is_ok());
    assert!(log.contains(Severity::Error, "no previous menu"));
    assert!(log.contains(Severity::Info, "Exit selected"));
}

#[test]
fn test_text_input_echoes_and_completes() {
    let config = parse_str(FORM_MENU, ConfigFormat::Toml).unwrap();
    let log = RecordingLog::default();

    let surface = run_script(
        &config,
        vec![Key::Confirm, Key::Char('A'), Key::Char('B'), Key::Interrupt],
        &log,
    )
    .unwrap();
    assert!(screen_contains(&surface, "Nom: AB"));

    let log = RecordingLog::default();
    let keys = vec![
        Key::Confirm,
        Key::Char('A'),
        Key::Char('B'),
        Key::Char('X'),
        Key::Backspace,
        Key::Char('C'),
        Key::Confirm,
        Key::Interrupt,
    ];
    let surface = run_script(&config, keys, &log).unwrap();
    assert!(log.contains(Severity::Info, "Name: Text(\"ABC\")"));
    assert!(screen_contains(&surface, "Form"));
}

#[test]
fn test_multi_select_returns_green_with_translated_option() {
    let config = parse_str(FORM_MENU, ConfigFormat::Toml).unwrap();
    let log = RecordingLog::default();

    let surface = run_script(
        &config,
        vec![Key::Down, Key::Confirm, Key::Down, Key::Interrupt],
        &log,
    )
    .unwrap();
    let (x, y) = locate(&surface, "vert").unwrap();
    let cell = &surface.backend().buffer()[(x, y)];
    assert_eq!(cell.fg, Color::Yellow);

    let log = RecordingLog::default();
    run_script(
        &config,
        vec![Key::Down, Key::Confirm, Key::Down, Key::Confirm, Key::Interrupt],
        &log,
    )
    .unwrap();
    assert!(log.contains(Severity::Info, "Colour: MultiChosen([\"green\"])"));
}

#[test]
fn test_piped_lines_become_dynamic_menu() {
    let config = parse_piped("first\n\n  second  \n").unwrap();
    let log = RecordingLog::default();

    let surface = run_script(&config, vec![Key::Down, Key::Confirm, Key::Interrupt], &log).unwrap();

    assert!(screen_contains(&surface, "Dynamic Menu"));
    assert!(screen_contains(&surface, "first"));
    assert!(screen_contains(&surface, "second"));
}

#[test]
fn test_exhausted_key_script_is_an_io_error() {
    let config = parse_str(PLAY_MENU, ConfigFormat::Json).unwrap();
    let log = RecordingLog::default();

    let result = run_script(&config, vec![Key::Down], &log);

    assert!(matches!(result, Err(RunError::Io(_))));
}
