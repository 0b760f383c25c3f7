use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use termenu::core::config::{self, ConfigError, MenuConfig};
use termenu::core::menu::MenuModel;
use termenu::core::surface::LogFacade;
use termenu::core::theme::ThemeProvider;
use termenu::tui;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "termenu", about = "Configurable terminal menu navigator")]
struct Args {
    /// Menu configuration file (.json or .toml). Without it, piped stdin or
    /// ~/.termenu/menu.json is used.
    config: Option<PathBuf>,

    /// Language for labels, overriding the configuration's `language`
    #[arg(short, long)]
    language: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Write the sample configuration (to CONFIG or the default path) and exit
    #[arg(long)]
    init_config: bool,

    /// Log file path
    #[arg(long, default_value = "termenu.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level.into(), log_config, log_file);
    }

    log::info!("termenu starting up");

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{message}");
            eprintln!("termenu: {message}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), String> {
    if args.init_config {
        let path = args
            .config
            .clone()
            .or_else(config::default_config_path)
            .ok_or("could not determine a home directory for the default config")?;
        config::write_default_config(&path).map_err(|e| e.to_string())?;
        println!("Wrote sample configuration to {}", path.display());
        return Ok(());
    }

    let menu_config = load_source(args).map_err(|e| e.to_string())?;
    let model = MenuModel::with_language(&menu_config, args.language.as_deref())
        .map_err(|e| format!("invalid configuration: {e}"))?;
    let theme = ThemeProvider::new(menu_config.theme.as_ref());

    if args.check {
        let ids = model.menu_ids();
        println!(
            "Configuration OK: {} menu(s) ({}), language '{}'",
            ids.len(),
            ids.join(", "),
            model.translator().language()
        );
        return Ok(());
    }

    tui::run(&model, &theme, &LogFacade).map_err(|e| e.to_string())?;
    log::info!("termenu exiting");
    Ok(())
}

fn load_source(args: &Args) -> Result<MenuConfig, ConfigError> {
    if let Some(path) = &args.config {
        log::info!("Loading configuration from {}", path.display());
        return config::load_config(path);
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        log::info!("Reading piped configuration from stdin");
        return config::read_piped_config(stdin);
    }

    match config::default_config_path() {
        Some(path) if path.exists() => {
            log::info!("Loading default configuration from {}", path.display());
            config::load_config(&path)
        }
        _ => Err(ConfigError::NoSource),
    }
}
