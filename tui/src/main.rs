//! hrquery Entry Point
//!
//! Launches the terminal UI for asking the HR employee-search service.
//!
//! Usage:
//!   hrquery [OPTIONS]
//!
//! Options:
//!   --url <URL>                Service base URL
//!   --connect-timeout-ms <MS>  Connect timeout (0 = none)
//!   --config <FILE>            Config file (default: ~/.config/hrquery/config.toml)
//!   --log-file <PATH>          Log destination (default: ~/.local/state/hrquery/hrquery.log)
//!
//! `HRQUERY_SERVICE_URL` is read by the config layer, below the CLI flags.
//!
//! Logs go to a file because the UI owns the terminal. Use `RUST_LOG` to
//! change verbosity.

use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hrquery_tui::App;
use panel_core::{load_config_from_path, ConfigOverrides, HttpQueryService};

/// Default filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "hrquery=info,hrquery_tui=info,panel_core=info";

/// hrquery - Ask the HR chatbot to find relevant employees
#[derive(Parser, Debug)]
#[command(name = "hrquery")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query service base URL
    #[arg(short = 'u', long, value_name = "URL")]
    url: Option<String>,

    /// Connect timeout for the service, in milliseconds (0 = none)
    #[arg(long, value_name = "MS")]
    connect_timeout_ms: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Default log file location
///
/// Uses the XDG state dir if available, otherwise the local data dir.
fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("hrquery")
        .join("hrquery.log")
}

/// Open the log file for appending, creating parent directories
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {path:?}"))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: hrquery requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    let mut config = load_config_from_path(args.config.clone())?;
    let mut overrides = ConfigOverrides::new();
    if let Some(url) = args.url.clone() {
        overrides = overrides.with_base_url(url);
    }
    if let Some(ms) = args.connect_timeout_ms {
        overrides = overrides.with_connect_timeout_ms(ms);
    }
    overrides.apply(&mut config)?;

    info!(
        url = %config.service.base_url,
        source = %config.source(),
        log_file = ?log_path,
        "Starting hrquery"
    );

    let service = HttpQueryService::from_config(&config.service)
        .context("Failed to build HTTP client")?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(service, config.ui);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!("hrquery exited");
    result
}
