//! userdash binary entry point.
//!
//! Parses the command line, sets up file logging, initializes the terminal
//! in raw mode, runs the TUI event loop, and restores the terminal on exit.
//!
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use userdash::Result;
use userdash::api::HttpUsersApi;
use userdash::app::{self, AppState, Keymap, Route, Theme, config};
use userdash::store::UserStore;

#[derive(Parser, Debug)]
#[command(name = "userdash")]
#[command(version, about = "Terminal dashboard for a remote users API")]
struct Cli {
    /// Base URL of the API; users live under `<URL>/users`
    #[arg(long, env = "USERDASH_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: String,

    /// Route to open first, e.g. `/` or `/user/<id>`
    #[arg(long, default_value = "/")]
    route: String,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, env = "USERDASH_LOG")]
    log_file: Option<PathBuf>,
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_theme() -> Theme {
    let path = config::config_file_write_path("theme.conf");
    Theme::load_or_init(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), "theme config unusable, using defaults: {e:#}");
        Theme::default()
    })
}

fn load_keymap() -> Keymap {
    let path = config::config_file_write_path("keybinds.conf");
    Keymap::load_or_init(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), "keybind config unusable, using defaults: {e:#}");
        Keymap::new_defaults()
    })
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(config::default_log_path);
    if let Err(e) = init_tracing(&log_path) {
        eprintln!("logging disabled: {e:#}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    // Request tasks are spawned from the UI thread.
    let _guard = runtime.enter();

    let api = HttpUsersApi::new(&cli.api_url).context("invalid --api-url")?;
    info!(api_url = %api.base_url(), route = %cli.route, "starting");
    let app = AppState::new(UserStore::new(Arc::new(api)), load_theme(), load_keymap());

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, app, Route::parse(&cli.route));

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!("application error: {err:#}");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn route_help_matches_detail_paths() {
        Cli::command().debug_assert();
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("/user/<id>"));
        assert_eq!(Route::parse("/user/abc"), Route::Detail { id: "abc".into() });
    }

    #[test]
    fn route_defaults_to_the_list() {
        let cli = Cli::parse_from(["userdash"]);
        assert_eq!(Route::parse(&cli.route), Route::List);
    }
}
