//! usuarios-tui binary entry point.
//!
//! Parses configuration, sets up logging and the HTTP client, initializes
//! the terminal in raw mode, runs the TUI event loop, and restores the
//! terminal state on exit.
//!
use std::sync::Arc;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use usuarios_tui::app::{self, AppState, Dispatcher};
use usuarios_tui::config::Cli;
use usuarios_tui::{HttpUsuarioApi, Result, logging};

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
    logging::init(&cli.log_file, &cli.log_level)?;

    let api = HttpUsuarioApi::new(&cli.base_url, cli.timeout())?;
    let dispatcher = Dispatcher::new(Arc::new(api)).map_err(|e| format!("start http runtime: {}", e))?;
    let state = AppState::new(dispatcher.endpoint());

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, state, dispatcher);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
