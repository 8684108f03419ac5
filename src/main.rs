//! user-directory binary entry point.
//!
//! Parses flags, initializes the terminal in raw mode, runs the TUI event loop
//! on a single-threaded runtime, and restores the terminal state on exit.
//!
use std::sync::Arc;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use user_directory::app::config::{Cli, init_logging};
use user_directory::app::keymap::Keymap;
use user_directory::app::{AppState, Theme, run};
use user_directory::error::{Context, Result};
use user_directory::{HttpSource, UserDirectoryView};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;
    tracing::info!(url = %cli.url, "starting user-directory");

    let source = HttpSource::new(cli.http_settings())?;
    let view = UserDirectoryView::new(Arc::new(source));
    let mut app = AppState::new(view)
        .with_theme(Theme::load(cli.theme_path().as_deref()))
        .with_keymap(Keymap::load(cli.keybinds_path().as_deref()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_ctx(|| "build runtime".to_string())?;

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let local = tokio::task::LocalSet::new();
    let res = local.block_on(&runtime, run(&mut terminal, &mut app));

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
