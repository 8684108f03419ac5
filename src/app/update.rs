use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};
use crate::ui;

/// How long the loop yields to pending fetch cycles between input polls.
const TICK: Duration = Duration::from_millis(50);

/// What the event loop should do after handling a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Reload,
    Quit,
}

/// Drive the TUI until the user quits.
///
/// Must run inside a `tokio::task::LocalSet`: fetch cycles are spawned locally
/// and progress while the loop sleeps between polls.
pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    app.view.attach();

    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = app.keymap.resolve(&key) else {
                continue;
            };
            match handle_action(app, action) {
                Flow::Continue => {}
                Flow::Reload => {
                    tracing::info!("manual reload requested");
                    tokio::task::spawn_local(app.view.load_records());
                }
                Flow::Quit => return Ok(()),
            }
        }

        tokio::time::sleep(TICK).await;
    }
}

/// Apply one key action to the UI state.
pub fn handle_action(app: &mut AppState, action: KeyAction) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal(app, action),
        InputMode::Select => handle_select(app, action),
    }
}

fn handle_normal(app: &mut AppState, action: KeyAction) -> Flow {
    let view = Rc::clone(&app.view);
    let state = view.state();
    let region = state.region();
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Reload => return Flow::Reload,
        KeyAction::OpenSelector | KeyAction::Activate => {
            if let Some(records) = region.selector_records() {
                app.selector_cursor = state
                    .selection
                    .as_ref()
                    .and_then(|sel| records.iter().position(|r| r.id == sel.id))
                    .map(|idx| idx + 1)
                    .unwrap_or(0);
                app.input_mode = InputMode::Select;
            }
        }
        KeyAction::MoveUp | KeyAction::MoveDown | KeyAction::PageUp | KeyAction::PageDown => {
            if let crate::app::view::Region::Table { records } = region {
                let rpp = app.rows_per_page.max(1);
                app.table_cursor = step(app.table_cursor, action, rpp, records.len());
            }
        }
        KeyAction::Cancel | KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_select(app: &mut AppState, action: KeyAction) -> Flow {
    let view = Rc::clone(&app.view);
    let chosen = {
        let state = view.state();
        let Some(records) = state.region().selector_records() else {
            // data region went away underneath the popup (reload or failure)
            app.input_mode = InputMode::Normal;
            return match action {
                KeyAction::Quit => Flow::Quit,
                KeyAction::Reload => Flow::Reload,
                _ => Flow::Continue,
            };
        };
        match action {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::Reload => {
                app.input_mode = InputMode::Normal;
                return Flow::Reload;
            }
            KeyAction::Cancel => {
                app.input_mode = InputMode::Normal;
                return Flow::Continue;
            }
            KeyAction::MoveUp | KeyAction::MoveDown | KeyAction::PageUp | KeyAction::PageDown => {
                // entry 0 is the neutral "Select a user" option
                let rpp = app.rows_per_page.max(1);
                app.selector_cursor = step(app.selector_cursor, action, rpp, records.len() + 1);
                return Flow::Continue;
            }
            KeyAction::OpenSelector | KeyAction::Ignore => return Flow::Continue,
            KeyAction::Activate => app
                .selector_cursor
                .checked_sub(1)
                .and_then(|idx| records.get(idx))
                .map(|r| r.id),
        }
    };

    // The neutral entry resolves to no id, so confirming it leaves the selection alone.
    if let Some(id) = chosen {
        view.select_record(id);
    }
    app.input_mode = InputMode::Normal;
    Flow::Continue
}

fn step(cursor: usize, action: KeyAction, page: usize, len: usize) -> usize {
    let last = len.saturating_sub(1);
    let next = match action {
        KeyAction::MoveUp => cursor.saturating_sub(1),
        KeyAction::MoveDown => cursor.saturating_add(1),
        KeyAction::PageUp => cursor.saturating_sub(page),
        KeyAction::PageDown => cursor.saturating_add(page),
        _ => cursor,
    };
    next.min(last)
}
