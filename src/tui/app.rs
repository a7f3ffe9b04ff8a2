//! TUI application runner.
//!
//! Handles the main event loop and terminal setup/teardown.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use super::{draw, handle_key};
use crate::app::{Action, Outcome};
use crate::App;

/// Run the TUI application.
///
/// Actions that call the model are driven to completion on `runtime`
/// before the next key is read.
pub fn run_tui(mut app: App, runtime: &Runtime) -> Result<()> {
    setup_terminal()?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_main_loop(&mut terminal, &mut app, runtime);

    restore_terminal()?;

    result
}

/// Setup the terminal for TUI mode.
fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Main event loop.
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key(key, app) {
                        // Show the "working" status before blocking on the model
                        if matches!(action, Action::Generate | Action::Analyze) {
                            app.set_status("Waiting for the model...");
                            terminal.draw(|frame| draw(frame, app))?;
                        }
                        run_action(app, action, runtime);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dispatch one action and fold its outcome back into the app.
fn run_action(app: &mut App, action: Action, runtime: &Runtime) {
    match runtime.block_on(app.dispatch(action)) {
        Ok(Outcome::Download(download)) => {
            if let Err(e) = app.save_download(&download) {
                tracing::error!(error = %e, "Failed to save export");
                app.set_status(format!("Export failed: {e}"));
            }
        }
        Ok(Outcome::Ignored) => {
            if matches!(action, Action::Generate | Action::Analyze) {
                app.clear_status();
            }
        }
        Ok(Outcome::Updated | Outcome::Failed) => {}
        Err(e) => {
            tracing::error!(error = %e, ?action, "Action failed");
            app.set_status(format!("Error: {e}"));
        }
    }
}
