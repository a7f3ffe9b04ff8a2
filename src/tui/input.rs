//! Input handling for the TUI.
//!
//! Maps key events to local edits or to an [`Action`] for the dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, AppMode};
use crate::core::ExportFormat;
use crate::App;

/// Lines moved per PageUp/PageDown in the history panel.
const HISTORY_PAGE: usize = 5;

/// Handle a key event.
///
/// Purely local changes are applied directly; anything that needs the
/// dispatcher is returned.
pub fn handle_key(key: KeyEvent, app: &mut App) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return None;
    }

    match app.mode {
        AppMode::EditingTopic => handle_editing_mode(key, app),
        AppMode::Help => {
            handle_help_mode(key, app);
            None
        }
        AppMode::Normal => handle_normal_mode(key, app),
    }
}

/// Handle input while typing a topic.
fn handle_editing_mode(key: KeyEvent, app: &mut App) -> Option<Action> {
    match key.code {
        KeyCode::Enter => {
            app.stop_editing();
            return Some(Action::Generate);
        }
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_input(),
        KeyCode::Char(c) => app.enter_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        _ => {}
    }
    None
}

/// Handle input in help mode.
fn handle_help_mode(key: KeyEvent, app: &mut App) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::Enter) {
        app.dismiss_help();
    }
}

/// Handle input while navigating tasks.
fn handle_normal_mode(key: KeyEvent, app: &mut App) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('i' | '/') => app.start_editing(),
        KeyCode::Char('?') => app.show_help(),

        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.scroll_history_up(HISTORY_PAGE),
        KeyCode::PageDown => app.scroll_history_down(HISTORY_PAGE),

        KeyCode::Char(' ') | KeyCode::Enter => return Some(Action::ToggleSelected),
        KeyCode::Char('g') => return Some(Action::Generate),
        KeyCode::Char('a') => return Some(Action::Analyze),
        KeyCode::Char('e') => return Some(Action::Export(ExportFormat::Txt)),
        KeyCode::Char('E') => return Some(Action::Export(ExportFormat::Json)),
        _ => {}
    }
    None
}
