mod browse;
mod confirm;
mod help;
mod prompt;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Modal, SearchState};
use super::keymap::{self, Action};

use browse::handle_browse;
use confirm::handle_confirm_delete;
use help::handle_help;
use prompt::{handle_create, handle_edit, handle_search_prompt};
use search::handle_results;

/// Handle a key event in the current modal state
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C leaves from anywhere, prompts included
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        app.should_quit = true;
        return;
    }

    let modal = std::mem::replace(&mut app.modal, Modal::Browsing);
    app.modal = match modal {
        Modal::Browsing => handle_browse(app, key),
        Modal::Creating(input) => handle_create(app, input, key),
        Modal::Editing { input, target } => handle_edit(app, input, target, key),
        Modal::ConfirmingDelete(task) => handle_confirm_delete(app, task, key),
        Modal::Searching(SearchState::Prompt(input)) => handle_search_prompt(app, input, key),
        Modal::Searching(SearchState::Results {
            query,
            results,
            cursor,
        }) => handle_results(app, query, results, cursor, key),
        Modal::ShowingHelp { scroll } => handle_help(app, scroll, key),
    };
}

/// Whether `key` is one of the letter quit aliases (outside prompts only)
fn is_quit(app: &App, key: &KeyEvent) -> bool {
    keymap::resolve(key, app.vim_mode) == Some(Action::Quit)
}
