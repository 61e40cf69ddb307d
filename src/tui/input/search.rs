use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Task;
use crate::tui::app::{App, Modal, SearchState};
use crate::tui::keymap::{self, Action};

/// Keys while the filtered list is showing. Only navigation, dismiss and quit
/// do anything here; the store is never touched.
pub(super) fn handle_results(
    app: &mut App,
    query: String,
    results: Vec<Task>,
    mut cursor: usize,
    key: KeyEvent,
) -> Modal {
    if key.code == KeyCode::Esc {
        app.refresh();
        return Modal::Browsing;
    }

    let last = results.len().saturating_sub(1);
    match keymap::resolve(&key, app.vim_mode) {
        Some(Action::MoveUp | Action::StepUp) => cursor = cursor.saturating_sub(1),
        Some(Action::MoveDown | Action::StepDown) => cursor = (cursor + 1).min(last),
        Some(Action::JumpTop) => cursor = 0,
        Some(Action::JumpBottom) => cursor = last,
        Some(Action::Quit) => app.should_quit = true,
        _ => {}
    }

    Modal::Searching(SearchState::Results {
        query,
        results,
        cursor,
    })
}
