use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Task;
use crate::tui::app::{App, Modal};

use super::is_quit;

pub(super) fn handle_confirm_delete(app: &mut App, task: Task, key: KeyEvent) -> Modal {
    match (key.modifiers, key.code) {
        // Confirm: Enter or y
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('y')) => {
            app.store.delete(&task.id);
            app.refresh();
            Modal::Browsing
        }
        // Cancel: Esc or n
        (_, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('n')) => Modal::Browsing,
        _ if is_quit(app, &key) => {
            app.should_quit = true;
            Modal::ConfirmingDelete(task)
        }
        _ => Modal::ConfirmingDelete(task),
    }
}
