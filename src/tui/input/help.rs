use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Modal};

use super::is_quit;

pub(super) fn handle_help(app: &mut App, scroll: usize, key: KeyEvent) -> Modal {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') => Modal::Browsing,
        KeyCode::Up => Modal::ShowingHelp {
            scroll: scroll.saturating_sub(1),
        },
        // Render clamps the stored offset to the visible content
        KeyCode::Down => Modal::ShowingHelp {
            scroll: scroll.saturating_add(1),
        },
        _ => {
            if is_quit(app, &key) {
                app.should_quit = true;
            }
            Modal::ShowingHelp { scroll }
        }
    }
}
