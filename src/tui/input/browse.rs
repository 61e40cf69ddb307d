use crossterm::event::KeyEvent;

use crate::tui::app::{App, LineInput, Modal, SearchState};
use crate::tui::keymap::{self, Action};

pub(super) fn handle_browse(app: &mut App, key: KeyEvent) -> Modal {
    let Some(action) = keymap::resolve(&key, app.vim_mode) else {
        return Modal::Browsing;
    };
    let last = app.tasks.len().saturating_sub(1);

    match action {
        Action::MoveUp | Action::StepUp => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        Action::MoveDown | Action::StepDown => {
            app.cursor = (app.cursor + 1).min(last);
        }
        Action::JumpTop => app.cursor = 0,
        Action::JumpBottom => app.cursor = last,

        Action::New => return Modal::Creating(LineInput::new()),
        Action::Delete => {
            if let Some(task) = app.selected_task() {
                return Modal::ConfirmingDelete(task);
            }
        }
        Action::Edit => {
            if let Some(target) = app.selected_task() {
                return Modal::Editing {
                    input: LineInput::new(),
                    target,
                };
            }
        }
        Action::TogglePriority => {
            if let Some(task) = app.selected_task() {
                app.store.set_priority(&task.id, None);
                app.refresh();
            }
        }
        Action::ToggleComplete => {
            if let Some(task) = app.selected_task() {
                app.store.toggle_completed(&task.id);
                app.refresh();
            }
        }
        Action::Search => return Modal::Searching(SearchState::Prompt(LineInput::new())),
        Action::ToggleVim => toggle_vim(app),
        Action::Help => return Modal::ShowingHelp { scroll: 0 },
        Action::Quit => app.should_quit = true,
    }
    Modal::Browsing
}

/// Flip vim mode and persist it, keeping any other settings keys intact.
fn toggle_vim(app: &mut App) {
    app.vim_mode = !app.vim_mode;
    let mut settings = app.store.settings();
    settings.vim_mode = app.vim_mode;
    app.store.save_settings(&settings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::seeded_app;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn toggle_vim_keeps_unknown_settings() {
        let (dir, mut app) = seeded_app();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"vimMode": false, "theme": "dark"}"#,
        )
        .unwrap();

        let key = KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE);
        assert_eq!(handle_browse(&mut app, key), Modal::Browsing);

        let settings = app.store.settings();
        assert!(settings.vim_mode);
        assert_eq!(settings.extra.get("theme").and_then(|v| v.as_str()), Some("dark"));
    }

    #[test]
    fn selection_reads_fresh_state() {
        let (_dir, mut app) = seeded_app();
        // Another handle removes every task behind the session's back
        for task in app.store.list() {
            app.store.delete(&task.id);
        }
        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(handle_browse(&mut app, key), Modal::Browsing);
        assert!(app.tasks.is_empty());
    }
}
