use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Task;
use crate::ops::search::filter_tasks;
use crate::ops::task_ops::edit_task;
use crate::tui::app::{App, LineInput, Modal, SearchState};

/// What a keystroke did to a single-line prompt
#[derive(Debug, PartialEq, Eq)]
enum PromptEvent {
    Submit,
    Cancel,
    Continue,
}

/// Apply a line-editing key to `input`.
fn edit_line(input: &mut LineInput, key: KeyEvent) -> PromptEvent {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => return PromptEvent::Submit,
        (_, KeyCode::Esc) => return PromptEvent::Cancel,

        (m, KeyCode::Backspace) if m.contains(KeyModifiers::ALT) => input.delete_word(),
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => input.delete_word(),
        (_, KeyCode::Backspace) => input.backspace(),
        (_, KeyCode::Delete) => input.delete(),
        (_, KeyCode::Left) => input.left(),
        (_, KeyCode::Right) => input.right(),
        (_, KeyCode::Home) => input.home(),
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => input.home(),
        (_, KeyCode::End) => input.end(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => input.end(),

        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.insert(c)
        }
        _ => {}
    }
    PromptEvent::Continue
}

pub(super) fn handle_create(app: &mut App, mut input: LineInput, key: KeyEvent) -> Modal {
    match edit_line(&mut input, key) {
        PromptEvent::Continue => Modal::Creating(input),
        PromptEvent::Cancel => Modal::Browsing,
        PromptEvent::Submit => {
            let title = input.value();
            if !title.is_empty() {
                app.store.create(title, false);
                app.refresh();
            }
            Modal::Browsing
        }
    }
}

pub(super) fn handle_edit(app: &mut App, mut input: LineInput, target: Task, key: KeyEvent) -> Modal {
    if key.code == KeyCode::Tab {
        input.set(&target.title);
        return Modal::Editing { input, target };
    }
    match edit_line(&mut input, key) {
        PromptEvent::Continue => Modal::Editing { input, target },
        PromptEvent::Cancel => Modal::Browsing,
        PromptEvent::Submit => {
            let title = input.value();
            if !title.is_empty() {
                edit_task(&app.store, &target, title);
                app.refresh();
            }
            Modal::Browsing
        }
    }
}

pub(super) fn handle_search_prompt(app: &mut App, mut input: LineInput, key: KeyEvent) -> Modal {
    match edit_line(&mut input, key) {
        PromptEvent::Continue => Modal::Searching(SearchState::Prompt(input)),
        PromptEvent::Cancel => Modal::Browsing,
        PromptEvent::Submit => {
            let query = input.value();
            if query.is_empty() {
                return Modal::Browsing;
            }
            app.refresh();
            Modal::Searching(SearchState::Results {
                query: query.to_string(),
                results: filter_tasks(&app.tasks, query),
                cursor: 0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn editing_keys() {
        let mut input = LineInput::new();
        for c in "tset".chars() {
            assert_eq!(edit_line(&mut input, key(KeyCode::Char(c))), PromptEvent::Continue);
        }
        edit_line(&mut input, key(KeyCode::Home));
        edit_line(&mut input, key(KeyCode::Delete));
        edit_line(&mut input, key(KeyCode::End));
        edit_line(&mut input, key(KeyCode::Left));
        edit_line(&mut input, key(KeyCode::Backspace));
        assert_eq!(input.buffer, "st");
        assert_eq!(edit_line(&mut input, key(KeyCode::Enter)), PromptEvent::Submit);
        assert_eq!(edit_line(&mut input, key(KeyCode::Esc)), PromptEvent::Cancel);
    }

    #[test]
    fn ctrl_w_deletes_word() {
        let mut input = LineInput::new();
        input.set("one two");
        edit_line(
            &mut input,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        assert_eq!(input.buffer, "one ");
    }

    #[test]
    fn shifted_characters_insert() {
        let mut input = LineInput::new();
        edit_line(&mut input, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        edit_line(&mut input, KeyEvent::new(KeyCode::Char('!'), KeyModifiers::SHIFT));
        assert_eq!(input.buffer, "A!");
    }

    #[test]
    fn alt_characters_are_ignored() {
        let mut input = LineInput::new();
        edit_line(&mut input, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(input.buffer, "");
    }
}
