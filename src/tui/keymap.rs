//! Static table of logical actions and the physical keys that trigger them.
//!
//! Each action lists its primary key first, followed by aliases for the same
//! physical key on a Russian (ЙЦУКЕН) layout. Vim-only bindings are ignored
//! unless vim mode is on.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the user can ask for from the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    /// Vim `h`: first task
    JumpTop,
    /// Vim `j`: next task (index + 1)
    StepDown,
    /// Vim `k`: previous task (index - 1)
    StepUp,
    /// Vim `l`: last task
    JumpBottom,
    New,
    Delete,
    Edit,
    TogglePriority,
    ToggleComplete,
    Search,
    ToggleVim,
    Help,
}

/// A physical key as far as bindings care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
}

impl Key {
    pub fn from_event(key: &KeyEvent) -> Option<Key> {
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::Ctrl(c.to_ascii_lowercase()))
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                Some(Key::Char(c))
            }
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            _ => None,
        }
    }

    /// Short label for help and hints
    pub fn label(self) -> String {
        match self {
            Key::Char(' ') => "space".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Ctrl(c) => format!("C-{}", c),
            Key::Up => "\u{2191}".to_string(),
            Key::Down => "\u{2193}".to_string(),
        }
    }
}

pub struct Binding {
    pub action: Action,
    pub keys: &'static [Key],
    pub vim_only: bool,
    pub description: &'static str,
}

const fn bind(action: Action, keys: &'static [Key], description: &'static str) -> Binding {
    Binding {
        action,
        keys,
        vim_only: false,
        description,
    }
}

const fn vim(action: Action, keys: &'static [Key], description: &'static str) -> Binding {
    Binding {
        action,
        keys,
        vim_only: true,
        description,
    }
}

pub const BINDINGS: &[Binding] = &[
    bind(Action::New, &[Key::Char('n'), Key::Char('т')], "Create a new task"),
    bind(
        Action::Delete,
        &[Key::Char('d'), Key::Char('в'), Key::Char('r'), Key::Char('к')],
        "Delete the selected task",
    ),
    bind(Action::Edit, &[Key::Char('e'), Key::Char('у')], "Edit the selected task"),
    bind(
        Action::ToggleComplete,
        &[Key::Char(' '), Key::Char('c'), Key::Char('с')],
        "Toggle completion of the selected task",
    ),
    bind(Action::Search, &[Key::Char('s'), Key::Char('ы')], "Search tasks"),
    bind(
        Action::TogglePriority,
        &[Key::Char('!'), Key::Char('1')],
        "Toggle priority of the selected task",
    ),
    bind(Action::ToggleVim, &[Key::Char('v'), Key::Char('м')], "Toggle vim mode"),
    bind(Action::Help, &[Key::Char('?')], "Show this help"),
    bind(
        Action::Quit,
        &[Key::Char('q'), Key::Ctrl('c'), Key::Char('й')],
        "Quit the application",
    ),
    bind(Action::MoveUp, &[Key::Up], "Move selection up"),
    bind(Action::MoveDown, &[Key::Down], "Move selection down"),
    vim(Action::JumpTop, &[Key::Char('h'), Key::Char('р')], "Jump to the top of the list"),
    vim(Action::StepDown, &[Key::Char('j'), Key::Char('о')], "Move down one item"),
    vim(Action::StepUp, &[Key::Char('k'), Key::Char('л')], "Move up one item"),
    vim(
        Action::JumpBottom,
        &[Key::Char('l'), Key::Char('д')],
        "Jump to the bottom of the list",
    ),
];

/// Look up the action bound to `key`, honoring vim gating.
pub fn resolve(key: &KeyEvent, vim_mode: bool) -> Option<Action> {
    let key = Key::from_event(key)?;
    BINDINGS
        .iter()
        .filter(|b| vim_mode || !b.vim_only)
        .find(|b| b.keys.contains(&key))
        .map(|b| b.action)
}

/// The binding entry for `action`
pub fn binding(action: Action) -> Option<&'static Binding> {
    BINDINGS.iter().find(|b| b.action == action)
}

/// Primary key label for `action` (first key in its table row)
pub fn primary_label(action: Action) -> String {
    binding(action)
        .and_then(|b| b.keys.first())
        .map(|k| k.label())
        .unwrap_or_default()
}
