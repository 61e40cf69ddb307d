use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store::TaskStore;
use crate::model::Task;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_start_before};

use super::input;
use super::render;
use super::theme::Theme;

/// Single-line text being typed into a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    pub buffer: String,
    /// Byte offset, always on a grapheme boundary
    pub cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents and put the cursor at the end
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word(&mut self) {
        let start = word_start_before(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// The submitted value: surrounding whitespace removed
    pub fn value(&self) -> &str {
        self.buffer.trim()
    }
}

/// The search flow: first a prompt, then a filtered view until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Prompt(LineInput),
    Results {
        query: String,
        results: Vec<Task>,
        cursor: usize,
    },
}

/// Which view owns the keyboard. Every modal returns to `Browsing` when done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Browsing,
    Creating(LineInput),
    Editing { input: LineInput, target: Task },
    ConfirmingDelete(Task),
    Searching(SearchState),
    ShowingHelp { scroll: usize },
}

/// Interactive session state
pub struct App {
    pub store: TaskStore,
    /// Last full read of the store, in insertion order
    pub tasks: Vec<Task>,
    /// Index into `tasks`
    pub cursor: usize,
    pub modal: Modal,
    pub vim_mode: bool,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        let vim_mode = store.settings().vim_mode;
        let mut app = App {
            store,
            tasks: Vec::new(),
            cursor: 0,
            modal: Modal::Browsing,
            vim_mode,
            should_quit: false,
            theme: Theme::default(),
        };
        app.refresh();
        app
    }

    /// Re-read every task from the store and keep the cursor in range.
    pub fn refresh(&mut self) {
        self.tasks = self.store.list();
        self.cursor = self.cursor.min(self.tasks.len().saturating_sub(1));
    }

    /// The task under the cursor, read fresh from the store.
    pub fn selected_task(&mut self) -> Option<Task> {
        self.refresh();
        self.tasks.get(self.cursor).cloned()
    }

    /// Tasks currently on screen: search results while they are shown, else all.
    pub fn visible_tasks(&self) -> &[Task] {
        match &self.modal {
            Modal::Searching(SearchState::Results { results, .. }) => results,
            _ => &self.tasks,
        }
    }

    /// Cursor into [`App::visible_tasks`]
    pub fn visible_cursor(&self) -> usize {
        match &self.modal {
            Modal::Searching(SearchState::Results { cursor, .. }) => *cursor,
            _ => self.cursor,
        }
    }

    /// Active search query, if the filtered view is showing
    pub fn search_query(&self) -> Option<&str> {
        match &self.modal {
            Modal::Searching(SearchState::Results { query, .. }) => Some(query),
            _ => None,
        }
    }

    pub fn header_title(&self) -> String {
        match self.search_query() {
            Some(query) => format!("TyDID - Search: \"{}\"", query),
            None => "TyDID".to_string(),
        }
    }
}

/// Run the interactive view until the user quits
pub fn run(store: TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_input_editing() {
        let mut input = LineInput::new();
        for c in "helo".chars() {
            input.insert(c);
        }
        input.left();
        input.insert('l');
        assert_eq!(input.buffer, "hello");
        assert_eq!(input.cursor, 4);

        input.end();
        input.backspace();
        assert_eq!(input.buffer, "hell");

        input.home();
        input.delete();
        assert_eq!(input.buffer, "ell");
        assert_eq!(input.cursor, 0);

        input.left();
        assert_eq!(input.cursor, 0);
        input.end();
        input.right();
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn line_input_multibyte() {
        let mut input = LineInput::new();
        input.set("задача");
        input.backspace();
        assert_eq!(input.buffer, "задач");
        input.left();
        input.insert('ч');
        assert_eq!(input.buffer, "задачч");
    }

    #[test]
    fn line_input_delete_word() {
        let mut input = LineInput::new();
        input.set("fix the bug");
        input.delete_word();
        assert_eq!(input.buffer, "fix the ");
        input.delete_word();
        assert_eq!(input.buffer, "fix ");
    }

    #[test]
    fn value_is_trimmed() {
        let mut input = LineInput::new();
        input.set("   spaced out  ");
        assert_eq!(input.value(), "spaced out");
        input.set("   ");
        assert_eq!(input.value(), "");
    }
}
