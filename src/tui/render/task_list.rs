use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Task;
use crate::ops::search::highlight_regex;
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

use super::push_highlighted_spans;

/// Plain-text form of a list row: ` <mark> <bang> <title>`
pub fn format_task_item(task: &Task) -> String {
    format!(" {} {} {}", task.status_mark(), task.priority_mark(), task.title)
}

/// First row to draw so that `cursor` stays on screen
fn scroll_offset(cursor: usize, visible_height: usize) -> usize {
    if visible_height == 0 {
        return 0;
    }
    cursor.saturating_sub(visible_height - 1)
}

/// Render the bordered task list (full list, or search results)
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .style(app.theme.text_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let message = if app.search_query().is_some() {
            " No matching tasks"
        } else {
            " No tasks. Press n to add one"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, inner);
        return;
    }

    let cursor = app.visible_cursor();
    let width = inner.width as usize;
    let height = inner.height as usize;
    let offset = scroll_offset(cursor, height);
    let search_re = app.search_query().and_then(highlight_regex);

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, task)| task_line(app, task, i == cursor, width, search_re.as_ref()))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn task_line<'a>(
    app: &App,
    task: &Task,
    is_cursor: bool,
    width: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let theme = &app.theme;
    let base = if is_cursor {
        theme.selected_style()
    } else if task.completed {
        Style::default().fg(theme.done).bg(theme.background)
    } else {
        theme.text_style()
    };
    let bang = if is_cursor {
        base
    } else {
        Style::default().fg(theme.priority).bg(theme.background)
    };

    let prefix = format!(" {} ", task.status_mark());
    let marker = format!("{} ", task.priority_mark());
    let used = display_width(&prefix) + display_width(&marker);
    let title = truncate_to_width(&task.title, width.saturating_sub(used));

    let mut spans = vec![Span::styled(prefix, base), Span::styled(marker, bang)];
    push_highlighted_spans(
        &mut spans,
        &title,
        base,
        theme.search_match_style(),
        search_re,
    );

    // Selection bar spans the whole row
    let filled = used + display_width(&title);
    if is_cursor && filled < width {
        spans.push(Span::styled(" ".repeat(width - filled), base));
    }
    Line::from(spans)
}
