pub mod confirm_popup;
pub mod help_overlay;
pub mod prompt_popup;
pub mod status_row;
pub mod task_list;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Modal, SearchState};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Keep the stored help scroll within what this frame can show, so Up
    // responds immediately after scrolling past the end
    let max_help_scroll = help_overlay::max_scroll(app, area);
    if let Modal::ShowingHelp { scroll } = &mut app.modal {
        *scroll = (*scroll).min(max_help_scroll);
    }
    let app: &App = app;

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (1 row) | task list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Modal popups go on top of everything
    match &app.modal {
        Modal::Browsing | Modal::Searching(SearchState::Results { .. }) => {}
        Modal::Creating(input) => {
            prompt_popup::render_line_prompt(frame, app, " New Task ", input, area)
        }
        Modal::Searching(SearchState::Prompt(input)) => {
            prompt_popup::render_line_prompt(frame, app, " Search Tasks ", input, area)
        }
        Modal::Editing { input, target } => {
            prompt_popup::render_edit_prompt(frame, app, target, input, area)
        }
        Modal::ConfirmingDelete(task) => {
            confirm_popup::render_confirm_delete(frame, app, task, area)
        }
        Modal::ShowingHelp { scroll } => {
            help_overlay::render_help_overlay(frame, app, *scroll, area)
        }
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(text[last_end..m.start()].to_string(), base_style));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    centered_columns(percent_x, popup_layout[1])
}

/// A rectangle `height` rows tall, `percent_x` wide, centered in `area`
pub(super) fn centered_fixed(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let top = area.y + (area.height - height) / 2;
    centered_columns(percent_x, Rect::new(area.x, top, area.width, height))
}

fn centered_columns(percent_x: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area)[1]
}
