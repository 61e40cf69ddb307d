use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Modal, SearchState};
use crate::tui::keymap::{Action, primary_label};
use crate::util::unicode::display_width;

const BROWSE_HINTS: &[(Action, &str)] = &[
    (Action::New, "New"),
    (Action::Delete, "Delete"),
    (Action::ToggleComplete, "Complete"),
    (Action::Edit, "Edit"),
    (Action::TogglePriority, "Priority"),
    (Action::Help, "Help"),
    (Action::Quit, "Quit"),
];

fn hint_pairs(app: &App) -> Vec<(String, &'static str)> {
    match &app.modal {
        Modal::Searching(SearchState::Results { .. }) => vec![
            ("Esc".to_string(), "Back"),
            ("\u{2191}/\u{2193}".to_string(), "Move"),
            (primary_label(Action::Quit), "Quit"),
        ],
        Modal::Creating(_) | Modal::Searching(SearchState::Prompt(_)) => {
            vec![("Enter".to_string(), "Save"), ("Esc".to_string(), "Cancel")]
        }
        Modal::Editing { .. } => vec![
            ("Enter".to_string(), "Save"),
            ("Tab".to_string(), "Current title"),
            ("Esc".to_string(), "Cancel"),
        ],
        _ => BROWSE_HINTS
            .iter()
            .map(|(action, label)| (primary_label(*action), *label))
            .collect(),
    }
}

/// Render the status row (bottom of screen): key hints on the left, vim
/// indicator on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let text = app.theme.text_style();
    let key = app.theme.key_style();

    let state = if app.vim_mode { "ON" } else { "OFF" };
    let indicator = vec![
        Span::styled("[", text),
        Span::styled(
            format!("VIM MODE: {}", state),
            Style::default().fg(app.theme.vim_indicator).bg(bg),
        ),
        Span::styled("] ", text),
    ];
    let indicator_width: usize = indicator.iter().map(|s| display_width(&s.content)).sum();

    // Hints are dropped from the right until they fit beside the indicator
    let mut spans: Vec<Span> = vec![Span::styled(" ", text)];
    let mut used = 1;
    for (i, (k, label)) in hint_pairs(app).into_iter().enumerate() {
        let sep = if i > 0 { " | " } else { "" };
        let desc = format!(": {}", label);
        let group = display_width(sep) + display_width(&k) + display_width(&desc);
        if used + group + indicator_width >= width {
            break;
        }
        used += group;
        if !sep.is_empty() {
            spans.push(Span::styled(sep, text));
        }
        spans.push(Span::styled(k, key));
        spans.push(Span::styled(desc, text));
    }

    let padding = width.saturating_sub(used + indicator_width);
    spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
    spans.extend(indicator);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
