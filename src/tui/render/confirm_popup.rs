use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::model::Task;
use crate::tui::app::App;

use super::centered_fixed;

/// Ask before deleting `task`
pub fn render_confirm_delete(frame: &mut Frame, app: &App, task: &Task, area: Rect) {
    let popup = centered_fixed(50, 6, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Delete Task ")
        .style(app.theme.text_style());

    let text = app.theme.text_style();
    let lines = vec![
        Line::from(vec![
            Span::styled(" Delete: \"", text),
            Span::styled(task.title.clone(), app.theme.key_style()),
            Span::styled("\"?", text),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Press Enter to confirm or Escape to cancel",
            text,
        )),
    ];

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_title_and_instructions() {
        let (_dir, app) = seeded_app();
        let task = app.tasks[0].clone();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_delete(frame, &app, &task, area);
        });
        assert!(output.contains("Delete Task"));
        assert!(output.contains("Delete: \"Important task\"?"));
        assert!(output.contains("Press Enter to confirm"));
    }
}
