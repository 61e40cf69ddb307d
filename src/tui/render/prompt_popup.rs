use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Task;
use crate::tui::app::{App, LineInput};
use crate::util::unicode::{display_col, skip_width, truncate_to_width};

use super::centered_fixed;

/// Draw `input` on one row of `area`, scrolled so the cursor stays visible,
/// and place the terminal cursor on it.
fn render_input_line(frame: &mut Frame, app: &App, input: &LineInput, area: Rect) {
    let width = area.width as usize;
    if width == 0 || area.height == 0 {
        return;
    }
    let col = display_col(&input.buffer, input.cursor);
    let (visible, skipped) = skip_width(&input.buffer, col.saturating_sub(width - 1));

    let line = Line::from(Span::styled(
        truncate_to_width(visible, width),
        app.theme.text_style(),
    ));
    frame.render_widget(Paragraph::new(line), area);
    frame.set_cursor_position(Position::new(area.x + col.saturating_sub(skipped) as u16, area.y));
}

/// Single-line prompt (new task, search) in a titled box
pub fn render_line_prompt(frame: &mut Frame, app: &App, title: &str, input: &LineInput, area: Rect) {
    let popup = centered_fixed(80, 3, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(title.to_string())
        .style(app.theme.text_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    render_input_line(frame, app, input, inner);
}

/// Edit prompt: shows the current title above a boxed input line
pub fn render_edit_prompt(
    frame: &mut Frame,
    app: &App,
    target: &Task,
    input: &LineInput,
    area: Rect,
) {
    let popup = centered_fixed(80, 8, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Edit Task ")
        .style(app.theme.text_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let width = inner.width as usize;
    let text = app.theme.text_style();
    let label = Line::from(vec![Span::styled(
        truncate_to_width(&format!(" Current: {}", target.title), width),
        text,
    )]);
    let lines = vec![label, Line::from(""), Line::from(Span::styled(" New text:", text))];
    frame.render_widget(Paragraph::new(lines), inner);

    // Input box under the labels, 90% of the popup width
    if inner.height < 6 {
        return;
    }
    let box_width = inner.width * 9 / 10;
    let input_box = Rect::new(
        inner.x + (inner.width - box_width) / 2,
        inner.y + 3,
        box_width,
        3,
    );
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style());
    let input_area = input_block.inner(input_box);
    frame.render_widget(input_block, input_box);
    render_input_line(frame, app, input, input_area);
}
