use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::keymap::{Action, BINDINGS, Binding};

/// Keys for a binding, aliases included: `d/в/r/к`
fn key_list(binding: &Binding) -> String {
    binding
        .keys
        .iter()
        .map(|k| k.label())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_navigation(action: Action) -> bool {
    matches!(action, Action::MoveUp | Action::MoveDown)
}

/// Every line of the help text, before scrolling
fn help_lines(app: &App) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let key_style = app.theme.key_style();
    let desc_style = app.theme.text_style();
    let header_style = Style::default()
        .fg(app.theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled("Keyboard Shortcuts", header_style)).centered());
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Basic Commands:", header_style)));
    for b in BINDINGS
        .iter()
        .filter(|b| !b.vim_only && !is_navigation(b.action))
    {
        add_binding(&mut lines, key_list(b), b.description, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation:", header_style)));
    add_binding(
        &mut lines,
        "\u{2191}/\u{2193}".to_string(),
        "Move selection up/down",
        key_style,
        desc_style,
    );
    lines.push(Line::from(""));

    let vim_note = if app.vim_mode { "(on)" } else { "(when Vim mode is enabled)" };
    lines.push(Line::from(vec![
        Span::styled(" Vim Mode Commands: ", header_style),
        Span::styled(vim_note, dim_style),
    ]));
    for b in BINDINGS.iter().filter(|b| b.vim_only) {
        add_binding(&mut lines, key_list(b), b.description, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press ESC to close this help", dim_style)).centered());
    lines
}

fn add_binding(
    lines: &mut Vec<Line<'static>>,
    key: String,
    desc: &'static str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("   {:<14}", key);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

fn overlay_block(app: &App) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .style(app.theme.text_style())
}

/// Largest useful scroll offset when the overlay is drawn inside `area`
pub fn max_scroll(app: &App, area: Rect) -> usize {
    let overlay_area = super::centered_rect(80, 80, area);
    let inner_height = overlay_block(app).inner(overlay_area).height as usize;
    help_lines(app).len().saturating_sub(inner_height)
}

/// Render the help overlay, scrolled down by `scroll` lines
pub fn render_help_overlay(frame: &mut Frame, app: &App, scroll: usize, area: Rect) {
    let overlay_area = super::centered_rect(80, 80, area);
    frame.render_widget(Clear, overlay_area);

    let block = overlay_block(app);
    let lines = help_lines(app);
    let scroll = scroll.min(max_scroll(app, area)) as u16;

    let help = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .scroll((scroll, 0));
    frame.render_widget(help, overlay_area);
}
