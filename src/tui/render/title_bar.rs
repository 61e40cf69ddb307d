use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the centered title row. While search results are shown the active
/// query is appended after the app name.
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let name_style = app.theme.text_style().add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled("TyDID", name_style)];
    if let Some(query) = app.search_query() {
        spans.push(Span::styled(
            format!(" - Search: \"{}\"", query),
            app.theme.text_style(),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .style(app.theme.text_style());
    frame.render_widget(title, area);
}
