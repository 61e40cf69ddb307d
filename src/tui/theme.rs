use ratatui::style::{Color, Modifier, Style};

/// Colors used by the task list and its popups
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub done: Color,
    pub priority: Color,
    pub vim_indicator: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::White,
            dim: Color::Gray,
            border: Color::Rgb(0x82, 0xA2, 0xBE),
            selection_bg: Color::Rgb(0xF0, 0xC6, 0x74),
            selection_fg: Color::Black,
            done: Color::DarkGray,
            priority: Color::Rgb(0xCC, 0x66, 0x66),
            vim_indicator: Color::Rgb(0x02, 0x7F, 0x00),
            search_match_bg: Color::Rgb(0x82, 0xA2, 0xBE),
            search_match_fg: Color::Black,
        }
    }
}

impl Theme {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border).bg(self.background)
    }

    pub fn key_style(&self) -> Style {
        self.text_style().add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    pub fn search_match_style(&self) -> Style {
        Style::default()
            .fg(self.search_match_fg)
            .bg(self.search_match_bg)
            .add_modifier(Modifier::BOLD)
    }
}
