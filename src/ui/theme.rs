//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent for focused controls and active sort.
    pub accent: Color,
    /// Border of unfocused blocks.
    pub border: Color,
    /// Border of the focused block.
    pub border_focused: Color,
    /// Secondary text.
    pub muted: Color,
    /// Background of the selected row.
    pub selection_bg: Color,
    /// Background of search matches.
    pub match_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            match_bg: Color::Yellow,
        }
    }
}

impl Theme {
    /// Style for a block border.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for column headers.
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row.
    pub fn selected_row_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for highlighted search matches.
    pub fn match_style(&self) -> Style {
        Style::default()
            .bg(self.match_bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// The active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
