//! Color theme for the terminal view

use ratatui::style::{Color, Modifier, Style};

/// Colors used by the field and overlay widgets
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background of the active overlay row
    pub selection_bg: Color,
    /// Foreground of the active overlay row
    pub selection_fg: Color,
    /// Active row marker and focused field border
    pub cursor: Color,
    /// Validation errors
    pub error: Color,
    /// Overlay action button
    pub button: Color,
    /// Unfocused borders
    pub border: Color,
    /// Loading and empty-list notices
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            error: Color::Red,
            button: Color::Green,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the active overlay row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the active row marker (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for validation errors
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for the overlay action button
    #[must_use]
    pub fn button_style(&self) -> Style {
        Style::default()
            .fg(self.button)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
