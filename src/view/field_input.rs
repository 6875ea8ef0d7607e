//! Host field widget

use super::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line field showing its value and validation error
pub struct FieldInput<'a> {
    label: &'a str,
    value: &'a str,
    error: Option<&'a str>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FieldInput<'a> {
    /// Create a new field widget
    #[must_use]
    pub const fn new(label: &'a str, value: &'a str, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            error: None,
            focused: false,
            theme,
        }
    }

    /// Show a validation error under the value
    #[must_use]
    pub const fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Draw the field as focused, with a cursor after the value
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for FieldInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.error.is_some() {
            self.theme.error_style()
        } else if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.label));
        if let Some(error) = self.error {
            block = block.title_bottom(Line::styled(format!(" {error} "), self.theme.error_style()));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::raw(self.value)];
        if self.focused {
            spans.push(Span::styled(
                " ",
                self.theme
                    .selected_style()
                    .bg(self.theme.cursor)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        // Keep the end of long values visible
        let width = usize::from(inner.width);
        let overflow = (self.value.chars().count() + usize::from(self.focused)).saturating_sub(width);
        let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

        Paragraph::new(Line::from(spans))
            .scroll((0, scroll))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_renders_label_and_value() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        FieldInput::new("city", "Oslo", &theme).render(area, &mut buf);

        assert!(row(&buf, 0).contains(" city "));
        assert!(row(&buf, 1).contains("Oslo"));
    }

    #[test]
    fn test_renders_error_on_bottom_border() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        FieldInput::new("city", "Osl", &theme)
            .error(Some("Item not exist"))
            .focused(true)
            .render(area, &mut buf);

        assert!(row(&buf, 2).contains("Item not exist"));
        assert_eq!(buf[(1, 2)].fg, theme.error);
    }

    #[test]
    fn test_long_value_shows_its_end() {
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        FieldInput::new("f", "abcdefghij", &theme).render(area, &mut buf);

        assert_eq!(row(&buf, 1), "│efghij│");
    }
}
