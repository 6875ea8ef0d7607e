//! Suggestion overlay widget

use super::theme::Theme;
use crate::overlay::OverlayView;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Notice shown while a query is pending
pub const LOADING_NOTICE: &str = "Loading...";

/// Notice shown for an accepted empty result
pub const EMPTY_NOTICE: &str = "No matches";

/// Overlay list rendering an [`OverlayView`] snapshot
pub struct OverlayList<'a> {
    view: &'a OverlayView<'a>,
    theme: &'a Theme,
}

impl<'a> OverlayList<'a> {
    /// Create a new overlay list widget
    #[must_use]
    pub const fn new(view: &'a OverlayView<'a>, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    fn item_line(&self, index: usize) -> Line<'static> {
        let label = self.view.label(index).unwrap_or_default();
        if self.view.active_index == Some(index) {
            Line::from(vec![
                Span::styled("> ", self.theme.cursor_style()),
                Span::raw(label),
            ])
            .style(self.theme.selected_style())
        } else {
            Line::from(vec![Span::raw("  "), Span::raw(label)])
        }
    }

    fn button_line(&self) -> Option<Line<'static>> {
        let name = self.view.button_name?;
        let mut spans = vec![Span::styled(format!("+ {name}"), self.theme.button_style())];
        if let Some(link) = self.view.button_link {
            spans.push(Span::styled(format!(" ({link})"), self.theme.dimmed_style()));
        }
        Some(Line::from(spans))
    }
}

impl Widget for OverlayList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let mut lines = Vec::new();
        if self.view.loading {
            lines.push(Line::styled(LOADING_NOTICE, self.theme.dimmed_style()));
        }

        let start = self.view.scroll_offset();
        let end = (start + self.view.list_size.visible_rows()).min(self.view.items.len());
        lines.extend((start..end).map(|index| self.item_line(index)));

        if self.view.items.is_empty() && !self.view.loading {
            lines.push(Line::styled(EMPTY_NOTICE, self.theme.dimmed_style()));
        }
        lines.extend(self.button_line());

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListSize, TextTransform};
    use crate::item::Item;

    fn names(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item::with_field("name", *n)).collect()
    }

    fn view(items: &[Item]) -> OverlayView<'_> {
        OverlayView {
            items,
            loading: false,
            active_index: None,
            label_field: "name",
            list_size: ListSize::Default,
            text_transform: TextTransform::None,
            button_name: None,
            button_link: None,
        }
    }

    fn render(view: &OverlayView<'_>, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 24, height);
        let mut buf = Buffer::empty(area);
        OverlayList::new(view, &Theme::default()).render(area, &mut buf);

        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_renders_labels_with_active_marker() {
        let items = names(&["oslo", "bergen"]);
        let mut view = view(&items);
        view.active_index = Some(1);
        view.text_transform = TextTransform::Uppercase;

        let rows = render(&view, 4);
        assert!(rows[1].contains("  OSLO"));
        assert!(rows[2].contains("> BERGEN"));
    }

    #[test]
    fn test_loading_notice_above_previous_items() {
        let items = names(&["oslo"]);
        let mut view = view(&items);
        view.loading = true;

        let rows = render(&view, 4);
        assert!(rows[1].contains(LOADING_NOTICE));
        assert!(rows[2].contains("oslo"));
    }

    #[test]
    fn test_empty_result_notice() {
        let rows = render(&view(&[]), 3);
        assert!(rows[1].contains(EMPTY_NOTICE));
    }

    #[test]
    fn test_button_line() {
        let items = names(&["oslo"]);
        let mut view = view(&items);
        view.button_name = Some("New");
        view.button_link = Some("/new");

        let rows = render(&view, 4);
        assert!(rows[2].contains("+ New (/new)"));
    }

    #[test]
    fn test_rows_follow_active_index() {
        let items: Vec<Item> = (0..8).map(|i| Item::with_field("name", format!("city{i}"))).collect();
        let mut view = view(&items);
        view.active_index = Some(6);

        let rows = render(&view, 7);
        assert!(rows[1].contains("city2"));
        assert!(rows[5].contains("> city6"));
        assert!(!rows.iter().any(|row| row.contains("city7")));
    }
}
