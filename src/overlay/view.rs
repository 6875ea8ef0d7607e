//! Render snapshot handed to the view layer

use crate::config::{ListSize, TextTransform};
use crate::item::Item;

/// Everything a renderer needs to paint the overlay
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    /// Items of the latest accepted result
    pub items: &'a [Item],
    /// Whether a query is pending
    pub loading: bool,
    /// Highlighted row
    pub active_index: Option<usize>,
    /// Item field used as label
    pub label_field: &'a str,
    /// Height class
    pub list_size: ListSize,
    /// Label casing
    pub text_transform: TextTransform,
    /// Optional action button
    pub button_name: Option<&'a str>,
    /// Navigation target of the action button
    pub button_link: Option<&'a str>,
}

impl OverlayView<'_> {
    /// Rendered label of the item at `index`
    #[must_use]
    pub fn label(&self, index: usize) -> Option<String> {
        let item = self.items.get(index)?;
        Some(
            item.text(self.label_field)
                .map(|text| self.text_transform.apply(&text))
                .unwrap_or_default(),
        )
    }

    /// Number of item rows to show
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        self.items.len().min(self.list_size.visible_rows())
    }

    /// First row to show so the active row stays visible
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        let rows = self.list_size.visible_rows();
        self.active_index
            .map_or(0, |active| (active + 1).saturating_sub(rows))
    }
}
