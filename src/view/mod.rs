//! Terminal rendering of a bound field and its overlay
//!
//! Reference view built on ratatui. The controller never depends on it; a
//! host renders [`FieldInput`] for the field and, while a session exists,
//! [`OverlayList`] in the rectangle returned by [`overlay_area`].

mod field_input;
mod overlay_list;
mod theme;

pub use field_input::FieldInput;
pub use overlay_list::{EMPTY_NOTICE, LOADING_NOTICE, OverlayList};
pub use theme::Theme;

use crate::overlay::OverlayView;
use ratatui::layout::{Margin, Position, Rect};

/// Total overlay height including borders
#[must_use]
pub fn overlay_height(view: &OverlayView<'_>) -> u16 {
    // An empty list still shows one notice line unless the loading line does
    let rows = view.visible_rows().max(usize::from(!view.loading));
    let lines = rows + usize::from(view.loading) + usize::from(view.button_name.is_some());
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

/// Rectangle for the overlay, anchored to `field`
///
/// Placed directly below the field when it fits on `screen`, above it
/// otherwise, and clipped below the field when neither side has room.
#[must_use]
pub fn overlay_area(field: Rect, view: &OverlayView<'_>, screen: Rect) -> Rect {
    let height = overlay_height(view);
    let space_below = screen.bottom().saturating_sub(field.bottom());
    let space_above = field.y.saturating_sub(screen.y);

    let (y, height) = if height <= space_below {
        (field.bottom(), height)
    } else if height <= space_above {
        (field.y - height, height)
    } else {
        (field.bottom(), space_below)
    };

    Rect::new(field.x, y, field.width, height).intersection(screen)
}

/// Index of the item drawn at (`column`, `row`) by an overlay rendered in `area`
#[must_use]
pub fn item_at(view: &OverlayView<'_>, area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = area.inner(Margin::new(1, 1));
    if !inner.contains(Position::new(column, row)) {
        return None;
    }

    let line = usize::from(row - inner.y).checked_sub(usize::from(view.loading))?;
    if line >= view.visible_rows() {
        return None;
    }
    let index = view.scroll_offset() + line;
    (index < view.items.len()).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListSize, TextTransform};
    use crate::item::Item;

    fn view(items: &[Item], loading: bool) -> OverlayView<'_> {
        OverlayView {
            items,
            loading,
            active_index: None,
            label_field: "name",
            list_size: ListSize::Default,
            text_transform: TextTransform::None,
            button_name: None,
            button_link: None,
        }
    }

    #[test]
    fn test_overlay_height() {
        let items: Vec<Item> = (0..12).map(|i| Item::with_field("name", i)).collect();

        assert_eq!(overlay_height(&view(&[], true)), 3);
        assert_eq!(overlay_height(&view(&[], false)), 3);
        assert_eq!(overlay_height(&view(&items[..2], false)), 4);
        assert_eq!(overlay_height(&view(&items, false)), 7);
        assert_eq!(overlay_height(&view(&items, true)), 8);

        let mut medium = view(&items, false);
        medium.list_size = ListSize::Medium;
        medium.button_name = Some("New");
        assert_eq!(overlay_height(&medium), 13);
    }

    #[test]
    fn test_overlay_below_field() {
        let items = vec![Item::with_field("name", "oslo")];
        let screen = Rect::new(0, 0, 80, 24);
        let field = Rect::new(2, 1, 30, 3);

        assert_eq!(
            overlay_area(field, &view(&items, false), screen),
            Rect::new(2, 4, 30, 3)
        );
    }

    #[test]
    fn test_overlay_flips_above_field_near_bottom() {
        let items: Vec<Item> = (0..5).map(|i| Item::with_field("name", i)).collect();
        let screen = Rect::new(0, 0, 80, 24);
        let field = Rect::new(0, 19, 30, 3);

        assert_eq!(
            overlay_area(field, &view(&items, false), screen),
            Rect::new(0, 12, 30, 7)
        );
    }

    #[test]
    fn test_overlay_clipped_without_room() {
        let items: Vec<Item> = (0..5).map(|i| Item::with_field("name", i)).collect();
        let screen = Rect::new(0, 0, 40, 8);
        let field = Rect::new(0, 2, 30, 3);

        assert_eq!(
            overlay_area(field, &view(&items, false), screen),
            Rect::new(0, 5, 30, 3)
        );
    }

    #[test]
    fn test_item_at_maps_rows_to_items() {
        let items: Vec<Item> = (0..8).map(|i| Item::with_field("name", i)).collect();
        let area = Rect::new(0, 4, 30, 7);
        let mut view = view(&items, false);

        assert_eq!(item_at(&view, area, 3, 5), Some(0));
        assert_eq!(item_at(&view, area, 3, 9), Some(4));
        assert_eq!(item_at(&view, area, 0, 5), None);
        assert_eq!(item_at(&view, area, 3, 4), None);
        assert_eq!(item_at(&view, area, 3, 10), None);

        view.active_index = Some(6);
        assert_eq!(item_at(&view, area, 3, 5), Some(2));

        view.loading = true;
        assert_eq!(item_at(&view, area, 3, 5), None);
        assert_eq!(item_at(&view, area, 3, 6), Some(2));
    }
}
