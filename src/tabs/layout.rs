//! Pure layout of tab handles.
//!
//! Given handle widths in strip order and the strip bounds, compute where
//! each handle goes. The strip calls this after every insertion, removal,
//! relabel or resize and caches the result for hit-testing and painting.

use ratatui::layout::Rect;

use super::PageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlePlacement {
    pub page: PageId,
    /// Full handle rectangle. It may extend past the strip's right edge.
    pub rect: Rect,
    /// Part of `rect` inside the strip bounds; empty when the handle is
    /// scrolled off entirely.
    pub visible: Rect,
}

/// Lay handles out left-to-right starting at `bounds.x`, each `bounds.height`
/// rows tall.
pub fn layout_handles<I>(handles: I, bounds: Rect) -> Vec<HandlePlacement>
where
    I: IntoIterator<Item = (PageId, u16)>,
{
    let mut x = bounds.x;
    handles
        .into_iter()
        .map(|(page, width)| {
            let rect = Rect {
                x,
                y: bounds.y,
                width,
                height: bounds.height,
            };
            x = x.saturating_add(width);
            HandlePlacement {
                page,
                rect,
                visible: rect.intersection(bounds),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> PageId {
        PageId::from_raw(raw)
    }

    #[test]
    fn handles_are_packed_left_to_right() {
        let bounds = Rect::new(2, 0, 40, 1);
        let placements = layout_handles([(id(1), 5), (id(2), 7), (id(3), 3)], bounds);
        let xs: Vec<u16> = placements.iter().map(|p| p.rect.x).collect();
        assert_eq!(xs, vec![2, 7, 14]);
        assert!(placements.iter().all(|p| p.rect.height == 1));
    }

    #[test]
    fn overflowing_handles_are_clipped() {
        let bounds = Rect::new(0, 0, 10, 1);
        let placements = layout_handles([(id(1), 8), (id(2), 8), (id(3), 8)], bounds);
        assert_eq!(placements[0].visible.width, 8);
        assert_eq!(placements[1].visible.width, 2);
        assert_eq!(placements[2].visible.width, 0);
        assert_eq!(placements[2].rect.width, 8);
    }

    #[test]
    fn empty_strip_has_no_placements() {
        assert!(layout_handles(Vec::new(), Rect::new(0, 0, 10, 1)).is_empty());
    }
}
