//! Rectangle helpers shared by the strip, the handles and the content
//! region.

use ratatui::prelude::Rect;

/// Split `area` into a header band of `header_height` rows and the rest.
///
/// The header is clamped to the area, so a host squeezed to fewer rows than
/// the strip wants shows only the strip.
pub fn split_header(area: Rect, header_height: u16) -> (Rect, Rect) {
    let header_height = header_height.min(area.height);
    let header = Rect {
        height: header_height,
        ..area
    };
    let body = Rect {
        y: area.y.saturating_add(header_height),
        height: area.height - header_height,
        ..area
    };
    (header, body)
}

/// Place a child inside `parent`: offset by `margin` from the top-left and
/// shrunk by `total` in both dimensions.
pub fn inset(parent: Rect, margin: u16, total: u16) -> Rect {
    Rect {
        x: parent.x.saturating_add(margin),
        y: parent.y.saturating_add(margin),
        width: parent.width.saturating_sub(total),
        height: parent.height.saturating_sub(total),
    }
}

/// Translate a screen position into coordinates local to `rect`, if inside.
pub fn to_local(rect: Rect, column: u16, row: u16) -> Option<(u16, u16)> {
    rect_contains(rect, column, row).then(|| (column - rect.x, row - rect.y))
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::prelude::Rect;

    #[test]
    fn split_header_basic() {
        let area = Rect::new(0, 0, 20, 10);
        let (header, body) = split_header(area, 1);
        assert_eq!(header, Rect::new(0, 0, 20, 1));
        assert_eq!(body, Rect::new(0, 1, 20, 9));
    }

    #[test]
    fn split_header_clamps_to_area() {
        let area = Rect::new(3, 4, 20, 1);
        let (header, body) = split_header(area, 2);
        assert_eq!(header.height, 1);
        assert_eq!(body.height, 0);
    }

    #[test]
    fn inset_subtracts_total_from_size() {
        let r = inset(Rect::new(0, 1, 40, 20), 2, 6);
        assert_eq!(r, Rect::new(2, 3, 34, 14));
        let tiny = inset(Rect::new(0, 0, 4, 4), 2, 6);
        assert_eq!((tiny.width, tiny.height), (0, 0));
    }

    #[test]
    fn to_local_translates_inside_points() {
        let r = Rect::new(5, 2, 4, 1);
        assert_eq!(to_local(r, 6, 2), Some((1, 0)));
        assert_eq!(to_local(r, 9, 2), None);
    }

    #[test]
    fn rect_contains_edge_cases() {
        let r = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(r, 0, 0));
        let r2 = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r2, 1, 1));
        assert!(!rect_contains(r2, 4, 1));
    }
}
