use ratatui::style::Color;

// Centralized theme colors for the tab strip and content region. Small
// helper functions rather than a theme engine: callers that want different
// colors set them per page (`TabPage::set_background`).

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);
pub const CONTROL_FACE_RGB: (u8, u8, u8) = (40, 44, 52);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

/// Default page background, the equivalent of a system "control" color.
pub fn control_face() -> Color {
    rgb_to_color(CONTROL_FACE_RGB)
}

// Strip
pub fn strip_bg() -> Color {
    Color::Black
}

// Tab handle
pub fn tab_bg() -> Color {
    Color::DarkGray
}
pub fn tab_fg() -> Color {
    Color::White
}
pub fn tab_hot_bg() -> Color {
    Color::Gray
}
pub fn tab_hot_fg() -> Color {
    Color::Black
}
pub fn tab_selected_bg() -> Color {
    Color::Blue
}
pub fn tab_selected_fg() -> Color {
    Color::White
}

// Close glyph
pub fn close_fg() -> Color {
    Color::Gray
}
pub fn close_hot_bg() -> Color {
    Color::Red
}
pub fn close_hot_fg() -> Color {
    Color::White
}

// Content region frame
pub fn region_border() -> Color {
    Color::DarkGray
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn accent_is_rgb() {
        assert_eq!(accent(), Color::Rgb(200, 100, 0));
    }

    #[test]
    fn hot_and_selected_fills_differ() {
        assert_ne!(tab_hot_bg(), tab_selected_bg());
        assert_ne!(tab_bg(), tab_hot_bg());
    }
}
