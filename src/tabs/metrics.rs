//! Caption measurement, display density and the scaled handle metrics that
//! layout, hit-testing and painting all share.

use std::fmt;
use std::str::FromStr;

use ratatui::layout::Rect;

use crate::constants::{
    CAPTION_LEFT_MARGIN, CLOSE_GLYPH_HEIGHT, CLOSE_GLYPH_LEFT_MARGIN, CLOSE_GLYPH_RIGHT_MARGIN,
    CLOSE_GLYPH_WIDTH, MIN_SCALE_FACTOR,
};
use crate::error::TabError;
use crate::ui::display_width;

/// Text measurement service used to size tab handles.
pub trait TextMeasure {
    /// Width of `text` in cells, as rendered with the strip's font.
    fn measure(&self, text: &str) -> f32;
}

/// Measures captions by their terminal display width.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> f32 {
        display_width(text) as f32
    }
}

/// Display density query. The returned factor multiplies every fixed
/// metric constant.
pub trait DisplayDensity {
    fn scale_factor(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDensity(pub f32);

impl FixedDensity {
    /// Density for a display running at `dpi`, relative to the 96 dpi
    /// baseline.
    pub fn from_dpi(dpi: u32) -> Self {
        Self(dpi as f32 / 96.0)
    }
}

impl Default for FixedDensity {
    fn default() -> Self {
        Self(1.0)
    }
}

impl DisplayDensity for FixedDensity {
    fn scale_factor(&self) -> f32 {
        self.0
    }
}

/// How the caption portion of a handle is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabSizing {
    /// Caption area is as wide as the measured label.
    #[default]
    Fit,
    /// Caption area is a fixed number of cells (before scaling); longer
    /// labels are truncated when painted.
    Fixed(u16),
}

impl TabSizing {
    pub fn caption_width(self, label: &str, measure: &dyn TextMeasure, scale: f32) -> f32 {
        match self {
            TabSizing::Fit => measure.measure(label),
            TabSizing::Fixed(cells) => cells as f32 * scale,
        }
    }
}

impl FromStr for TabSizing {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("fit") {
            return Ok(TabSizing::Fit);
        }
        if let Some(rest) = trimmed.strip_prefix("fixed:")
            && let Ok(cells) = rest.trim().parse::<u16>()
            && cells > 0
        {
            return Ok(TabSizing::Fixed(cells));
        }
        Err(TabError::UnknownSizingMode(s.to_string()))
    }
}

impl fmt::Display for TabSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabSizing::Fit => write!(f, "fit"),
            TabSizing::Fixed(cells) => write!(f, "fixed:{}", cells),
        }
    }
}

/// Unscaled handle metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabMetrics {
    pub caption_left: u16,
    pub close_width: u16,
    pub close_height: u16,
    pub close_left: u16,
    pub close_right: u16,
}

impl Default for TabMetrics {
    fn default() -> Self {
        Self {
            caption_left: CAPTION_LEFT_MARGIN,
            close_width: CLOSE_GLYPH_WIDTH,
            close_height: CLOSE_GLYPH_HEIGHT,
            close_left: CLOSE_GLYPH_LEFT_MARGIN,
            close_right: CLOSE_GLYPH_RIGHT_MARGIN,
        }
    }
}

impl TabMetrics {
    /// Multiply every constant by `scale` (truncating, never below
    /// `MIN_SCALE_FACTOR`). A non-zero constant keeps at least one cell so
    /// the close glyph stays clickable on low-density displays.
    pub fn resolve(&self, scale: f32) -> ScaledMetrics {
        let scale = if scale.is_finite() {
            scale.max(MIN_SCALE_FACTOR)
        } else {
            1.0
        };
        let s = |v: u16| match v {
            0 => 0,
            v => ((v as f32 * scale) as u16).max(1),
        };
        ScaledMetrics {
            scale,
            caption_left: s(self.caption_left),
            close_width: s(self.close_width),
            close_height: s(self.close_height),
            close_left: s(self.close_left),
            close_right: s(self.close_right),
        }
    }
}

/// Metrics after density scaling. Handles keep a copy, and the same copy
/// drives width computation, the close glyph rectangle and painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledMetrics {
    pub scale: f32,
    pub caption_left: u16,
    pub close_width: u16,
    pub close_height: u16,
    pub close_left: u16,
    pub close_right: u16,
}

impl Default for ScaledMetrics {
    fn default() -> Self {
        TabMetrics::default().resolve(1.0)
    }
}

impl ScaledMetrics {
    /// Total handle width for a caption of `caption_width` cells.
    pub fn handle_width(&self, caption_width: f32) -> u16 {
        let chrome = self.caption_left as f32
            + self.close_width as f32
            + self.close_left as f32
            + self.close_right as f32;
        (caption_width + chrome).round().clamp(0.0, u16::MAX as f32) as u16
    }

    /// Close glyph box in handle-local coordinates: right-aligned with the
    /// right margin, vertically centered, clamped to the handle height.
    pub fn close_glyph_rect(&self, width: u16, height: u16) -> Rect {
        let x = width.saturating_sub(self.close_width.saturating_add(self.close_right));
        let y = (height / 2).saturating_sub(self.close_height / 2);
        Rect {
            x,
            y,
            width: self.close_width.min(width.saturating_sub(x)),
            height: self.close_height.min(height.saturating_sub(y)),
        }
    }

    /// Width left for the caption once margins and the close glyph are
    /// taken out of a handle `width` cells wide.
    pub fn caption_room(&self, width: u16) -> u16 {
        width
            .saturating_sub(self.caption_left)
            .saturating_sub(self.close_left)
            .saturating_sub(self.close_width)
            .saturating_sub(self.close_right)
    }
}
