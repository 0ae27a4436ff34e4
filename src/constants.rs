//! Shared crate-wide constants.
//!
//! All sizes are expressed in terminal cells at a density scale of `1.0`.
//! Tab handle metrics are multiplied by the active scale factor before use
//! (see `tabs::metrics::TabMetrics::resolve`).

/// Gap between a tab handle's left edge and the start of its caption.
pub const CAPTION_LEFT_MARGIN: u16 = 1;

/// Width of the close glyph box drawn at the right end of every tab handle.
pub const CLOSE_GLYPH_WIDTH: u16 = 1;

/// Height of the close glyph box. The box is vertically centered in the
/// handle, so with a one-row strip it occupies the whole row.
pub const CLOSE_GLYPH_HEIGHT: u16 = 1;

/// Gap between the end of the caption and the close glyph.
pub const CLOSE_GLYPH_LEFT_MARGIN: u16 = 1;

/// Gap between the close glyph and the handle's right edge.
pub const CLOSE_GLYPH_RIGHT_MARGIN: u16 = 1;

/// Symbol painted inside the close glyph box.
pub const CLOSE_GLYPH: &str = "×";

/// Default number of rows reserved for the tab strip above the content region.
pub const DEFAULT_STRIP_HEIGHT: u16 = 1;

/// Offset of a hosted child widget from the content region's top-left corner.
pub const CONTENT_MARGIN: u16 = 2;

/// Total amount subtracted from the content region's width and height when
/// sizing a hosted child widget.
///
/// Larger than `2 * CONTENT_MARGIN`; the extra cells on the trailing edges
/// keep the child clear of the region frame.
pub const CONTENT_INSET: u16 = 6;

/// Lower bound applied to density scale factors so a degenerate display query
/// cannot collapse every metric to zero.
pub const MIN_SCALE_FACTOR: f32 = 0.25;
