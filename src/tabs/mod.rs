//! Closable tab container.
//!
//! The subsystem is split leaf-first:
//!
//! - [`TabPage`]: caption, background color and the child widget it owns.
//! - [`TabHandle`]: one clickable header cell (caption + close glyph).
//! - [`TabStrip`]: the ordered handle/page pairs, newest first.
//! - [`TabHost`]: the strip plus a content region showing the selected page.
//!
//! Layout flows top-down (`TabHost::resize` -> strip placements -> child
//! bounds); input flows bottom-up (handle hit-test -> strip -> host).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod events;
pub mod handle;
pub mod host;
pub mod layout;
pub mod metrics;
pub mod page;
pub mod strip;

pub use events::{EventChannel, SubscriptionId};
pub use handle::{HandleEvent, HandleVisual, TabHandle};
pub use host::{BorderStyle, ContentRegion, HostState, TabHost};
pub use layout::{HandlePlacement, layout_handles};
pub use metrics::{
    CellMeasure, DisplayDensity, FixedDensity, ScaledMetrics, TabMetrics, TabSizing, TextMeasure,
};
pub use page::TabPage;
pub use strip::{StripOutcome, TabStrip};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a [`TabPage`].
///
/// Every page gets a fresh id at construction, so two pages with identical
/// captions are still distinct. Handles, the strip selection and the content
/// region refer to pages only through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(u64);

impl PageId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}
