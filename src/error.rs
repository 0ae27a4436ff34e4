//! Error types for the tab container.
//!
//! Invalid indices and unknown page ids are not errors: they resolve to
//! no-ops. What remains here are programming errors (unknown sizing modes)
//! and resource release failures, which callers are expected to propagate.

use thiserror::Error;

use crate::tabs::PageId;

/// Failure reported by a hosted widget while releasing its resources.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("widget was already disposed")]
    AlreadyDisposed,
    #[error("widget failed to release resources: {0}")]
    Release(String),
}

#[derive(Debug, Error)]
pub enum TabError {
    #[error("failed to dispose tab page {page:?} ({text:?}): {source}")]
    Dispose {
        page: PageId,
        text: String,
        #[source]
        source: WidgetError,
    },
    #[error("unknown tab sizing mode {0:?} (expected \"fit\" or \"fixed:<cells>\")")]
    UnknownSizingMode(String),
}
