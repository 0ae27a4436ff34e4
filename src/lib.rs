//! Closable tab container for terminal user interfaces.
//!
//! A [`tabs::TabHost`] shows a row of tab handles with a close glyph on each
//! and, below it, the content widget of the selected [`tabs::TabPage`].

pub mod component_context;
pub mod components;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod tabs;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

pub use error::{TabError, WidgetError};
pub use tabs::{PageId, TabHost, TabPage, TabStrip};
