use std::fmt;

use ratatui::style::Color;

use super::PageId;
use crate::components::{Component, ContentWidget, Hosted};
use crate::error::TabError;

/// A page shown by the tab host: caption, background and the widget it owns.
pub struct TabPage {
    id: PageId,
    text: String,
    background: Color,
    child: Option<Box<dyn ContentWidget>>,
}

impl fmt::Debug for TabPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabPage")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("background", &self.background)
            .field("has_child", &self.child.is_some())
            .finish()
    }
}

impl TabPage {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            id: PageId::next(),
            text: text.into(),
            background: crate::theme::control_face(),
            child: None,
        }
    }

    /// Builder shortcut wrapping a plain component in [`Hosted`].
    pub fn with_component<C: Component + 'static>(self, component: C) -> Self {
        self.with_child(Box::new(Hosted::new(component)))
    }

    pub fn with_child(mut self, child: Box<dyn ContentWidget>) -> Self {
        self.child = Some(child);
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Changes the page text only. An attached handle keeps its current
    /// label until `TabStrip::relabel` is used.
    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        self.text = text.into();
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn child(&self) -> Option<&dyn ContentWidget> {
        self.child.as_deref()
    }

    pub fn child_mut(&mut self) -> Option<&mut (dyn ContentWidget + 'static)> {
        self.child.as_deref_mut()
    }

    /// Replace the child widget, returning the previous one undisposed.
    pub fn replace_child(
        &mut self,
        child: Option<Box<dyn ContentWidget>>,
    ) -> Option<Box<dyn ContentWidget>> {
        std::mem::replace(&mut self.child, child)
    }

    /// Hide and detach the child, then release it. The child is taken out of
    /// the page first, so a second call finds nothing left to release.
    pub fn dispose(&mut self) -> Result<(), TabError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        child.set_visible(false);
        child.set_parent(None);
        child.dispose().map_err(|source| TabError::Dispose {
            page: self.id,
            text: self.text.clone(),
            source,
        })
    }
}
