//! Adapter that turns any [`Component`] into a [`ContentWidget`] a tab page
//! can own.

use crossterm::event::Event;
use ratatui::layout::Rect;

use super::{Anchor, Component, ComponentContext, ContentWidget, RegionId};
use crate::error::WidgetError;
use crate::ui::UiFrame;

type ReleaseHook<C> = Box<dyn FnMut(&mut C) -> Result<(), WidgetError>>;

pub struct Hosted<C> {
    inner: C,
    parent: Option<RegionId>,
    bounds: Rect,
    anchor: Anchor,
    visible: bool,
    disposed: bool,
    release: Option<ReleaseHook<C>>,
}

impl<C: Component> Hosted<C> {
    /// Wrap `inner`. New widgets start hidden and unparented, like a control
    /// that has been created but not yet placed in a container.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            parent: None,
            bounds: Rect::default(),
            anchor: Anchor::TOP_LEFT,
            visible: false,
            disposed: false,
            release: None,
        }
    }

    /// Run `hook` when the widget is disposed. An error returned by the hook
    /// is reported by `dispose`.
    pub fn with_release<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut C) -> Result<(), WidgetError> + 'static,
    {
        self.release = Some(Box::new(hook));
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<C: Component> Component for Hosted<C> {
    fn resize(&mut self, area: Rect, ctx: &ComponentContext) {
        if !self.disposed {
            self.inner.resize(area, ctx);
        }
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if self.visible && !self.disposed {
            self.inner.render(frame, area, ctx);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.visible && !self.disposed && self.inner.handle_event(event, ctx)
    }
}

impl<C: Component> ContentWidget for Hosted<C> {
    fn set_parent(&mut self, parent: Option<RegionId>) {
        self.parent = parent;
    }

    fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.inner.resize(bounds, &ComponentContext::default());
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    fn anchor(&self) -> Anchor {
        self.anchor
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible && !self.disposed;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn dispose(&mut self) -> Result<(), WidgetError> {
        if self.disposed {
            return Err(WidgetError::AlreadyDisposed);
        }
        self.disposed = true;
        self.visible = false;
        self.parent = None;
        match self.release.as_mut() {
            Some(hook) => hook(&mut self.inner),
            None => Ok(()),
        }
    }
}
