//! The tab host: a strip row on top, a content region below it showing the
//! child widget of the selected page.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{Event, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::events::{EventChannel, SubscriptionId};
use super::page::TabPage;
use super::strip::{StripOutcome, TabStrip};
use super::PageId;
use crate::components::{Anchor, ComponentContext, ContentWidget, RegionId};
use crate::constants::{CONTENT_INSET, CONTENT_MARGIN};
use crate::error::TabError;
use crate::layout::{inset, rect_contains, split_header};
use crate::ui::UiFrame;

static NEXT_REGION_ID: AtomicU64 = AtomicU64::new(1);

/// Frame drawn around the content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BorderStyle {
    None,
    #[default]
    Single,
    Double,
    Rounded,
}

impl BorderStyle {
    pub fn block(self) -> Option<Block<'static>> {
        let border_type = match self {
            BorderStyle::None => return None,
            BorderStyle::Single => BorderType::Plain,
            BorderStyle::Double => BorderType::Double,
            BorderStyle::Rounded => BorderType::Rounded,
        };
        Some(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(crate::theme::region_border())),
        )
    }

    /// Next style in declaration order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            BorderStyle::None => BorderStyle::Single,
            BorderStyle::Single => BorderStyle::Double,
            BorderStyle::Double => BorderStyle::Rounded,
            BorderStyle::Rounded => BorderStyle::None,
        }
    }
}

/// The area below the strip. It remembers which page's child it currently
/// shows by id only.
#[derive(Debug, Clone)]
pub struct ContentRegion {
    id: RegionId,
    bounds: Rect,
    background: Color,
    border: BorderStyle,
    shown: Option<PageId>,
}

impl ContentRegion {
    fn new() -> Self {
        Self {
            id: RegionId(NEXT_REGION_ID.fetch_add(1, Ordering::Relaxed)),
            bounds: Rect::default(),
            background: crate::theme::control_face(),
            border: BorderStyle::default(),
            shown: None,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    /// Page whose child is parented into the region and visible.
    pub fn shown(&self) -> Option<PageId> {
        self.shown
    }

    /// Bounds given to a child shown in this region.
    pub fn child_bounds(&self) -> Rect {
        inset(self.bounds, CONTENT_MARGIN, CONTENT_INSET)
    }

    /// Parent, size, anchor and reveal the child of page `id`.
    fn show(&mut self, id: PageId, child: &mut dyn ContentWidget) {
        child.set_parent(Some(self.id));
        child.set_bounds(self.child_bounds());
        child.set_anchor(Anchor::ALL);
        child.set_visible(true);
        self.shown = Some(id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Empty,
    /// Tabs exist but none is selected, e.g. right after the selected tab
    /// was closed.
    HasTabsNoneSelected,
    HasTabSelected,
}

pub struct TabHost {
    strip: TabStrip,
    region: ContentRegion,
    area: Rect,
    selected: Option<PageId>,
    selection_changed: EventChannel<Option<PageId>>,
    dirty: bool,
}

impl fmt::Debug for TabHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabHost")
            .field("strip", &self.strip)
            .field("region", &self.region)
            .field("selected", &self.selected)
            .finish()
    }
}

impl Default for TabHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TabHost {
    pub fn new() -> Self {
        Self::with_strip(TabStrip::new())
    }

    /// Build a host around a preconfigured strip (density, sizing, height).
    pub fn with_strip(strip: TabStrip) -> Self {
        Self {
            strip,
            region: ContentRegion::new(),
            area: Rect::default(),
            selected: None,
            selection_changed: EventChannel::new(),
            dirty: true,
        }
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn region(&self) -> &ContentRegion {
        &self.region
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Insert `page` at the front. The first page added to an empty host is
    /// selected; later pages are not.
    pub fn add_tab_page(&mut self, page: TabPage) -> PageId {
        let id = self.strip.add_page(page);
        if self.strip.tab_count() == 1 {
            self.set_selected_index(0);
        }
        self.dirty = true;
        id
    }

    /// Remove and dispose the page with identity `id`. No replacement is
    /// selected when it was the selected page.
    pub fn remove_tab_page(&mut self, id: PageId) -> Result<bool, TabError> {
        if self.region.shown == Some(id) {
            self.region.shown = None;
        }
        let removed = self.strip.remove_page(id);
        self.sync_selection_after_removal();
        removed
    }

    pub fn remove_tab_page_at(&mut self, index: usize) -> Result<bool, TabError> {
        match self.strip.get_page(index).map(TabPage::id) {
            Some(id) => self.remove_tab_page(id),
            None => Ok(false),
        }
    }

    /// Remove and dispose every page.
    pub fn close_all(&mut self) -> Result<(), TabError> {
        self.region.shown = None;
        let cleared = self.strip.clear();
        self.sync_selection_after_removal();
        cleared
    }

    fn sync_selection_after_removal(&mut self) {
        if let Some(id) = self.selected
            && self.strip.index_of(id).is_none()
        {
            tracing::debug!(page = %id, "selected tab removed, nothing selected");
            self.selected = None;
            self.region.shown = None;
            self.region.background = crate::theme::control_face();
            self.selection_changed.emit(&None);
        }
        self.dirty = true;
    }

    /// Positional lookup.
    ///
    /// # Panics
    ///
    /// Panics if `index >= tab_count()`.
    pub fn tab_page(&self, index: usize) -> &TabPage {
        self.strip.page(index)
    }

    pub fn get_tab_page(&self, index: usize) -> Option<&TabPage> {
        self.strip.get_page(index)
    }

    pub fn tab_page_by_id(&self, id: PageId) -> Option<&TabPage> {
        self.strip.page_by_id(id)
    }

    /// Swap the child widget of page `id`. On the shown page the old child
    /// leaves the content region and the new one is shown in its place.
    ///
    /// Returns the previous child, hidden and detached but not disposed. An
    /// id that is not attached hands `child` back.
    pub fn replace_tab_child(
        &mut self,
        id: PageId,
        child: Option<Box<dyn ContentWidget>>,
    ) -> Option<Box<dyn ContentWidget>> {
        let Some(page) = self.strip.page_by_id_mut(id) else {
            return child;
        };
        let mut previous = page.replace_child(child);
        if let Some(old) = previous.as_deref_mut() {
            old.set_visible(false);
            old.set_parent(None);
        }
        if self.region.shown == Some(id) {
            self.region.shown = None;
        }
        if self.selected == Some(id)
            && let Some(fresh) = page.child_mut()
        {
            self.region.show(id, fresh);
        }
        tracing::debug!(page = %id, shown = ?self.region.shown, "tab child replaced");
        self.dirty = true;
        previous
    }

    pub fn tab_count(&self) -> usize {
        self.strip.tab_count()
    }

    pub fn selected_tab(&self) -> Option<&TabPage> {
        self.selected.and_then(|id| self.strip.page_by_id(id))
    }

    pub fn selected_tab_id(&self) -> Option<PageId> {
        self.selected
    }

    /// Show the page `target`, or nothing for `None`.
    ///
    /// The previously shown child is hidden, never disposed. An id that is
    /// not attached to this host is ignored and `false` is returned.
    pub fn set_selected_tab(&mut self, target: Option<PageId>) -> bool {
        if let Some(id) = target
            && self.strip.index_of(id).is_none()
        {
            return false;
        }

        self.hide_shown();
        let previous = self.selected;
        self.selected = target;
        self.strip.set_selected_page(target);
        self.dirty = true;

        if let Some(id) = target
            && let Some(page) = self.strip.page_by_id_mut(id)
        {
            self.region.background = page.background();
            if let Some(child) = page.child_mut() {
                self.region.show(id, child);
            }
        }

        if previous != target {
            tracing::debug!(from = ?previous, to = ?target, "tab selection changed");
            self.selection_changed.emit(&target);
        }
        true
    }

    fn hide_shown(&mut self) {
        if let Some(id) = self.region.shown.take()
            && let Some(child) = self.strip.page_by_id_mut(id).and_then(TabPage::child_mut)
        {
            child.set_visible(false);
        }
    }

    fn shown_child_mut(&mut self) -> Option<&mut (dyn ContentWidget + 'static)> {
        let id = self.region.shown?;
        self.strip.page_by_id_mut(id)?.child_mut()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.strip.index_of(id))
    }

    /// Select the page at `index`; out of range is ignored.
    pub fn set_selected_index(&mut self, index: usize) {
        self.try_set_selected_index(index);
    }

    /// Like [`TabHost::set_selected_index`], reporting whether `index` was
    /// in range.
    pub fn try_set_selected_index(&mut self, index: usize) -> bool {
        match self.strip.get_page(index).map(TabPage::id) {
            Some(id) => self.set_selected_tab(Some(id)),
            None => false,
        }
    }

    pub fn border_style(&self) -> BorderStyle {
        self.region.border
    }

    pub fn set_border_style(&mut self, border: BorderStyle) {
        if self.region.border != border {
            self.region.border = border;
            self.dirty = true;
        }
    }

    /// Change a page's caption and its handle label together.
    pub fn set_tab_text<T: Into<String>>(&mut self, id: PageId, text: T) -> bool {
        let changed = self.strip.relabel(id, text);
        self.dirty |= changed;
        changed
    }

    pub fn state(&self) -> HostState {
        match (self.strip.is_empty(), self.selected) {
            (true, _) => HostState::Empty,
            (false, None) => HostState::HasTabsNoneSelected,
            (false, Some(_)) => HostState::HasTabSelected,
        }
    }

    pub fn on_tab_closed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TabPage) + 'static,
    {
        self.strip.on_tab_closed(callback)
    }

    pub fn on_selection_changed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Option<PageId>) + 'static,
    {
        self.selection_changed.subscribe(callback)
    }

    pub fn unsubscribe_selection_changed(&mut self, id: SubscriptionId) -> bool {
        self.selection_changed.unsubscribe(id)
    }

    /// Lay the host out in `area`: the strip takes the top rows, the content
    /// region the rest. A shown child follows the region through its anchor.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        let (header, body) = split_header(area, self.strip.height());
        self.strip.set_bounds(header);
        let old = self.region.bounds;
        self.region.bounds = body;
        let fresh = self.region.child_bounds();
        if let Some(child) = self.shown_child_mut() {
            let anchor = child.anchor();
            let bounds = if anchor == Anchor::ALL {
                fresh
            } else {
                anchor.reflow(child.bounds(), old, body)
            };
            child.set_bounds(bounds);
        }
        self.dirty = true;
    }

    /// Route an input event. Pointer events over the strip go to the strip,
    /// everything else to the shown child. Returns whether it was consumed.
    pub fn handle_event(&mut self, event: &Event) -> Result<bool, TabError> {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(..) => Ok(false),
            _ => Ok(self.forward_to_child(event, None)),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Result<bool, TabError> {
        if !self.strip.contains(mouse.column, mouse.row) {
            self.strip.clear_hover();
            let pointer = Some((mouse.column, mouse.row));
            let inside = self
                .shown_child_mut()
                .is_some_and(|c| rect_contains(c.bounds(), mouse.column, mouse.row));
            return Ok(inside && self.forward_to_child(&Event::Mouse(*mouse), pointer));
        }

        let outcome = self.strip.handle_mouse(mouse);
        if let Ok(Some(StripOutcome::Selected(id))) = outcome {
            self.set_selected_tab(Some(id));
        }
        if matches!(outcome, Ok(Some(StripOutcome::Closed(_))) | Err(_)) {
            self.sync_selection_after_removal();
        }
        let outcome = outcome?;
        Ok(outcome.is_some() || matches!(mouse.kind, MouseEventKind::Down(_)))
    }

    fn forward_to_child(&mut self, event: &Event, pointer: Option<(u16, u16)>) -> bool {
        let ctx = ComponentContext::new(true).with_pointer(pointer);
        self.shown_child_mut()
            .is_some_and(|child| child.handle_event(event, &ctx))
    }

    /// Return and clear the pending redraw request of the host and its strip.
    pub fn take_redraw(&mut self) -> bool {
        let strip = self.strip.take_redraw();
        std::mem::take(&mut self.dirty) | strip
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area != self.area {
            self.resize(area);
        }
        self.strip.render(frame);

        let body = self.region.bounds;
        frame.fill(body, Style::default().bg(self.region.background));
        if let Some(block) = self.region.border.block() {
            frame.render_widget(block.style(Style::default().bg(self.region.background)), body);
        }
        if let Some(child) = self.shown_child_mut() {
            let bounds = child.bounds();
            child.render(frame, bounds, &ComponentContext::new(true));
        }
        self.dirty = false;
    }
}
