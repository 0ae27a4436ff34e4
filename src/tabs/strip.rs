//! The header strip: ordered handle/page pairs, newest first.
//!
//! The strip is a collection manager. It keeps handles and pages index
//! aligned, lays the handles out, turns pointer input into handle clicks and
//! remembers which page is highlighted. Choosing *which* page to show is the
//! host's job.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::events::{EventChannel, SubscriptionId};
use super::handle::{HandleEvent, TabHandle};
use super::layout::{HandlePlacement, layout_handles};
use super::metrics::{
    CellMeasure, DisplayDensity, FixedDensity, ScaledMetrics, TabMetrics, TabSizing, TextMeasure,
};
use super::page::TabPage;
use super::PageId;
use crate::constants::DEFAULT_STRIP_HEIGHT;
use crate::error::TabError;
use crate::layout::{rect_contains, to_local};
use crate::ui::UiFrame;

/// Result of routing one pointer event through the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripOutcome {
    /// A handle body was clicked; the strip highlight already points at it.
    Selected(PageId),
    /// A close glyph was clicked and the page has been removed and disposed.
    Closed(PageId),
}

struct Entry {
    handle: TabHandle,
    page: TabPage,
    selected_sub: SubscriptionId,
    close_sub: SubscriptionId,
}

pub struct TabStrip {
    entries: Vec<Entry>,
    selected: Option<PageId>,
    bounds: Rect,
    height: u16,
    base_metrics: TabMetrics,
    metrics: ScaledMetrics,
    sizing: TabSizing,
    measure: Box<dyn TextMeasure>,
    placements: Vec<HandlePlacement>,
    /// Handle events queued by the subscriptions made in `add_page`, drained
    /// once the click has returned.
    inbox: Rc<RefCell<VecDeque<HandleEvent>>>,
    tab_closed: EventChannel<TabPage>,
    any_tab_selected: EventChannel<()>,
    dirty: bool,
}

impl fmt::Debug for TabStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabStrip")
            .field("tabs", &self.entries.len())
            .field("selected", &self.selected)
            .field("bounds", &self.bounds)
            .field("sizing", &self.sizing)
            .finish()
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStrip {
    pub fn new() -> Self {
        let base_metrics = TabMetrics::default();
        Self {
            entries: Vec::new(),
            selected: None,
            bounds: Rect::default(),
            height: DEFAULT_STRIP_HEIGHT,
            base_metrics,
            metrics: base_metrics.resolve(FixedDensity::default().scale_factor()),
            sizing: TabSizing::Fit,
            measure: Box::new(CellMeasure),
            placements: Vec::new(),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            tab_closed: EventChannel::new(),
            any_tab_selected: EventChannel::new(),
            dirty: true,
        }
    }

    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self.remeasure();
        self
    }

    pub fn with_metrics(mut self, metrics: TabMetrics) -> Self {
        self.base_metrics = metrics;
        self.metrics = metrics.resolve(self.metrics.scale);
        self.remeasure();
        self
    }

    pub fn with_density(mut self, density: &dyn DisplayDensity) -> Self {
        self.set_density(density);
        self
    }

    pub fn with_sizing(mut self, sizing: TabSizing) -> Self {
        self.set_sizing(sizing);
        self
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.set_height(height);
        self
    }

    pub fn tab_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn metrics(&self) -> ScaledMetrics {
        self.metrics
    }

    pub fn sizing(&self) -> TabSizing {
        self.sizing
    }

    /// Wrap `page` in a new handle and insert the pair at the front.
    ///
    /// The new tab is not selected, unless the current selection already
    /// names this page.
    pub fn add_page(&mut self, page: TabPage) -> PageId {
        let id = page.id();
        let mut handle = TabHandle::new(
            id,
            page.text(),
            self.height,
            self.metrics,
            self.sizing,
            self.measure.as_ref(),
        );
        let inbox = Rc::clone(&self.inbox);
        let selected_sub = handle.on_selected(move |page| {
            inbox.borrow_mut().push_back(HandleEvent::Selected(*page));
        });
        let inbox = Rc::clone(&self.inbox);
        let close_sub = handle.on_close_requested(move |page| {
            inbox.borrow_mut().push_back(HandleEvent::CloseRequested(*page));
        });
        handle.set_selected(self.selected == Some(id));
        tracing::debug!(page = %id, text = page.text(), "adding tab");
        self.entries.insert(
            0,
            Entry {
                handle,
                page,
                selected_sub,
                close_sub,
            },
        );
        self.relayout();
        id
    }

    /// Remove the page with identity `id`. Returns `Ok(false)` when no such
    /// page is attached.
    pub fn remove_page(&mut self, id: PageId) -> Result<bool, TabError> {
        match self.index_of(id) {
            Some(index) => self.remove_page_at(index),
            None => Ok(false),
        }
    }

    /// Remove the tab at `index`. Out of range is a no-op returning
    /// `Ok(false)`.
    ///
    /// The pair leaves `entries` before the page is disposed, so even when
    /// disposal fails the strip stays consistent; the failure is returned and
    /// `TabClosed` is not fired.
    pub fn remove_page_at(&mut self, index: usize) -> Result<bool, TabError> {
        if index >= self.entries.len() {
            return Ok(false);
        }
        let Entry {
            mut handle,
            mut page,
            selected_sub,
            close_sub,
        } = self.entries.remove(index);
        handle.unsubscribe_selected(selected_sub);
        handle.unsubscribe_close_requested(close_sub);
        drop(handle);

        let id = page.id();
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.relayout();
        tracing::debug!(page = %id, index, text = page.text(), "removing tab");

        page.dispose()?;
        self.tab_closed.emit(&page);
        Ok(true)
    }

    /// Remove and dispose every page. All pages are released even if one
    /// fails; the first failure is returned.
    pub fn clear(&mut self) -> Result<(), TabError> {
        let mut first_err = None;
        while !self.entries.is_empty() {
            if let Err(err) = self.remove_page_at(0)
                && first_err.is_none()
            {
                first_err = Some(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Positional lookup.
    ///
    /// # Panics
    ///
    /// Panics if `index >= tab_count()`; use [`TabStrip::get_page`] when the
    /// index is not known to be valid.
    pub fn page(&self, index: usize) -> &TabPage {
        &self.entries[index].page
    }

    pub fn get_page(&self, index: usize) -> Option<&TabPage> {
        self.entries.get(index).map(|e| &e.page)
    }

    pub fn page_by_id(&self, id: PageId) -> Option<&TabPage> {
        self.entries.iter().find(|e| e.page.id() == id).map(|e| &e.page)
    }

    pub fn page_by_id_mut(&mut self, id: PageId) -> Option<&mut TabPage> {
        self.entries
            .iter_mut()
            .find(|e| e.page.id() == id)
            .map(|e| &mut e.page)
    }

    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.entries.iter().position(|e| e.page.id() == id)
    }

    pub fn pages(&self) -> impl Iterator<Item = &TabPage> {
        self.entries.iter().map(|e| &e.page)
    }

    pub fn handle(&self, index: usize) -> Option<&TabHandle> {
        self.entries.get(index).map(|e| &e.handle)
    }

    pub fn handles(&self) -> impl Iterator<Item = &TabHandle> {
        self.entries.iter().map(|e| &e.handle)
    }

    pub fn selected_page(&self) -> Option<PageId> {
        self.selected
    }

    /// Set the highlighted page and refresh every handle's selected flag.
    ///
    /// An id that is not attached is accepted; nothing is highlighted until a
    /// page with that id is added.
    pub fn set_selected_page(&mut self, selected: Option<PageId>) {
        self.selected = selected;
        for entry in &mut self.entries {
            let on = Some(entry.handle.page()) == selected;
            entry.handle.set_selected(on);
        }
        self.dirty = true;
    }

    /// Update the page text and the handle label together.
    pub fn relabel<T: Into<String>>(&mut self, id: PageId, text: T) -> bool {
        let text = text.into();
        let Some(entry) = self.entries.iter_mut().find(|e| e.page.id() == id) else {
            return false;
        };
        entry.handle.set_label(&text, self.measure.as_ref());
        entry.page.set_text(text);
        self.relayout();
        true
    }

    pub fn set_density(&mut self, density: &dyn DisplayDensity) {
        self.metrics = self.base_metrics.resolve(density.scale_factor());
        self.remeasure();
    }

    pub fn set_sizing(&mut self, sizing: TabSizing) {
        self.sizing = sizing;
        self.remeasure();
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
        for entry in &mut self.entries {
            entry.handle.set_height(self.height);
        }
        self.relayout();
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.relayout();
        }
    }

    fn remeasure(&mut self) {
        for entry in &mut self.entries {
            entry
                .handle
                .set_metrics(self.metrics, self.sizing, self.measure.as_ref());
        }
        self.relayout();
    }

    fn relayout(&mut self) {
        let row = Rect {
            height: self.height.min(self.bounds.height),
            ..self.bounds
        };
        let mut placements = layout_handles(
            self.entries
                .iter()
                .map(|e| (e.handle.page(), e.handle.width())),
            row,
        );
        for placement in &mut placements {
            placement.rect.height = self.height;
        }
        self.placements = placements;
        self.dirty = true;
    }

    pub fn placements(&self) -> &[HandlePlacement] {
        &self.placements
    }

    /// Handle rectangle of the tab at `index`, in screen coordinates.
    pub fn tab_rect(&self, index: usize) -> Option<Rect> {
        self.placements.get(index).map(|p| p.rect)
    }

    /// Close glyph rectangle of the tab at `index`, in screen coordinates.
    pub fn close_glyph_rect(&self, index: usize) -> Option<Rect> {
        let rect = self.tab_rect(index)?;
        let local = self.entries.get(index)?.handle.close_glyph_rect();
        Some(Rect {
            x: rect.x.saturating_add(local.x),
            y: rect.y.saturating_add(local.y),
            ..local
        })
    }

    /// Index of the tab whose visible part contains the screen position.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.placements
            .iter()
            .position(|p| rect_contains(p.visible, column, row))
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.bounds, column, row)
    }

    /// Route a pointer event. Moves update hover state; a left button press
    /// on a handle becomes a click.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> Result<Option<StripOutcome>, TabError> {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.update_hover(mouse.column, mouse.row);
                Ok(None)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.update_hover(mouse.column, mouse.row);
                let Some(index) = self.hit_test(mouse.column, mouse.row) else {
                    return Ok(None);
                };
                let rect = self.placements[index].rect;
                if let Some(local) = to_local(rect, mouse.column, mouse.row) {
                    self.entries[index].handle.on_click(local);
                }
                self.drain_inbox()
            }
            _ => Ok(None),
        }
    }

    /// Clear hover state, e.g. when the pointer left the host.
    pub fn clear_hover(&mut self) {
        for entry in &mut self.entries {
            entry.handle.set_pointer(None);
        }
    }

    fn update_hover(&mut self, column: u16, row: u16) {
        for (entry, placement) in self.entries.iter_mut().zip(&self.placements) {
            let local = rect_contains(placement.visible, column, row)
                .then(|| to_local(placement.rect, column, row))
                .flatten();
            entry.handle.set_pointer(local);
        }
    }

    /// Process handle events queued by the subscriptions made in `add_page`.
    fn drain_inbox(&mut self) -> Result<Option<StripOutcome>, TabError> {
        let mut outcome = None;
        loop {
            let Some(event) = self.inbox.borrow_mut().pop_front() else {
                break;
            };
            match event {
                HandleEvent::Selected(id) => {
                    self.set_selected_page(Some(id));
                    self.any_tab_selected.emit(&());
                    outcome = Some(StripOutcome::Selected(id));
                }
                HandleEvent::CloseRequested(id) => {
                    if self.remove_page(id)? {
                        outcome = Some(StripOutcome::Closed(id));
                    }
                }
            }
        }
        Ok(outcome)
    }

    pub fn on_tab_closed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TabPage) + 'static,
    {
        self.tab_closed.subscribe(callback)
    }

    pub fn unsubscribe_tab_closed(&mut self, id: SubscriptionId) -> bool {
        self.tab_closed.unsubscribe(id)
    }

    pub fn on_any_tab_selected<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&()) + 'static,
    {
        self.any_tab_selected.subscribe(callback)
    }

    pub fn unsubscribe_any_tab_selected(&mut self, id: SubscriptionId) -> bool {
        self.any_tab_selected.unsubscribe(id)
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Return and clear the pending redraw request of the strip and its
    /// handles.
    pub fn take_redraw(&mut self) -> bool {
        let mut redraw = std::mem::take(&mut self.dirty);
        for entry in &mut self.entries {
            redraw |= entry.handle.take_redraw();
        }
        redraw
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = self.bounds.intersection(frame.area());
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut strip = UiFrame::from_parts(area, frame.buffer_mut());
        strip.fill(area, Style::default().bg(crate::theme::strip_bg()));
        for (entry, placement) in self.entries.iter_mut().zip(&self.placements) {
            if placement.visible.width == 0 {
                continue;
            }
            entry
                .handle
                .render(&mut strip, (placement.rect.x, placement.rect.y));
        }
        self.dirty = false;
    }
}

impl Drop for TabStrip {
    fn drop(&mut self) {
        if let Err(err) = self.clear() {
            tracing::error!(error = %err, "failed to dispose tab pages during teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn strip() -> TabStrip {
        let mut s = TabStrip::new();
        s.set_bounds(Rect::new(0, 0, 80, 1));
        s
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn newest_page_goes_first() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        let b = s.add_page(TabPage::new("B"));
        assert_eq!(s.tab_count(), 2);
        assert_eq!(s.page(0).id(), b);
        assert_eq!(s.page(1).id(), a);
        assert_eq!(s.handle(0).map(|h| h.page()), Some(b));
        assert_eq!(s.tab_rect(0).map(|r| r.x), Some(0));
        assert_eq!(s.tab_rect(1).map(|r| r.x), s.handle(0).map(|h| h.width()));
    }

    #[test]
    fn add_does_not_select() {
        let mut s = strip();
        s.add_page(TabPage::new("A"));
        assert_eq!(s.selected_page(), None);
        assert!(s.handles().all(|h| !h.is_selected()));
    }

    #[test]
    fn selecting_an_absent_page_highlights_it_once_added() {
        let mut s = strip();
        let page = TabPage::new("later");
        let id = page.id();
        s.set_selected_page(Some(id));
        s.add_page(TabPage::new("other"));
        assert!(s.handles().all(|h| !h.is_selected()));
        s.add_page(page);
        assert!(s.handle(0).is_some_and(|h| h.is_selected()));
    }

    #[test]
    fn remove_by_identity_with_duplicate_text() {
        let mut s = strip();
        let first = s.add_page(TabPage::new("dup"));
        let second = s.add_page(TabPage::new("dup"));
        assert!(s.remove_page(first).unwrap());
        assert_eq!(s.tab_count(), 1);
        assert_eq!(s.page(0).id(), second);
        assert!(!s.remove_page(first).unwrap());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut s = strip();
        s.add_page(TabPage::new("A"));
        assert!(!s.remove_page_at(1).unwrap());
        assert!(!s.remove_page_at(usize::MAX).unwrap());
        assert_eq!(s.tab_count(), 1);
    }

    #[test]
    fn removing_selected_clears_selection() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        s.add_page(TabPage::new("B"));
        s.set_selected_page(Some(a));
        s.remove_page(a).unwrap();
        assert_eq!(s.selected_page(), None);
        assert!(s.handles().all(|h| !h.is_selected()));
    }

    #[test]
    fn tab_closed_fires_after_removal() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        s.on_tab_closed(move |page| log.borrow_mut().push((page.id(), page.text().to_string())));
        s.remove_page(a).unwrap();
        assert_eq!(*seen.borrow(), vec![(a, "A".to_string())]);
    }

    #[test]
    fn body_click_selects_and_notifies() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        let fired = Rc::new(RefCell::new(0));
        let f = fired.clone();
        s.on_any_tab_selected(move |_| *f.borrow_mut() += 1);
        let outcome = s.handle_mouse(&click(1, 0)).unwrap();
        assert_eq!(outcome, Some(StripOutcome::Selected(a)));
        assert_eq!(s.selected_page(), Some(a));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn close_glyph_click_removes_tab() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        let close = s.close_glyph_rect(0).unwrap();
        let outcome = s.handle_mouse(&click(close.x, close.y)).unwrap();
        assert_eq!(outcome, Some(StripOutcome::Closed(a)));
        assert!(s.is_empty());
        assert!(s.placements().is_empty());
    }

    #[test]
    fn close_glyph_stays_clickable_at_half_density() {
        let mut s = TabStrip::new().with_density(&FixedDensity(0.5));
        s.set_bounds(Rect::new(0, 0, 80, 1));
        let files = s.add_page(TabPage::new("Files"));
        assert_eq!(s.handle(0).unwrap().width(), 9);
        let close = s.close_glyph_rect(0).unwrap();
        assert_eq!(close, Rect::new(7, 0, 1, 1));
        let outcome = s.handle_mouse(&click(close.x, close.y)).unwrap();
        assert_eq!(outcome, Some(StripOutcome::Closed(files)));
        assert!(s.is_empty());
    }

    #[test]
    fn inbox_is_empty_after_each_click() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        s.handle_mouse(&click(1, 0)).unwrap();
        assert!(s.inbox.borrow().is_empty());
        assert_eq!(s.selected_page(), Some(a));
        let close = s.close_glyph_rect(0).unwrap();
        s.handle_mouse(&click(close.x, close.y)).unwrap();
        assert!(s.inbox.borrow().is_empty());
    }

    #[test]
    fn click_past_last_tab_does_nothing() {
        let mut s = strip();
        s.add_page(TabPage::new("A"));
        assert_eq!(s.handle_mouse(&click(70, 0)).unwrap(), None);
        assert_eq!(s.selected_page(), None);
    }

    #[test]
    fn relabel_resizes_handle_and_shifts_neighbours() {
        let mut s = strip();
        s.add_page(TabPage::new("A"));
        let b = s.add_page(TabPage::new("B"));
        let before = s.tab_rect(1).unwrap().x;
        assert!(s.relabel(b, "Bigger"));
        assert_eq!(s.page(0).text(), "Bigger");
        assert_eq!(s.tab_rect(1).unwrap().x, before + 5);
    }

    #[test]
    fn page_text_change_alone_keeps_label() {
        let mut s = strip();
        let a = s.add_page(TabPage::new("A"));
        if let Some(page) = s.page_by_id_mut(a) {
            page.set_text("Renamed");
        }
        assert_eq!(s.handle(0).map(|h| h.label()), Some("A"));
    }

    #[test]
    fn density_change_rescales_handles() {
        let mut s = strip();
        s.add_page(TabPage::new("abc"));
        let narrow = s.handle(0).unwrap().width();
        s.set_density(&FixedDensity(2.0));
        assert_eq!(s.handle(0).unwrap().width(), narrow + 4);
    }

    #[test]
    fn strip_subscribes_to_both_handle_channels() {
        let mut s = strip();
        s.add_page(TabPage::new("A"));
        assert_eq!(s.handle(0).unwrap().subscriber_count(), 2);
    }

    #[test]
    fn hover_follows_pointer() {
        let mut s = strip();
        s.add_page(TabPage::new("A"));
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..click(1, 0)
        };
        s.handle_mouse(&moved).unwrap();
        assert!(s.handle(0).unwrap().visual().hovered);
        s.clear_hover();
        assert!(!s.handle(0).unwrap().visual().hovered);
    }
}
