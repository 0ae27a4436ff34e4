//! One tab's header cell: caption on the left, close glyph on the right.
//!
//! A handle is purely presentational. It knows the id of the page it stands
//! for but never owns it; clicks are reported through its two event channels
//! and the strip decides what they mean.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::PageId;
use super::events::{EventChannel, SubscriptionId};
use super::metrics::{ScaledMetrics, TabSizing, TextMeasure};
use crate::constants::CLOSE_GLYPH;
use crate::layout::rect_contains;
use crate::ui::UiFrame;

/// What a click on a handle means. Exactly one per click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEvent {
    Selected(PageId),
    CloseRequested(PageId),
}

/// Visual state handed to the paint routine.
///
/// `close_hot` is tracked separately from `hovered`: the pointer can be over
/// the handle without being over the close glyph, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleVisual {
    pub selected: bool,
    pub hovered: bool,
    pub close_hot: bool,
}

impl HandleVisual {
    pub fn body_style(&self) -> Style {
        if self.selected {
            Style::default()
                .bg(crate::theme::tab_selected_bg())
                .fg(crate::theme::tab_selected_fg())
                .add_modifier(Modifier::BOLD)
        } else if self.hovered {
            Style::default()
                .bg(crate::theme::tab_hot_bg())
                .fg(crate::theme::tab_hot_fg())
        } else {
            Style::default()
                .bg(crate::theme::tab_bg())
                .fg(crate::theme::tab_fg())
        }
    }

    pub fn close_style(&self) -> Style {
        if self.close_hot {
            Style::default()
                .bg(crate::theme::close_hot_bg())
                .fg(crate::theme::close_hot_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            self.body_style().fg(crate::theme::close_fg())
        }
    }
}

#[derive(Debug)]
pub struct TabHandle {
    page: PageId,
    label: String,
    width: u16,
    height: u16,
    selected: bool,
    metrics: ScaledMetrics,
    sizing: TabSizing,
    /// Pointer position in handle-local cells while it is over the handle.
    pointer: Option<(u16, u16)>,
    needs_redraw: bool,
    selected_events: EventChannel<PageId>,
    close_events: EventChannel<PageId>,
}

impl TabHandle {
    pub fn new(
        page: PageId,
        label: &str,
        height: u16,
        metrics: ScaledMetrics,
        sizing: TabSizing,
        measure: &dyn TextMeasure,
    ) -> Self {
        let mut handle = Self {
            page,
            label: String::new(),
            width: 0,
            height,
            selected: false,
            metrics,
            sizing,
            pointer: None,
            needs_redraw: true,
            selected_events: EventChannel::new(),
            close_events: EventChannel::new(),
        };
        handle.set_label(label, measure);
        handle
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn metrics(&self) -> ScaledMetrics {
        self.metrics
    }

    /// Store `text` and recompute the handle width from its measured size.
    pub fn set_label(&mut self, text: &str, measure: &dyn TextMeasure) {
        self.label = text.to_string();
        self.update_width(measure);
        self.invalidate();
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.invalidate();
    }

    pub(crate) fn set_height(&mut self, height: u16) {
        if self.height != height {
            self.height = height;
            self.invalidate();
        }
    }

    pub(crate) fn set_metrics(
        &mut self,
        metrics: ScaledMetrics,
        sizing: TabSizing,
        measure: &dyn TextMeasure,
    ) {
        self.metrics = metrics;
        self.sizing = sizing;
        self.update_width(measure);
        self.invalidate();
    }

    fn update_width(&mut self, measure: &dyn TextMeasure) {
        let caption = self
            .sizing
            .caption_width(&self.label, measure, self.metrics.scale);
        self.width = self.metrics.handle_width(caption);
    }

    /// Close glyph rectangle in handle-local coordinates.
    pub fn close_glyph_rect(&self) -> Rect {
        self.metrics.close_glyph_rect(self.width, self.height)
    }

    pub fn contains(&self, point: (u16, u16)) -> bool {
        point.0 < self.width && point.1 < self.height
    }

    pub fn hit_test_close_glyph(&self, point: (u16, u16)) -> bool {
        rect_contains(self.close_glyph_rect(), point.0, point.1)
    }

    /// Report a primary click at handle-local `point`.
    pub fn on_click(&mut self, point: (u16, u16)) -> HandleEvent {
        if self.hit_test_close_glyph(point) {
            self.close_events.emit(&self.page);
            HandleEvent::CloseRequested(self.page)
        } else {
            self.selected_events.emit(&self.page);
            HandleEvent::Selected(self.page)
        }
    }

    /// Update hover tracking with a handle-local pointer position, or `None`
    /// when the pointer left the handle.
    pub fn set_pointer(&mut self, pointer: Option<(u16, u16)>) {
        let pointer = pointer.filter(|p| self.contains(*p));
        if self.visual_for(pointer) != self.visual_for(self.pointer) {
            self.invalidate();
        }
        self.pointer = pointer;
    }

    pub fn visual(&self) -> HandleVisual {
        self.visual_for(self.pointer)
    }

    fn visual_for(&self, pointer: Option<(u16, u16)>) -> HandleVisual {
        HandleVisual {
            selected: self.selected,
            hovered: pointer.is_some(),
            close_hot: pointer.is_some_and(|p| self.hit_test_close_glyph(p)),
        }
    }

    pub fn on_selected<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PageId) + 'static,
    {
        self.selected_events.subscribe(callback)
    }

    pub fn on_close_requested<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PageId) + 'static,
    {
        self.close_events.subscribe(callback)
    }

    pub fn unsubscribe_selected(&mut self, id: SubscriptionId) -> bool {
        self.selected_events.unsubscribe(id)
    }

    pub fn unsubscribe_close_requested(&mut self, id: SubscriptionId) -> bool {
        self.close_events.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.selected_events.len() + self.close_events.len()
    }

    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Paint the handle with its top-left corner at `origin`. Anything past
    /// the frame area is clipped.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, origin: (u16, u16)) {
        let area = Rect {
            x: origin.0,
            y: origin.1,
            width: self.width,
            height: self.height,
        };
        let visual = self.visual();
        let body = visual.body_style();
        frame.fill(area, body);

        let caption_x = area.x.saturating_add(self.metrics.caption_left);
        let caption_y = area.y.saturating_add(self.height.saturating_sub(1) / 2);
        let room = Rect {
            x: caption_x,
            y: area.y,
            width: self.metrics.caption_room(self.width),
            height: self.height,
        };
        frame.set_string(room, caption_x, caption_y, &self.label, body);

        let close = self.close_glyph_rect();
        let close_area = Rect {
            x: area.x.saturating_add(close.x),
            y: area.y.saturating_add(close.y),
            ..close
        };
        frame.fill(close_area, visual.close_style());
        let glyph_x = close_area
            .x
            .saturating_add(close_area.width.saturating_sub(1) / 2);
        let glyph_y = close_area
            .y
            .saturating_add(close_area.height.saturating_sub(1) / 2);
        frame.set_string(
            close_area,
            glyph_x,
            glyph_y,
            CLOSE_GLYPH,
            visual.close_style(),
        );
        self.needs_redraw = false;
    }
}
