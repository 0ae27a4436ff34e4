use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::error::WidgetError;
use crate::ui::UiFrame;

pub mod hosted;
pub mod label;
pub mod list;

pub use hosted::Hosted;
pub use label::LabelComponent;
pub use list::ListComponent;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

/// Identity of a content region a widget can be parented to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

/// Edges of the parent a widget stays attached to when the parent resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Anchor {
    pub const TOP_LEFT: Anchor = Anchor {
        left: true,
        top: true,
        right: false,
        bottom: false,
    };
    pub const ALL: Anchor = Anchor {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };

    /// Recompute `bounds` for a parent that changed from `old_parent` to
    /// `new_parent`, keeping the distance to every anchored edge constant.
    pub fn reflow(self, bounds: Rect, old_parent: Rect, new_parent: Rect) -> Rect {
        let dw = new_parent.width as i32 - old_parent.width as i32;
        let dh = new_parent.height as i32 - old_parent.height as i32;
        let mut x = bounds.x as i32 - old_parent.x as i32;
        let mut y = bounds.y as i32 - old_parent.y as i32;
        let mut w = bounds.width as i32;
        let mut h = bounds.height as i32;
        match (self.left, self.right) {
            (true, true) => w += dw,
            (false, true) => x += dw,
            (false, false) => x += dw / 2,
            (true, false) => {}
        }
        match (self.top, self.bottom) {
            (true, true) => h += dh,
            (false, true) => y += dh,
            (false, false) => y += dh / 2,
            (true, false) => {}
        }
        Rect {
            x: (new_parent.x as i32 + x).max(0) as u16,
            y: (new_parent.y as i32 + y).max(0) as u16,
            width: w.max(0) as u16,
            height: h.max(0) as u16,
        }
    }
}

/// Capability set of a widget embedded in a tab page.
///
/// The tab host never owns the widget: it parents, positions and shows the
/// widget owned by the selected page, and hides it again when another page is
/// selected. `dispose` is called exactly once, when the owning page is
/// removed or its strip is torn down.
pub trait ContentWidget: Component {
    fn set_parent(&mut self, parent: Option<RegionId>);
    fn parent(&self) -> Option<RegionId>;
    fn set_bounds(&mut self, bounds: Rect);
    fn bounds(&self) -> Rect;
    fn set_anchor(&mut self, anchor: Anchor);
    fn anchor(&self) -> Anchor;
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
    fn dispose(&mut self) -> Result<(), WidgetError>;
}
