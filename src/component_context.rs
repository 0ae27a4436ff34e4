//! Shared component rendering context
//!
//! `ComponentContext` carries UI metadata a hosted component may need while
//! rendering or handling events: whether it currently has keyboard focus and
//! where the pointer was last seen. Passing it explicitly keeps the
//! `Component` trait stable as the tab host grows new state.

/// Context passed to `Component` trait methods describing UI state.
///
/// - `focused`: whether the component receives keyboard input.
/// - `pointer`: last known pointer position in screen cells, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentContext {
    focused: bool,
    pointer: Option<(u16, u16)>,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            pointer: None,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_pointer(mut self, pointer: Option<(u16, u16)>) -> Self {
        self.pointer = pointer;
        self
    }
}
