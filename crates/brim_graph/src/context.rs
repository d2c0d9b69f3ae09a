//! Per-UI-instance interaction context
//!
//! The [`Context`] remembers which node the pointer is over and which node
//! owns the current button interaction. Both are stale-tolerant persistent
//! handles: a rebuild that drops the referenced node makes the handle
//! resolve to `None` and the router simply re-derives it from the next
//! event. The context is never reset by a rebuild.

use brim_core::{MouseButton, Point};

use crate::persistent::PersistentNodePtr;

/// Hover and active-interaction state of one UI instance.
#[derive(Default)]
pub struct Context {
    /// Node the pointer is currently over; frozen while a drag is active
    pub hovered: PersistentNodePtr,
    /// Node that received the initiating button press; move, drag and
    /// release events route here without re-hit-testing
    pub active: PersistentNodePtr,
    /// Button that started the active interaction
    pub active_button: Option<MouseButton>,
    /// Where the active interaction's press happened
    pub(crate) press_location: Point,
    /// Set once the pointer travelled past the drag threshold
    pub(crate) dragging: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a button interaction is in flight (pressed, not yet released).
    pub fn is_active(&self) -> bool {
        self.active_button.is_some()
    }

    pub(crate) fn begin_interaction(&mut self, button: MouseButton, location: Point) {
        self.active_button = Some(button);
        self.press_location = location;
        self.dragging = false;
    }

    pub(crate) fn end_interaction(&mut self) {
        self.active.clear();
        self.active_button = None;
        self.dragging = false;
    }
}
