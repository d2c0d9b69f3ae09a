//! Screen-graph nodes and the widget capability
//!
//! A [`Node`] is one element of the retained tree. It owns exactly one
//! [`Widget`] (the drawable state) and exactly one
//! [`EventHandler`](crate::handler::EventHandler) (the behavior), plus an
//! ordered child list. Insertion order is paint order and dispatch order;
//! the last child is drawn on top.
//!
//! Nodes live in a generational slot map keyed by [`NodeId`], so any
//! reference that outlives a rebuild can detect that its node is gone
//! instead of dangling.

use std::any::Any;

use slotmap::new_key_type;
use smallvec::SmallVec;

use brim_core::{InteractionState, Painter, Rect, Style};

use crate::handler::EventHandler;

new_key_type! {
    /// Generation-checked handle to a node in a [`ScreenGraph`](crate::ScreenGraph)
    pub struct NodeId;
}

/// State every widget variant carries: its layout rectangle and its
/// interaction state. Variants embed this instead of inheriting from a base
/// widget type.
#[derive(Clone, Copy, Debug, Default)]
pub struct WidgetBase {
    pub rectangle: Rect,
    pub state: InteractionState,
}

/// Polymorphic unit of UI state.
///
/// Concrete variants (buttons, text boxes, scroll views, containers) are
/// trait objects over this capability set. Widgets are created by the
/// builder during tree construction and destroyed when their node is dropped
/// or replaced without a reconciliation match.
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Emit this widget's geometry and text through the painter.
    ///
    /// May update derived visual state (e.g. a scroll view positioning its
    /// scrollbar) — drawing happens on a finalized tree, after dispatch.
    fn draw(&mut self, painter: &mut Painter<'_>, style: &Style);

    /// Variant-specific identity check against a widget from the previous
    /// frame at the same tree position. Content-verified: same variant plus
    /// whatever identity the variant defines (label, bound action,
    /// identifier...).
    fn matches(&self, other: &dyn Widget) -> bool;

    /// Adopt the persistent state of the widget this one replaces.
    ///
    /// The default carries over the interaction state; variants add their
    /// own persistent data (scroll offset, edit mode, ...).
    fn copy_state(&mut self, old: &dyn Widget) {
        self.base_mut().state = old.base().state;
    }

    /// Create this widget's behavior object. Called once when the node is
    /// first constructed; on a reconciliation match the existing handler is
    /// kept instead.
    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler>;

    /// Widgets that must survive reconciliation even without a positional
    /// match (scroll views keeping their offset when siblings shift).
    fn always_persistent(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    // Provided accessors over the embedded base

    fn rectangle(&self) -> Rect {
        self.base().rectangle
    }

    fn set_rectangle(&mut self, rectangle: Rect) {
        self.base_mut().rectangle = rectangle;
    }

    fn state(&self) -> InteractionState {
        self.base().state
    }

    fn set_state(&mut self, state: InteractionState) {
        self.base_mut().state = state;
    }
}

/// Narrow a widget trait object to a concrete variant.
pub fn widget_cast<W: Widget + 'static>(widget: &dyn Widget) -> Option<&W> {
    widget.as_any().downcast_ref::<W>()
}

/// Mutable variant of [`widget_cast`].
pub fn widget_cast_mut<W: Widget + 'static>(widget: &mut dyn Widget) -> Option<&mut W> {
    widget.as_any_mut().downcast_mut::<W>()
}

/// One element of the screen graph.
pub struct Node {
    pub(crate) widget: Box<dyn Widget>,
    /// Always `Some` between dispatch calls; taken out while its methods run
    /// so handler and widget can be borrowed independently.
    pub(crate) handler: Option<Box<dyn EventHandler>>,
    pub(crate) children: SmallVec<[NodeId; 8]>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub fn widget(&self) -> &dyn Widget {
        &*self.widget
    }

    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        &mut *self.widget
    }

    /// Children in insertion order (= paint order, back to front)
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Mutable access to the handler, e.g. to register extra listeners.
    pub fn handler_mut(&mut self) -> Option<&mut (dyn EventHandler + 'static)> {
        self.handler.as_deref_mut()
    }
}
