//! Event handling for screen-graph nodes
//!
//! Every node owns one [`EventHandler`]: the behavior object that translates
//! routed pointer events into widget-state mutations. Handler methods
//! receive the node's widget as `&mut dyn Widget`; local interaction state
//! (drag-in-progress flags and the like) lives on the handler itself.
//!
//! For nodes kept across a rebuild the handler is kept *alive*, not copied —
//! its data counts as part of the node's persistent state. See
//! [`TreeBuilder`](crate::builder::TreeBuilder).
//!
//! Besides the `on_*` methods, a handler owns a fixed-size map from event
//! kind to an ordered list of extra listener callbacks; the router invokes
//! them in insertion order after the handler's own method.

use brim_core::{Event, MouseButtonEvent, MouseDragEvent, MouseWheelEvent};

use crate::node::{NodeId, Widget};

/// Event kinds a handler can receive, used to key listener lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerEventKind {
    MouseMove = 0,
    MouseEnter,
    MouseLeave,
    MousePress,
    MouseRelease,
    MouseClick,
    MouseDrag,
    MouseWheel,
}

impl HandlerEventKind {
    pub const COUNT: usize = 8;
}

/// Extra per-node callback, invoked with the node's widget.
pub type EventListener = Box<dyn FnMut(&mut dyn Widget)>;

/// Fixed-size mapping from event kind to an insertion-ordered listener list.
pub struct ListenerMap {
    lists: [Vec<EventListener>; HandlerEventKind::COUNT],
}

impl Default for ListenerMap {
    fn default() -> Self {
        Self {
            lists: std::array::from_fn(|_| Vec::new()),
        }
    }
}

impl ListenerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener; invocation order is insertion order.
    pub fn add(&mut self, kind: HandlerEventKind, listener: EventListener) {
        self.lists[kind as usize].push(listener);
    }

    pub fn iter_mut(
        &mut self,
        kind: HandlerEventKind,
    ) -> impl Iterator<Item = &mut EventListener> {
        self.lists[kind as usize].iter_mut()
    }

    pub fn count(&self, kind: HandlerEventKind) -> usize {
        self.lists[kind as usize].len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }
}

/// State every handler carries: the back-reference to its node and the
/// listener map. Concrete handlers embed this (composition, no base class).
///
/// The node reference is non-owning and never null; because a reconciled
/// node keeps its arena slot, the reference stays valid for the handler's
/// whole life.
pub struct HandlerCore {
    pub node: NodeId,
    pub listeners: ListenerMap,
}

impl HandlerCore {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            listeners: ListenerMap::new(),
        }
    }
}

/// Behavior object of a screen-graph node.
///
/// All `on_*` methods default to no-ops; widget kinds override the ones they
/// react to. A handler that fully consumed an event calls
/// [`swallow`](brim_core::InputEvent::swallow) on it to stop the router from
/// forwarding it further up the dispatch chain.
pub trait EventHandler {
    fn core(&self) -> &HandlerCore;
    fn core_mut(&mut self) -> &mut HandlerCore;

    fn on_mouse_move(&mut self, _widget: &mut dyn Widget, _event: &mut Event) {}
    fn on_mouse_enter(&mut self, _widget: &mut dyn Widget, _event: &mut Event) {}
    fn on_mouse_leave(&mut self, _widget: &mut dyn Widget, _event: &mut Event) {}
    fn on_mouse_press(&mut self, _widget: &mut dyn Widget, _event: &mut MouseButtonEvent) {}
    fn on_mouse_release(&mut self, _widget: &mut dyn Widget, _event: &mut MouseButtonEvent) {}
    fn on_mouse_click(&mut self, _widget: &mut dyn Widget, _event: &mut MouseButtonEvent) {}
    fn on_mouse_drag(&mut self, _widget: &mut dyn Widget, _event: &mut MouseDragEvent) {}
    fn on_mouse_wheel(&mut self, _widget: &mut dyn Widget, _event: &mut MouseWheelEvent) {}

    /// The node this handler belongs to
    fn node(&self) -> NodeId {
        self.core().node
    }

    /// Register an extra listener for an event kind.
    fn add_listener(&mut self, kind: HandlerEventKind, listener: EventListener) {
        self.core_mut().listeners.add(kind, listener);
    }
}

/// No-op handler for inert widgets (labels, containers without behavior).
pub struct DefaultHandler {
    core: HandlerCore,
}

impl DefaultHandler {
    pub fn new(node: NodeId) -> Self {
        Self {
            core: HandlerCore::new(node),
        }
    }
}

impl EventHandler for DefaultHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut HandlerCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_map_insertion_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let mut map = ListenerMap::new();
        for tag in [1u32, 2, 3] {
            let order = Rc::clone(&order);
            map.add(
                HandlerEventKind::MouseEnter,
                Box::new(move |_| order.borrow_mut().push(tag)),
            );
        }
        assert_eq!(map.count(HandlerEventKind::MouseEnter), 3);
        assert_eq!(map.count(HandlerEventKind::MouseLeave), 0);

        struct Probe {
            base: crate::node::WidgetBase,
        }
        impl Widget for Probe {
            fn base(&self) -> &crate::node::WidgetBase {
                &self.base
            }
            fn base_mut(&mut self) -> &mut crate::node::WidgetBase {
                &mut self.base
            }
            fn draw(&mut self, _: &mut brim_core::Painter<'_>, _: &brim_core::Style) {}
            fn matches(&self, _: &dyn Widget) -> bool {
                true
            }
            fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
                Box::new(DefaultHandler::new(node))
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let mut probe = Probe {
            base: crate::node::WidgetBase::default(),
        };
        for listener in map.iter_mut(HandlerEventKind::MouseEnter) {
            listener(&mut probe);
        }
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }
}
