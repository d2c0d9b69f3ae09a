//! Pointer-event dispatch
//!
//! The [`EventRouter`] turns raw pointer samples from the host into handler
//! calls on screen-graph nodes:
//!
//! ```text
//! host sample
//!     ↓ hit-test (deepest node, topmost sibling wins)
//! press / wheel ──► bubble node → parent → ... until swallowed
//! move          ──► hovered node, with enter/leave on hover change
//! while a button is held:
//!     move / drag / release ──► active node, no re-hit-testing
//!     release over the active node additionally synthesizes a click
//! ```
//!
//! The active node is the one that swallowed the initiating press. Hover is
//! frozen for the duration of the interaction and re-derived on release, so
//! a drag that wanders across other widgets never disturbs them.

use brim_core::{
    Event, InputEvent, MouseButton, MouseButtonEvent, MouseDragEvent, MouseWheelEvent, Point,
    WheelDirection,
};
use tracing::trace;

use crate::context::Context;
use crate::graph::ScreenGraph;
use crate::handler::{EventHandler, HandlerEventKind};
use crate::node::{NodeId, Widget};

/// Pointer travel (pixels) past which a held-button move becomes a drag.
pub const DRAG_THRESHOLD: f32 = 3.0;

/// Stateless dispatcher; all interaction state lives in the [`Context`].
pub struct EventRouter;

impl EventRouter {
    /// The deepest node whose rectangle contains `point`. Siblings are
    /// probed back to front, so overlapping widgets resolve to the one
    /// drawn on top.
    pub fn hit_test_at(graph: &ScreenGraph, point: Point) -> Option<NodeId> {
        Self::hit_test(graph, graph.root(), point)
    }

    fn hit_test(graph: &ScreenGraph, id: NodeId, point: Point) -> Option<NodeId> {
        let node = graph.get(id)?;
        for &child in node.children().iter().rev() {
            if let Some(hit) = Self::hit_test(graph, child, point) {
                return Some(hit);
            }
        }
        if id != graph.root() && node.widget().rectangle().contains(point) {
            Some(id)
        } else {
            None
        }
    }

    /// Pointer moved with no button held, or while an interaction is active.
    pub fn on_mouse_move(graph: &mut ScreenGraph, ctx: &mut Context, location: Point) {
        if ctx.is_active() {
            let Some(active) = ctx.active.resolve(graph) else {
                // Active node dropped by a rebuild; swallow input until the
                // button comes back up.
                return;
            };
            let Some(button) = ctx.active_button else {
                return;
            };
            let distance = location.delta(ctx.press_location);
            if !ctx.dragging && distance.x.hypot(distance.y) >= DRAG_THRESHOLD {
                ctx.dragging = true;
                trace!(?active, "drag started");
            }
            if ctx.dragging {
                let mut event = MouseDragEvent::new(location, button, distance);
                Self::deliver(
                    graph,
                    active,
                    HandlerEventKind::MouseDrag,
                    &mut event,
                    |h, w, e| h.on_mouse_drag(w, e),
                );
            } else {
                let mut event = Event::new(location);
                Self::deliver(
                    graph,
                    active,
                    HandlerEventKind::MouseMove,
                    &mut event,
                    |h, w, e| h.on_mouse_move(w, e),
                );
            }
            return;
        }

        if let Some(hovered) = Self::update_hover(graph, ctx, location) {
            let mut event = Event::new(location);
            Self::bubble(
                graph,
                hovered,
                HandlerEventKind::MouseMove,
                &mut event,
                |h, w, e| h.on_mouse_move(w, e),
            );
        }
    }

    /// Button press: bubbles from the deepest hit node; the swallowing node
    /// (or the hit node, if nobody swallowed) becomes the active node.
    pub fn on_mouse_down(
        graph: &mut ScreenGraph,
        ctx: &mut Context,
        location: Point,
        button: MouseButton,
    ) {
        let hit = Self::update_hover(graph, ctx, location);
        let Some(hit) = hit else {
            return;
        };

        let mut event = MouseButtonEvent::new(location, button);
        let swallower = Self::bubble(
            graph,
            hit,
            HandlerEventKind::MousePress,
            &mut event,
            |h, w, e| h.on_mouse_press(w, e),
        );
        trace!(?hit, ?swallower, ?button, "press");

        if !ctx.is_active() {
            ctx.active.set(swallower.unwrap_or(hit));
            ctx.begin_interaction(button, location);
        }
    }

    /// Button release: routed to the active node. A release over the active
    /// node that never turned into a drag synthesizes a click on it.
    pub fn on_mouse_up(
        graph: &mut ScreenGraph,
        ctx: &mut Context,
        location: Point,
        button: MouseButton,
    ) {
        if ctx.active_button != Some(button) {
            if ctx.is_active() {
                // A second button released mid-interaction; not ours.
                return;
            }
            // Release without a tracked press (e.g. press happened outside
            // every widget): dispatch to whatever is under the pointer.
            if let Some(hit) = Self::update_hover(graph, ctx, location) {
                let mut event = MouseButtonEvent::new(location, button);
                Self::bubble(
                    graph,
                    hit,
                    HandlerEventKind::MouseRelease,
                    &mut event,
                    |h, w, e| h.on_mouse_release(w, e),
                );
            }
            return;
        }

        if let Some(active) = ctx.active.resolve(graph) {
            let mut event = MouseButtonEvent::new(location, button);
            Self::bubble(
                graph,
                active,
                HandlerEventKind::MouseRelease,
                &mut event,
                |h, w, e| h.on_mouse_release(w, e),
            );

            let over_active = graph
                .widget_of(active)
                .is_some_and(|widget| widget.rectangle().contains(location));
            if over_active && !ctx.dragging {
                let mut click = MouseButtonEvent::new(location, button);
                Self::deliver(
                    graph,
                    active,
                    HandlerEventKind::MouseClick,
                    &mut click,
                    |h, w, e| h.on_mouse_click(w, e),
                );
                trace!(?active, ?button, "click");
            }
        }

        ctx.end_interaction();
        // Hover was frozen during the interaction; bring it back in sync.
        Self::update_hover(graph, ctx, location);
    }

    /// Wheel: bubbles from the deepest hit node; stateless, so a scroll
    /// anywhere works without disturbing hover or active tracking.
    pub fn on_mouse_wheel(graph: &mut ScreenGraph, location: Point, direction: WheelDirection) {
        let Some(hit) = Self::hit_test_at(graph, location) else {
            return;
        };
        let mut event = MouseWheelEvent::new(location, direction);
        Self::bubble(
            graph,
            hit,
            HandlerEventKind::MouseWheel,
            &mut event,
            |h, w, e| h.on_mouse_wheel(w, e),
        );
    }

    /// Re-derive the hovered node, emitting leave/enter on change. Returns
    /// the node under the pointer.
    fn update_hover(graph: &mut ScreenGraph, ctx: &mut Context, location: Point) -> Option<NodeId> {
        let hit = Self::hit_test_at(graph, location);
        let previous = ctx.hovered.resolve(graph);
        if hit != previous {
            if let Some(old) = previous {
                let mut event = Event::new(location);
                Self::deliver(
                    graph,
                    old,
                    HandlerEventKind::MouseLeave,
                    &mut event,
                    |h, w, e| h.on_mouse_leave(w, e),
                );
            }
            match hit {
                Some(new) => {
                    let mut event = Event::new(location);
                    Self::deliver(
                        graph,
                        new,
                        HandlerEventKind::MouseEnter,
                        &mut event,
                        |h, w, e| h.on_mouse_enter(w, e),
                    );
                    ctx.hovered.set(new);
                }
                None => ctx.hovered.clear(),
            }
            trace!(?previous, ?hit, "hover changed");
        }
        hit
    }

    /// Call one handler method plus its registered listeners on one node.
    ///
    /// The handler is taken out of the node for the duration of the call so
    /// handler and widget can be borrowed independently.
    fn deliver<E: InputEvent>(
        graph: &mut ScreenGraph,
        id: NodeId,
        kind: HandlerEventKind,
        event: &mut E,
        method: fn(&mut dyn EventHandler, &mut dyn Widget, &mut E),
    ) {
        let Some(node) = graph.get_mut(id) else {
            return;
        };
        let Some(mut handler) = node.handler.take() else {
            return;
        };
        method(&mut *handler, &mut *node.widget, event);
        for listener in handler.core_mut().listeners.iter_mut(kind) {
            listener(&mut *node.widget);
        }
        node.handler = Some(handler);
    }

    /// Deliver along the parent chain until a handler swallows the event.
    /// Returns the swallowing node, if any.
    fn bubble<E: InputEvent>(
        graph: &mut ScreenGraph,
        start: NodeId,
        kind: HandlerEventKind,
        event: &mut E,
        method: fn(&mut dyn EventHandler, &mut dyn Widget, &mut E),
    ) -> Option<NodeId> {
        let mut current = Some(start);
        while let Some(id) = current {
            Self::deliver(graph, id, kind, event, method);
            if event.is_swallowed() {
                return Some(id);
            }
            current = graph.get(id).and_then(|node| node.parent());
        }
        None
    }
}
