//! Brim Screen Graph
//!
//! The retained tree of UI nodes and everything that operates on it:
//!
//! - **Node arena**: generational slot-map storage; every node owns exactly
//!   one widget and one event handler
//! - **Builder**: per-frame declarative rebuild with positional
//!   reconciliation — matched nodes keep their slot, their handler, and
//!   their persistent widget state
//! - **Context**: per-UI-instance hovered/active references that survive
//!   rebuilds through stale-tolerant persistent handles
//! - **Router**: hit-testing plus enter/leave, press/active, release/click,
//!   drag, and wheel dispatch with bubble-until-swallowed semantics
//! - **Drawer**: pre-order walk emitting widget draw calls through the
//!   `PaintEngine` collaborator
//!
//! # Frame loop
//!
//! ```text
//! TreeBuilder::begin → add... → finish     (rebuild + reconcile)
//!     ↓
//! EventRouter::on_mouse_*                  (dispatch pending input)
//!     ↓
//! Drawer::draw_tree                        (emit draw calls)
//! ```
//!
//! All of it is single-threaded and synchronous: one pass completes before
//! the next starts, driven by the host's frame loop.

pub mod builder;
pub mod context;
pub mod drawer;
pub mod graph;
pub mod handler;
pub mod node;
pub mod persistent;
pub mod router;

#[cfg(test)]
pub(crate) mod test_widgets;

pub use builder::{BuildError, TreeBuilder};
pub use context::Context;
pub use drawer::Drawer;
pub use graph::ScreenGraph;
pub use handler::{
    DefaultHandler, EventHandler, EventListener, HandlerCore, HandlerEventKind, ListenerMap,
};
pub use node::{widget_cast, widget_cast_mut, Node, NodeId, Widget, WidgetBase};
pub use persistent::PersistentNodePtr;
pub use router::{EventRouter, DRAG_THRESHOLD};
