//! Screen-graph arena
//!
//! [`ScreenGraph`] owns all nodes of one UI instance in a generational slot
//! map. Node identity is the slot key: a reconciled node keeps its slot (and
//! therefore its `NodeId`) across rebuilds, while a removed node's slot
//! bumps its generation so stale handles resolve to "absent" instead of
//! aliasing whatever gets inserted next.

use std::any::Any;

use slotmap::SlotMap;
use smallvec::SmallVec;
use tracing::trace;

use brim_core::{Painter, Style};

use crate::handler::{DefaultHandler, EventHandler};
use crate::node::{widget_cast, Node, NodeId, Widget, WidgetBase};

/// Internal widget for the root container; draws nothing and matches only
/// itself.
#[derive(Default)]
pub(crate) struct RootWidget {
    base: WidgetBase,
}

impl Widget for RootWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self, _painter: &mut Painter<'_>, _style: &Style) {}

    fn matches(&self, other: &dyn Widget) -> bool {
        widget_cast::<RootWidget>(other).is_some()
    }

    fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
        Box::new(DefaultHandler::new(node))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The retained tree of one UI instance.
pub struct ScreenGraph {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    /// Build counter; bumped by `TreeBuilder::begin`
    pub(crate) frame: u64,
}

impl Default for ScreenGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenGraph {
    pub fn new() -> Self {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let root = nodes.insert(Node {
            widget: Box::new(RootWidget::default()),
            handler: None,
            children: SmallVec::new(),
            parent: None,
        });
        let handler = nodes[root].widget.create_handler(root);
        nodes[root].handler = Some(handler);
        Self {
            nodes,
            root,
            frame: 0,
        }
    }

    /// The root container node; always present, owns no visible widget.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// The widget of a node that is known to exist (builder internals).
    pub(crate) fn widget(&self, id: NodeId) -> &dyn Widget {
        &*self.nodes[id].widget
    }

    /// Convenience widget accessors for hosts and tests
    pub fn widget_of(&self, id: NodeId) -> Option<&dyn Widget> {
        self.nodes.get(id).map(|node| &*node.widget)
    }

    pub fn widget_of_mut(&mut self, id: NodeId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id).map(|node| &mut *node.widget)
    }

    /// Children of a node in insertion order; empty if the node is gone.
    pub fn children_of(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        self.nodes
            .get(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Total node count, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a child owning `widget` and a handler freshly created from it.
    ///
    /// Returns `None` if `parent` is not in the graph.
    pub fn create_child(&mut self, parent: NodeId, widget: Box<dyn Widget>) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(Node {
            widget,
            handler: None,
            children: SmallVec::new(),
            parent: Some(parent),
        });
        let handler = self.nodes[id].widget.create_handler(id);
        self.nodes[id].handler = Some(handler);
        self.nodes[parent].children.push(id);
        trace!(?id, ?parent, "created node");
        Some(id)
    }

    /// Whether two nodes' widgets report each other as the same widget.
    pub fn node_matches(&self, a: NodeId, b: NodeId) -> bool {
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(a), Some(b)) => a.widget.matches(&*b.widget),
            _ => false,
        }
    }

    /// Replace a node's widget with `incoming` after moving the persistent
    /// state of the old widget into it. The node's slot, its handler, and
    /// the handler's node back-reference are all kept intact — the handler's
    /// data is part of the state being preserved.
    pub(crate) fn migrate_widget(&mut self, id: NodeId, mut incoming: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(id) {
            incoming.copy_state(&*node.widget);
            node.widget = incoming;
            debug_assert!(
                node.handler.as_ref().map(|h| h.core().node) == Some(id),
                "handler back-reference must name its node"
            );
        }
    }

    /// Remove a node and its whole subtree, detaching it from its parent.
    pub fn remove_subtree(&mut self, id: NodeId) {
        let parent = self.nodes.get(id).and_then(|node| node.parent);
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }
        self.free_subtree(id);
    }

    /// Free a subtree's slots without touching the parent's child list
    /// (builder pruning rebuilds child lists itself).
    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        for child in node.children {
            self.free_subtree(child);
        }
    }
}
