//! Per-frame tree construction with reconciliation
//!
//! Each frame the host declares the desired widget tree through a
//! [`TreeBuilder`], in a fixed order mirroring layout order. Every `add`
//! call is matched against the previous frame's tree:
//!
//! ```text
//! add(parent, widget)
//!     ↓ positional lookup: next unclaimed previous child of parent
//! match?  ──yes──► reuse the node's slot, keep its handler,
//!     │            copy persistent widget state old → new
//!     no
//!     ↓ always-persistent widgets: scan the remaining unclaimed
//!     │ previous children for an out-of-order match
//!     ↓
//! fresh node + fresh handler
//! ```
//!
//! Reconciliation is positional-first and content-verified via
//! [`Widget::matches`] — it is not a keyed diff. Reordered children are
//! treated as a mismatch of the shifted subrange and rebuilt; only
//! always-persistent widgets are rescued out of order. A mismatched widget
//! variant at the same position is a plain "no match", never an error.
//!
//! `finish` drops every previous-frame node that was not reclaimed,
//! releasing its widget and handler. Persistent handles to dropped nodes
//! resolve to absent from then on.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, trace};

use crate::graph::ScreenGraph;
use crate::node::{NodeId, Widget};

/// Builder misuse; tree shape errors are not representable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The parent handle does not name a live node.
    #[error("parent node {0:?} is not in the screen graph")]
    UnknownParent(NodeId),
    /// Children may only be added under nodes declared earlier this frame.
    #[error("parent node {0:?} was not declared this frame")]
    ParentNotDeclared(NodeId),
}

/// One build pass over a [`ScreenGraph`]. Created per frame; `finish`
/// consumes it and prunes whatever the frame did not redeclare.
pub struct TreeBuilder<'a> {
    graph: &'a mut ScreenGraph,
    /// Unclaimed previous-frame children, per declared parent
    prev_children: FxHashMap<NodeId, VecDeque<NodeId>>,
    /// Nodes declared (created or reclaimed) this frame
    declared: FxHashSet<NodeId>,
    dropped: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Start a build pass. The root's previous children become the first
    /// reconciliation candidates.
    pub fn begin(graph: &'a mut ScreenGraph) -> Self {
        graph.frame += 1;
        let frame = graph.frame;
        let root = graph.root();

        let previous: VecDeque<NodeId> = std::mem::take(&mut graph.nodes[root].children)
            .into_iter()
            .collect();

        let mut prev_children = FxHashMap::default();
        prev_children.insert(root, previous);
        let mut declared = FxHashSet::default();
        declared.insert(root);

        trace!(frame, "build pass started");
        Self {
            graph,
            prev_children,
            declared,
            dropped: 0,
        }
    }

    /// The root node to hang top-level widgets off.
    pub fn root(&self) -> NodeId {
        self.graph.root()
    }

    /// Declare the next child of `parent`. Returns the node that now owns
    /// `widget`'s state: a reconciled previous-frame node or a fresh one.
    pub fn add(&mut self, parent: NodeId, widget: Box<dyn Widget>) -> Result<NodeId, BuildError> {
        if !self.graph.contains(parent) {
            return Err(BuildError::UnknownParent(parent));
        }
        if !self.declared.contains(&parent) {
            return Err(BuildError::ParentNotDeclared(parent));
        }

        let candidate = self
            .prev_children
            .get_mut(&parent)
            .and_then(|queue| queue.pop_front());

        match candidate {
            Some(old) if widget.matches(self.graph.widget(old)) => {
                self.graph.migrate_widget(old, widget);
                Ok(self.reclaim(parent, old))
            }
            candidate => {
                if let Some(old) = candidate {
                    self.discard_candidate(parent, old);
                }
                if widget.always_persistent() {
                    if let Some(old) = self.take_persistent_match(parent, &*widget) {
                        self.graph.migrate_widget(old, widget);
                        return Ok(self.reclaim(parent, old));
                    }
                }
                self.fresh(parent, widget)
            }
        }
    }

    /// Finish the pass, dropping previous-frame nodes no `add` reclaimed.
    pub fn finish(self) {
        let TreeBuilder {
            graph,
            prev_children,
            mut dropped,
            ..
        } = self;
        for (_, queue) in prev_children {
            for id in queue {
                dropped += 1;
                graph.free_subtree(id);
            }
        }
        if dropped > 0 {
            debug!(dropped, frame = graph.frame, "pruned nodes after rebuild");
        }
    }

    /// A positional candidate that did not match. Always-persistent widgets
    /// stay claimable (they may be declared later this frame); everything
    /// else is dropped on the spot.
    fn discard_candidate(&mut self, parent: NodeId, old: NodeId) {
        if self.graph.widget(old).always_persistent() {
            if let Some(queue) = self.prev_children.get_mut(&parent) {
                queue.push_back(old);
                return;
            }
        }
        trace!(?old, "dropping mismatched node");
        self.dropped += 1;
        self.graph.free_subtree(old);
    }

    /// Out-of-order rescue for always-persistent widgets: claim the first
    /// remaining previous child of `parent` the new widget matches.
    fn take_persistent_match(&mut self, parent: NodeId, widget: &dyn Widget) -> Option<NodeId> {
        let graph = &self.graph;
        let queue = self.prev_children.get_mut(&parent)?;
        let position = queue.iter().position(|&old| {
            graph
                .get(old)
                .is_some_and(|node| node.widget().always_persistent() && widget.matches(node.widget()))
        })?;
        queue.remove(position)
    }

    /// Re-attach a reconciled node at the current build position and make
    /// its previous children available for claiming.
    fn reclaim(&mut self, parent: NodeId, id: NodeId) -> NodeId {
        let previous: VecDeque<NodeId> = {
            let node = &mut self.graph.nodes[id];
            node.parent = Some(parent);
            std::mem::take(&mut node.children).into_iter().collect()
        };
        self.graph.nodes[parent].children.push(id);
        self.prev_children.insert(id, previous);
        self.declared.insert(id);
        trace!(?id, "reused node");
        id
    }

    fn fresh(&mut self, parent: NodeId, widget: Box<dyn Widget>) -> Result<NodeId, BuildError> {
        let id = self
            .graph
            .create_child(parent, widget)
            .ok_or(BuildError::UnknownParent(parent))?;
        self.prev_children.insert(id, VecDeque::new());
        self.declared.insert(id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::widget_cast;
    use crate::test_widgets::{Plain, Sticky};

    fn rebuild_pair(graph: &mut ScreenGraph, tags: &[&'static str]) -> Vec<NodeId> {
        let mut builder = TreeBuilder::begin(graph);
        let root = builder.root();
        let ids = tags
            .iter()
            .map(|tag| builder.add(root, Box::new(Plain::new(tag))).unwrap())
            .collect();
        builder.finish();
        ids
    }

    #[test]
    fn test_identical_rebuild_keeps_node_identity() {
        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["a", "b", "c"]);
        let second = rebuild_pair(&mut graph, &["a", "b", "c"]);
        assert_eq!(first, second);
        assert_eq!(graph.len(), 4); // root + three children
    }

    #[test]
    fn test_label_change_creates_fresh_node() {
        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["a", "b"]);
        let second = rebuild_pair(&mut graph, &["a", "x"]);
        assert_eq!(first[0], second[0]);
        assert_ne!(first[1], second[1]);
        assert!(!graph.contains(first[1]));
    }

    #[test]
    fn test_variant_mismatch_falls_back_to_fresh() {
        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["a"]);

        let mut builder = TreeBuilder::begin(&mut graph);
        let root = builder.root();
        let replacement = builder.add(root, Box::new(Sticky::new("a"))).unwrap();
        builder.finish();

        assert_ne!(first[0], replacement);
        assert!(!graph.contains(first[0]));
    }

    #[test]
    fn test_omitted_children_are_dropped() {
        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["a", "b", "c"]);
        let second = rebuild_pair(&mut graph, &["a"]);
        assert_eq!(first[0], second[0]);
        assert!(!graph.contains(first[1]));
        assert!(!graph.contains(first[2]));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_nested_children_reconcile_per_parent() {
        let mut graph = ScreenGraph::new();

        let build = |graph: &mut ScreenGraph| -> (NodeId, NodeId) {
            let mut builder = TreeBuilder::begin(graph);
            let root = builder.root();
            let panel = builder.add(root, Box::new(Plain::new("panel"))).unwrap();
            let child = builder.add(panel, Box::new(Plain::new("child"))).unwrap();
            builder.finish();
            (panel, child)
        };

        let first = build(&mut graph);
        let second = build(&mut graph);
        assert_eq!(first, second);
        assert_eq!(graph.children_of(first.0).as_slice(), &[first.1]);
    }

    #[test]
    fn test_children_of_undeclared_parent_rejected() {
        let mut graph = ScreenGraph::new();
        let ids = rebuild_pair(&mut graph, &["a"]);

        let mut builder = TreeBuilder::begin(&mut graph);
        let err = builder.add(ids[0], Box::new(Plain::new("x"))).unwrap_err();
        assert_eq!(err, BuildError::ParentNotDeclared(ids[0]));
        builder.finish();
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut graph = ScreenGraph::new();
        let ids = rebuild_pair(&mut graph, &["a"]);
        rebuild_pair(&mut graph, &[]); // drops the node

        let mut builder = TreeBuilder::begin(&mut graph);
        let err = builder.add(ids[0], Box::new(Plain::new("x"))).unwrap_err();
        assert_eq!(err, BuildError::UnknownParent(ids[0]));
        builder.finish();
    }

    #[test]
    fn test_always_persistent_survives_position_shift() {
        let mut graph = ScreenGraph::new();

        let sticky = {
            let mut builder = TreeBuilder::begin(&mut graph);
            let root = builder.root();
            let sticky = builder.add(root, Box::new(Sticky::new("view"))).unwrap();
            builder.add(root, Box::new(Plain::new("b"))).unwrap();
            builder.finish();
            sticky
        };

        // A new first child shifts the sticky widget's position; it must be
        // rescued out of order, keeping its slot and state.
        let rescued = {
            let mut builder = TreeBuilder::begin(&mut graph);
            let root = builder.root();
            builder.add(root, Box::new(Plain::new("new-first"))).unwrap();
            builder.add(root, Box::new(Plain::new("b"))).unwrap();
            let rescued = builder.add(root, Box::new(Sticky::new("view"))).unwrap();
            builder.finish();
            rescued
        };

        assert_eq!(sticky, rescued);
        let widget = graph.widget_of(rescued).unwrap();
        assert_eq!(widget_cast::<Sticky>(widget).unwrap().survivals, 1);
    }

    #[test]
    fn test_plain_widgets_are_not_rescued_out_of_order() {
        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["a", "b"]);
        // Reordering plain widgets rebuilds the subrange.
        let second = rebuild_pair(&mut graph, &["b", "a"]);
        assert_ne!(first[0], second[1]);
        assert_ne!(first[1], second[0]);
    }

    #[test]
    fn test_state_round_trips_through_reconciliation() {
        use brim_core::InteractionState;

        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["a"]);
        graph
            .widget_of_mut(first[0])
            .unwrap()
            .set_state(InteractionState::Highlighted);

        let second = rebuild_pair(&mut graph, &["a"]);
        assert_eq!(first, second);
        assert_eq!(
            graph.widget_of(second[0]).unwrap().state(),
            InteractionState::Highlighted
        );
    }

    #[test]
    fn test_hundred_rebuilds_keep_same_node() {
        let mut graph = ScreenGraph::new();
        let first = rebuild_pair(&mut graph, &["ok"]);
        for _ in 0..100 {
            let ids = rebuild_pair(&mut graph, &["ok"]);
            assert_eq!(ids, first);
        }
        assert_eq!(
            graph.widget_of(first[0]).unwrap().state(),
            brim_core::InteractionState::Normal
        );
    }
}
