//! Stale-tolerant node references
//!
//! A [`PersistentNodePtr`] tracks a node across tree rebuilds by identity
//! (its generational slot key), never by address. After a rebuild the
//! reference either still resolves — the node was reconciled and kept its
//! slot — or resolves to `None` because the slot was freed. Readers must
//! treat `None` as "absent", never as an error.

use crate::graph::ScreenGraph;
use crate::node::NodeId;

/// Weak reference to a node that survives rebuilds or detectably dies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersistentNodePtr(Option<NodeId>);

impl PersistentNodePtr {
    pub const fn none() -> Self {
        Self(None)
    }

    pub fn set(&mut self, id: NodeId) {
        self.0 = Some(id);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// The referenced node, if it is still in the graph. A dangling
    /// reference yields `None`; it is never dereferenced.
    pub fn resolve(&self, graph: &ScreenGraph) -> Option<NodeId> {
        self.0.filter(|id| graph.contains(*id))
    }

    /// Raw state of the pointer, ignoring whether the node still exists.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}
