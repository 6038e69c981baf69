//! Core graph data structures.

use crate::domain::{RelationshipType, WorkItemRef};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// The graph itself, not thread-safe. Wrapped in `RwLock` by the engine.
///
/// Nodes carry `WorkItemRef` values and are created implicitly the first
/// time an edge references them; the engine never removes a node, so
/// `NodeIndex` values in `node_map` stay valid for the life of the graph.
pub(crate) struct GraphInner {
    /// Typed relationship edges. Parallel edges between the same pair are
    /// legal as long as their types differ.
    pub(super) graph: DiGraph<WorkItemRef, RelationshipType>,

    /// Mapping from item reference to graph node.
    pub(super) node_map: HashMap<WorkItemRef, NodeIndex>,
}

impl GraphInner {
    pub(crate) fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Node for an item, if the item participates in any edge.
    pub(super) fn node(&self, item: &WorkItemRef) -> Option<NodeIndex> {
        self.node_map.get(item).copied()
    }

    /// Node for an item, creating it on first reference.
    pub(super) fn intern(&mut self, item: &WorkItemRef) -> NodeIndex {
        if let Some(&node) = self.node_map.get(item) {
            return node;
        }
        let node = self.graph.add_node(item.clone());
        self.node_map.insert(item.clone(), node);
        node
    }

    /// The edge `source -> target` with exactly this type, if present.
    ///
    /// `DiGraph::find_edge` stops at the first parallel edge, so the typed
    /// lookup has to scan all edges connecting the pair.
    pub(super) fn typed_edge(
        &self,
        source: NodeIndex,
        target: NodeIndex,
        relationship: RelationshipType,
    ) -> Option<EdgeIndex> {
        self.graph
            .edges_connecting(source, target)
            .find(|edge| *edge.weight() == relationship)
            .map(|edge| edge.id())
    }
}
