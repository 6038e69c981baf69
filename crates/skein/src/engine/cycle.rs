//! Cycle validation for proposed edges.

use super::inner::GraphInner;
use crate::domain::{RelationshipType, WorkItemRef};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

/// Returns true if committing `source -> target` with this relationship
/// would close a cycle in its family's sub-graph.
///
/// Only the hierarchy, blocking, and sequence families are validated;
/// duplication and plain related links may form cycles harmlessly. The
/// check is a reachability question: a path `target -> source` along edges
/// of the proposed type means the new edge would complete a loop.
/// Complementary edges mirror the typed sub-graph exactly, so following
/// only edges of the proposed type is sufficient.
///
/// The traversal is an iterative depth-first search with an explicit stack;
/// the visited set bounds it by the node count, so it terminates even if
/// the stored graph is somehow malformed and never recurses.
pub(super) fn would_create_cycle(
    inner: &GraphInner,
    source: &WorkItemRef,
    target: &WorkItemRef,
    relationship: RelationshipType,
) -> bool {
    if !relationship.is_cycle_sensitive() {
        return false;
    }

    // A self-relation in an ordered family is the smallest possible cycle,
    // whether or not the item is in the graph yet.
    if source == target {
        return true;
    }

    let (Some(source_node), Some(target_node)) = (inner.node(source), inner.node(target)) else {
        // An endpoint with no edges cannot be on any existing path.
        return false;
    };

    let mut visited = HashSet::new();
    let mut stack = vec![target_node];

    while let Some(node) = stack.pop() {
        if node == source_node {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        for edge in inner.graph.edges(node) {
            if *edge.weight() == relationship && !visited.contains(&edge.target()) {
                stack.push(edge.target());
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(edges: &[(&str, &str, RelationshipType)]) -> GraphInner {
        let mut inner = GraphInner::new();
        for (source, target, relationship) in edges {
            let s = inner.intern(&WorkItemRef::new(*source));
            let t = inner.intern(&WorkItemRef::new(*target));
            inner.graph.add_edge(s, t, *relationship);
            inner.graph.add_edge(t, s, relationship.complement());
        }
        inner
    }

    #[test]
    fn direct_back_edge_is_a_cycle() {
        let inner = graph_with(&[("a", "b", RelationshipType::Blocks)]);
        assert!(would_create_cycle(
            &inner,
            &WorkItemRef::new("b"),
            &WorkItemRef::new("a"),
            RelationshipType::Blocks,
        ));
    }

    #[test]
    fn transitive_back_edge_is_a_cycle() {
        let inner = graph_with(&[
            ("a", "b", RelationshipType::Blocks),
            ("b", "c", RelationshipType::Blocks),
        ]);
        assert!(would_create_cycle(
            &inner,
            &WorkItemRef::new("c"),
            &WorkItemRef::new("a"),
            RelationshipType::Blocks,
        ));
    }

    #[test]
    fn forward_edge_is_not_a_cycle() {
        let inner = graph_with(&[("a", "b", RelationshipType::Blocks)]);
        assert!(!would_create_cycle(
            &inner,
            &WorkItemRef::new("a"),
            &WorkItemRef::new("c"),
            RelationshipType::Blocks,
        ));
    }

    #[test]
    fn families_are_checked_independently() {
        // a -> b in the hierarchy family must not forbid b -> a blocking.
        let inner = graph_with(&[("a", "b", RelationshipType::Parent)]);
        assert!(!would_create_cycle(
            &inner,
            &WorkItemRef::new("b"),
            &WorkItemRef::new("a"),
            RelationshipType::Blocks,
        ));
        assert!(would_create_cycle(
            &inner,
            &WorkItemRef::new("b"),
            &WorkItemRef::new("a"),
            RelationshipType::Parent,
        ));
    }

    #[test]
    fn sequence_family_is_cycle_sensitive() {
        let inner = graph_with(&[("a", "b", RelationshipType::Precedes)]);
        assert!(would_create_cycle(
            &inner,
            &WorkItemRef::new("b"),
            &WorkItemRef::new("a"),
            RelationshipType::Precedes,
        ));
    }

    #[test]
    fn exempt_families_may_cycle() {
        let inner = graph_with(&[("a", "b", RelationshipType::Duplicates)]);
        assert!(!would_create_cycle(
            &inner,
            &WorkItemRef::new("b"),
            &WorkItemRef::new("a"),
            RelationshipType::Duplicates,
        ));
        assert!(!would_create_cycle(
            &inner,
            &WorkItemRef::new("b"),
            &WorkItemRef::new("a"),
            RelationshipType::Related,
        ));
    }

    #[test]
    fn self_relation_in_ordered_family_is_a_cycle() {
        let inner = GraphInner::new();
        assert!(would_create_cycle(
            &inner,
            &WorkItemRef::new("a"),
            &WorkItemRef::new("a"),
            RelationshipType::Blocks,
        ));
    }
}
