//! Depth-bounded neighborhood extraction.

use super::inner::GraphInner;
use super::NeighborhoodExtractor;
use crate::domain::{DependencyEdge, Neighborhood, NeighborhoodNode, RelationshipType, WorkItemRef};
use crate::error::Result;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet, VecDeque};

impl NeighborhoodExtractor {
    /// Expands outward from `focus` up to `depth` hops, traversing only
    /// edges whose type is in `visible`.
    ///
    /// Each BFS level is one ring of the exploration view. Depth 0, or an
    /// empty `visible` set, yields only the focal node — the fully collapsed
    /// view driven by per-type filter checkboxes. For a fixed focus and
    /// filter set the result at `depth + 1` is a superset of the result at
    /// `depth`, so an "expand" interaction never loses nodes it already
    /// showed.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::error::Error::NotFound) if the resolver
    /// does not know `focus`.
    pub async fn neighborhood(
        &self,
        focus: &WorkItemRef,
        depth: usize,
        visible: &HashSet<RelationshipType>,
    ) -> Result<Neighborhood> {
        self.shared.ensure_known(focus).await?;
        let inner = self.shared.inner.read().await;
        Ok(extract(&inner, focus, depth, visible))
    }
}

fn extract(
    inner: &GraphInner,
    focus: &WorkItemRef,
    depth: usize,
    visible: &HashSet<RelationshipType>,
) -> Neighborhood {
    let mut nodes = vec![NeighborhoodNode {
        item: focus.clone(),
        ring: 0,
    }];
    let mut edges = Vec::new();

    // A known item with no relationships has no graph node; its
    // neighborhood is just itself.
    if let Some(start) = inner.node(focus) {
        let mut rings = HashMap::from([(start, 0usize)]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((node, ring)) = queue.pop_front() {
            if ring == depth {
                continue;
            }
            for edge in inner.graph.edges(node) {
                if !visible.contains(edge.weight()) {
                    continue;
                }
                let next = edge.target();
                if !rings.contains_key(&next) {
                    rings.insert(next, ring + 1);
                    nodes.push(NeighborhoodNode {
                        item: inner.graph[next].clone(),
                        ring: ring + 1,
                    });
                    queue.push_back((next, ring + 1));
                }
            }
        }

        // Every visible edge whose endpoints both made it into the
        // neighborhood, including edges between nodes on the same ring.
        for edge in inner.graph.edge_references() {
            if visible.contains(edge.weight())
                && rings.contains_key(&edge.source())
                && rings.contains_key(&edge.target())
            {
                edges.push(DependencyEdge {
                    source: inner.graph[edge.source()].clone(),
                    target: inner.graph[edge.target()].clone(),
                    relationship: *edge.weight(),
                });
            }
        }
    }

    nodes.sort_by(|a, b| a.ring.cmp(&b.ring).then_with(|| a.item.cmp(&b.item)));
    edges.sort();

    Neighborhood {
        focus: focus.clone(),
        nodes,
        edges,
    }
}
