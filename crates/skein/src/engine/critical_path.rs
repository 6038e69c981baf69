//! Critical path computation over the blocking sub-graph.

use super::inner::GraphInner;
use super::CriticalPathAnalyzer;
use crate::domain::{RelationshipType, WorkItemRef};
use crate::error::Result;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap, HashSet};

impl CriticalPathAnalyzer {
    /// The longest chain of blocking dependencies, in order.
    ///
    /// Unit cost per item. When several chains tie for length, the result
    /// prefers the lexicographically smallest starting identifier, then the
    /// smallest identifier at each subsequent step, so repeated calls on an
    /// unchanged graph return the same path. Empty when the graph has no
    /// `blocks` edges.
    pub async fn find_critical_path(&self) -> Vec<WorkItemRef> {
        let inner = self.shared.inner.read().await;
        critical_path(&inner)
    }

    /// Items with at least one outbound `blocks` edge: the set of items
    /// other work cannot proceed without, independent of the single
    /// critical path.
    pub async fn find_blocking_items(&self) -> BTreeSet<WorkItemRef> {
        let inner = self.shared.inner.read().await;
        inner
            .graph
            .edge_references()
            .filter(|edge| *edge.weight() == RelationshipType::Blocks)
            .map(|edge| inner.graph[edge.source()].clone())
            .collect()
    }

    /// The items `item` directly blocks, sorted: what breaks if this item
    /// is not finished. Empty if `item` blocks nothing.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::error::Error::NotFound) if the resolver
    /// does not know `item`.
    pub async fn find_items_depending_on(&self, item: &WorkItemRef) -> Result<Vec<WorkItemRef>> {
        self.shared.ensure_known(item).await?;
        let inner = self.shared.inner.read().await;
        let Some(node) = inner.node(item) else {
            return Ok(Vec::new());
        };
        let mut targets: Vec<WorkItemRef> = blocks_successors(&inner, node)
            .map(|succ| inner.graph[succ].clone())
            .collect();
        targets.sort();
        Ok(targets)
    }
}

/// Longest-path dynamic program over the `blocks` sub-graph.
///
/// The sub-graph is acyclic (the cycle guard refuses blocking cycles), so a
/// memoized walk suffices: `len[v]` is the length of the longest chain
/// starting at `v`, and `next[v]` the successor realizing it. The walk is
/// iterative with an explicit stack; the `open` set stops re-expansion, so
/// the pass is linear in nodes plus edges and cannot overflow the call
/// stack on deep chains.
fn critical_path(inner: &GraphInner) -> Vec<WorkItemRef> {
    let mut blocking_nodes: HashSet<NodeIndex> = HashSet::new();
    for edge in inner.graph.edge_references() {
        if *edge.weight() == RelationshipType::Blocks {
            blocking_nodes.insert(edge.source());
            blocking_nodes.insert(edge.target());
        }
    }
    if blocking_nodes.is_empty() {
        return Vec::new();
    }

    let mut len: HashMap<NodeIndex, usize> = HashMap::new();
    let mut next: HashMap<NodeIndex, Option<NodeIndex>> = HashMap::new();
    let mut open: HashSet<NodeIndex> = HashSet::new();

    for &start in &blocking_nodes {
        if len.contains_key(&start) {
            continue;
        }
        let mut stack = vec![(start, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                if len.contains_key(&node) {
                    continue;
                }
                let best = blocks_successors(inner, node)
                    .filter_map(|succ| len.get(&succ).map(|&l| (l, succ)))
                    .reduce(|best, candidate| pick_successor(inner, best, candidate));
                match best {
                    Some((l, succ)) => {
                        len.insert(node, l + 1);
                        next.insert(node, Some(succ));
                    }
                    None => {
                        len.insert(node, 1);
                        next.insert(node, None);
                    }
                }
                open.remove(&node);
            } else {
                if len.contains_key(&node) || !open.insert(node) {
                    continue;
                }
                stack.push((node, true));
                for succ in blocks_successors(inner, node) {
                    if !len.contains_key(&succ) && !open.contains(&succ) {
                        stack.push((succ, false));
                    }
                }
            }
        }
    }

    let best_start = blocking_nodes.iter().copied().reduce(|best, candidate| {
        let (best_len, cand_len) = (len[&best], len[&candidate]);
        if cand_len > best_len
            || (cand_len == best_len && inner.graph[candidate] < inner.graph[best])
        {
            candidate
        } else {
            best
        }
    });

    let mut path = Vec::new();
    let mut cursor = best_start;
    while let Some(node) = cursor {
        path.push(inner.graph[node].clone());
        cursor = next.get(&node).copied().flatten();
    }
    path
}

/// Greedy successor choice: longer chain first, then the smaller identifier.
/// Applied at every step, this yields the lexicographically smallest of the
/// maximal chains.
fn pick_successor(
    inner: &GraphInner,
    best: (usize, NodeIndex),
    candidate: (usize, NodeIndex),
) -> (usize, NodeIndex) {
    let (best_len, best_node) = best;
    let (cand_len, cand_node) = candidate;
    if cand_len > best_len || (cand_len == best_len && inner.graph[cand_node] < inner.graph[best_node])
    {
        candidate
    } else {
        best
    }
}

fn blocks_successors<'a>(
    inner: &'a GraphInner,
    node: NodeIndex,
) -> impl Iterator<Item = NodeIndex> + 'a {
    inner
        .graph
        .edges(node)
        .filter(|edge| *edge.weight() == RelationshipType::Blocks)
        .map(|edge| edge.target())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks_graph(edges: &[(&str, &str)]) -> GraphInner {
        let mut inner = GraphInner::new();
        for (source, target) in edges {
            let s = inner.intern(&WorkItemRef::new(*source));
            let t = inner.intern(&WorkItemRef::new(*target));
            inner.graph.add_edge(s, t, RelationshipType::Blocks);
            inner.graph.add_edge(t, s, RelationshipType::BlockedBy);
        }
        inner
    }

    fn refs(ids: &[&str]) -> Vec<WorkItemRef> {
        ids.iter().map(|id| WorkItemRef::new(*id)).collect()
    }

    #[test]
    fn empty_graph_has_empty_path() {
        assert!(critical_path(&GraphInner::new()).is_empty());
    }

    #[test]
    fn chain_is_returned_in_order() {
        let inner = blocks_graph(&[("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(critical_path(&inner), refs(&["a", "b", "c", "d"]));
    }

    #[test]
    fn longer_branch_wins() {
        // a -> b -> c and x -> c; the three-item chain dominates.
        let inner = blocks_graph(&[("a", "b"), ("b", "c"), ("x", "c")]);
        assert_eq!(critical_path(&inner), refs(&["a", "b", "c"]));
    }

    #[test]
    fn equal_length_ties_break_on_start_identifier() {
        // Two disjoint two-item chains; "a" sorts before "m".
        let inner = blocks_graph(&[("m", "n"), ("a", "b")]);
        assert_eq!(critical_path(&inner), refs(&["a", "b"]));
    }

    #[test]
    fn equal_length_ties_break_at_each_step() {
        // From "a" both "b" and "z" head equal-length chains; prefer "b".
        let inner = blocks_graph(&[("a", "z"), ("a", "b"), ("b", "c"), ("z", "y")]);
        assert_eq!(critical_path(&inner), refs(&["a", "b", "c"]));
    }

    #[test]
    fn non_blocking_edges_are_invisible() {
        let mut inner = blocks_graph(&[("a", "b")]);
        let b = inner.intern(&WorkItemRef::new("b"));
        let c = inner.intern(&WorkItemRef::new("c"));
        inner.graph.add_edge(b, c, RelationshipType::Parent);
        inner.graph.add_edge(c, b, RelationshipType::Child);

        assert_eq!(critical_path(&inner), refs(&["a", "b"]));
    }
}
