//! Mutation and point-query operations on the dependency store.

use super::cycle::would_create_cycle;
use super::DependencyStore;
use crate::domain::{DependencyEdge, RelationshipType, WorkItemRef};
use crate::error::{Error, Result};
use petgraph::visit::EdgeRef;
use std::collections::BTreeSet;

impl DependencyStore {
    /// Record that `source` relates to `target` with the given type.
    ///
    /// Commits the edge together with its complement in one critical
    /// section. Returns `Ok(false)` without touching the graph if the exact
    /// typed edge already exists.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if either reference is unknown to the resolver
    /// - [`Error::CycleDetected`] if the edge would close a cycle in a
    ///   cycle-sensitive family; the graph is left exactly as it was
    pub async fn add_dependency(
        &self,
        source: &WorkItemRef,
        target: &WorkItemRef,
        relationship: RelationshipType,
    ) -> Result<bool> {
        self.shared.ensure_known(source).await?;
        self.shared.ensure_known(target).await?;

        let mut inner = self.shared.inner.write().await;

        if let (Some(s), Some(t)) = (inner.node(source), inner.node(target)) {
            if inner.typed_edge(s, t, relationship).is_some() {
                return Ok(false);
            }
        }

        if would_create_cycle(&inner, source, target, relationship) {
            return Err(Error::CycleDetected {
                from: source.clone(),
                to: target.clone(),
                relationship,
            });
        }

        let s = inner.intern(source);
        let t = inner.intern(target);
        inner.graph.add_edge(s, t, relationship);

        let complement = relationship.complement();
        // A related self-link is its own complement; store it once.
        if !(s == t && complement == relationship) {
            inner.graph.add_edge(t, s, complement);
        }

        tracing::debug!(%source, %target, %relationship, "dependency added");
        Ok(true)
    }

    /// Remove the typed edge `source -> target` and its complement.
    ///
    /// Returns `Ok(false)` if the edge does not exist; removing twice is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if either reference is unknown to the resolver.
    pub async fn remove_dependency(
        &self,
        source: &WorkItemRef,
        target: &WorkItemRef,
        relationship: RelationshipType,
    ) -> Result<bool> {
        self.shared.ensure_known(source).await?;
        self.shared.ensure_known(target).await?;

        let mut inner = self.shared.inner.write().await;

        let (Some(s), Some(t)) = (inner.node(source), inner.node(target)) else {
            return Ok(false);
        };
        let Some(edge) = inner.typed_edge(s, t, relationship) else {
            return Ok(false);
        };
        inner.graph.remove_edge(edge);

        // Look the complement up only after the first removal: removing an
        // edge invalidates the last edge index.
        if let Some(complement) = inner.typed_edge(t, s, relationship.complement()) {
            inner.graph.remove_edge(complement);
        }

        tracing::debug!(%source, %target, %relationship, "dependency removed");
        Ok(true)
    }

    /// Whether any edge of any type runs `source -> target`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if either reference is unknown to the resolver.
    pub async fn has_dependency(&self, source: &WorkItemRef, target: &WorkItemRef) -> Result<bool> {
        self.shared.ensure_known(source).await?;
        self.shared.ensure_known(target).await?;

        let inner = self.shared.inner.read().await;
        let (Some(s), Some(t)) = (inner.node(source), inner.node(target)) else {
            return Ok(false);
        };
        Ok(inner.graph.edges_connecting(s, t).next().is_some())
    }

    /// The items blocking `item`: targets of its outbound `blocked-by`
    /// edges.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the reference is unknown to the resolver.
    pub async fn direct_dependencies(&self, item: &WorkItemRef) -> Result<BTreeSet<WorkItemRef>> {
        self.typed_targets(item, RelationshipType::BlockedBy).await
    }

    /// The items blocked by `item`: targets of its outbound `blocks` edges.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the reference is unknown to the resolver.
    pub async fn dependents(&self, item: &WorkItemRef) -> Result<BTreeSet<WorkItemRef>> {
        self.typed_targets(item, RelationshipType::Blocks).await
    }

    /// Every stored edge, complements included.
    pub async fn edges(&self) -> Vec<DependencyEdge> {
        let inner = self.shared.inner.read().await;
        inner
            .graph
            .edge_references()
            .map(|edge| DependencyEdge {
                source: inner.graph[edge.source()].clone(),
                target: inner.graph[edge.target()].clone(),
                relationship: *edge.weight(),
            })
            .collect()
    }

    /// All outbound edges of `item`, sorted. Because every relationship is
    /// stored as a complementary pair, this covers everything touching the
    /// item.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the reference is unknown to the resolver.
    pub async fn edges_of(&self, item: &WorkItemRef) -> Result<Vec<DependencyEdge>> {
        self.shared.ensure_known(item).await?;
        let inner = self.shared.inner.read().await;
        let Some(node) = inner.node(item) else {
            return Ok(Vec::new());
        };
        let mut edges: Vec<DependencyEdge> = inner
            .graph
            .edges(node)
            .map(|edge| DependencyEdge {
                source: item.clone(),
                target: inner.graph[edge.target()].clone(),
                relationship: *edge.weight(),
            })
            .collect();
        edges.sort();
        Ok(edges)
    }

    async fn typed_targets(
        &self,
        item: &WorkItemRef,
        relationship: RelationshipType,
    ) -> Result<BTreeSet<WorkItemRef>> {
        self.shared.ensure_known(item).await?;
        let inner = self.shared.inner.read().await;
        let Some(node) = inner.node(item) else {
            return Ok(BTreeSet::new());
        };
        Ok(inner
            .graph
            .edges(node)
            .filter(|edge| *edge.weight() == relationship)
            .map(|edge| inner.graph[edge.target()].clone())
            .collect())
    }
}
