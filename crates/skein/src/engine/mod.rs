//! The dependency graph engine.
//!
//! # Architecture
//!
//! The engine owns a single in-memory graph:
//!
//! - `petgraph::DiGraph<WorkItemRef, RelationshipType>` for the edge set
//! - `HashMap<WorkItemRef, NodeIndex>` for O(1) node lookups
//!
//! Three façades share the graph behind one `Arc`:
//!
//! - [`DependencyStore`] — mutation and point queries
//! - [`CriticalPathAnalyzer`] — longest blocking chain, blocking-item set
//! - [`NeighborhoodExtractor`] — depth-bounded, type-filtered sub-graphs
//!
//! All three are created from [`DependencyStore::new`] and passed around by
//! value (they are cheap `Arc` handles); there is no global state.
//!
//! ## Edge direction convention
//!
//! An edge reads left to right: `source --[blocks]--> target` means source
//! blocks target. Every mutation writes a complementary pair: storing
//! `(A, B, blocks)` also stores `(B, A, blocked-by)`, inside the same
//! write-lock critical section. `related` is its own complement, so a
//! related pair is two mirrored `related` edges.
//!
//! ## Cycle invariant
//!
//! The hierarchy (`parent`/`child`), blocking (`blocks`/`blocked-by`), and
//! sequence (`precedes`/`follows`) families must stay acyclic. The cycle
//! guard runs under the write lock before every commit, so two concurrent
//! additions can never each pass validation against a stale graph.
//! Duplication and plain `related` links are exempt; mutual duplicates and
//! circular related clusters are legal.
//!
//! ## Concurrency
//!
//! `tokio::sync::RwLock` gives readers-writer discipline: any number of
//! concurrent queries against a consistent snapshot, exclusive access for
//! validate-plus-commit. Item existence checks go through the injected
//! [`ItemResolver`](crate::resolver::ItemResolver) before the lock is taken.

mod cycle;
mod critical_path;
mod inner;
mod neighborhood;
mod store;

use crate::domain::WorkItemRef;
use crate::error::{Error, Result};
use crate::resolver::ItemResolver;
use inner::GraphInner;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared graph state behind the three engine façades.
pub(crate) struct Shared {
    inner: RwLock<GraphInner>,
    resolver: Arc<dyn ItemResolver>,
}

impl Shared {
    /// Fails with [`Error::NotFound`] unless the resolver knows the item.
    async fn ensure_known(&self, item: &WorkItemRef) -> Result<()> {
        if self.resolver.exists(item).await? {
            Ok(())
        } else {
            Err(Error::NotFound(item.clone()))
        }
    }
}

/// Owns the typed relationship graph and exposes mutation and point queries.
///
/// Cloning is cheap and every clone sees the same graph.
#[derive(Clone)]
pub struct DependencyStore {
    shared: Arc<Shared>,
}

impl DependencyStore {
    /// Create an empty store that validates references against `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn ItemResolver>) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: RwLock::new(GraphInner::new()),
                resolver,
            }),
        }
    }

    /// Analyzer reading the same graph.
    #[must_use]
    pub fn analyzer(&self) -> CriticalPathAnalyzer {
        CriticalPathAnalyzer {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Neighborhood extractor reading the same graph.
    #[must_use]
    pub fn neighborhoods(&self) -> NeighborhoodExtractor {
        NeighborhoodExtractor {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl std::fmt::Debug for DependencyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyStore").finish_non_exhaustive()
    }
}

/// Computes the critical path and blocking-item views of the graph.
#[derive(Clone)]
pub struct CriticalPathAnalyzer {
    shared: Arc<Shared>,
}

/// Extracts depth-bounded, type-filtered neighborhoods for exploration UIs.
#[derive(Clone)]
pub struct NeighborhoodExtractor {
    shared: Arc<Shared>,
}
