//! Item existence resolution.
//!
//! The engine does not own work items; it validates every reference against
//! an [`ItemResolver`] supplied at construction time. The CLI uses
//! [`ItemRegistry`], a registry loaded from the workspace snapshot; tests
//! construct an `ItemRegistry` directly and register whatever they need.

use crate::domain::WorkItemRef;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Confirms that a work item exists and is addressable.
///
/// Implementations must be `Send + Sync`; the engine holds one behind an
/// `Arc<dyn ItemResolver>` and consults it before touching the graph.
#[async_trait]
pub trait ItemResolver: Send + Sync {
    /// Returns true if the item is known.
    async fn exists(&self, item: &WorkItemRef) -> Result<bool>;
}

/// A registered work item as the CLI layer sees it.
///
/// The engine itself only ever receives the [`WorkItemRef`]; title and
/// registration time exist so command output can name items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// The item's identifier.
    pub id: WorkItemRef,

    /// Optional display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// When the item was registered with this workspace.
    pub registered_at: DateTime<Utc>,
}

impl ItemRecord {
    /// Create a record stamped with the current time.
    pub fn new(id: impl Into<WorkItemRef>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
            registered_at: Utc::now(),
        }
    }
}

/// In-memory item registry; the CLI's [`ItemResolver`] implementation.
///
/// Backed by a `BTreeMap` behind an async `RwLock` so listings come out in
/// identifier order and lookups can run concurrently with each other.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: RwLock<BTreeMap<WorkItemRef, ItemRecord>>,
}

impl ItemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the given records.
    ///
    /// Later duplicates of the same id win, matching last-writer-wins
    /// snapshot replay.
    #[must_use]
    pub fn from_records(records: Vec<ItemRecord>) -> Self {
        let items = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Register an item. Returns false if the id was already present
    /// (the existing record is kept).
    pub async fn register(&self, record: ItemRecord) -> bool {
        let mut items = self.items.write().await;
        if items.contains_key(&record.id) {
            return false;
        }
        items.insert(record.id.clone(), record);
        true
    }

    /// Remove an item. Returns false if the id was not present.
    pub async fn remove(&self, id: &WorkItemRef) -> bool {
        self.items.write().await.remove(id).is_some()
    }

    /// Look up a single record.
    pub async fn get(&self, id: &WorkItemRef) -> Option<ItemRecord> {
        self.items.read().await.get(id).cloned()
    }

    /// All records in identifier order.
    pub async fn all(&self) -> Vec<ItemRecord> {
        self.items.read().await.values().cloned().collect()
    }

    /// Number of registered items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemResolver for ItemRegistry {
    async fn exists(&self, item: &WorkItemRef) -> Result<bool> {
        Ok(self.items.read().await.contains_key(item))
    }
}
