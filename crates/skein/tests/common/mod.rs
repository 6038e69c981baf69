//! Shared helpers for integration tests.

#![allow(dead_code)]

use skein::domain::WorkItemRef;
use skein::engine::DependencyStore;
use skein::resolver::{ItemRecord, ItemRegistry, ItemResolver};
use std::sync::Arc;

/// A store whose resolver knows exactly the given item ids.
pub async fn store_with_items(ids: &[&str]) -> (Arc<ItemRegistry>, DependencyStore) {
    let registry = Arc::new(ItemRegistry::new());
    for id in ids {
        registry.register(ItemRecord::new(*id, None)).await;
    }
    let resolver: Arc<dyn ItemResolver> = registry.clone();
    let store = DependencyStore::new(resolver);
    (registry, store)
}

/// Shorthand for building a reference.
pub fn item(id: &str) -> WorkItemRef {
    WorkItemRef::new(id)
}
