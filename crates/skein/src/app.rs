//! Application context for CLI command execution.
//!
//! The `App` struct wires the engine together for the binary: it finds the
//! workspace root, loads configuration and the snapshot, and hands out the
//! store, analyzer, and registry. Everything is constructed here once and
//! passed by reference; there are no process-wide singletons.

use crate::commands::init::{find_skein_root, SkeinConfig, CONFIG_FILE_NAME, SKEIN_DIR_NAME};
use crate::domain::WorkItemRef;
use crate::engine::DependencyStore;
use crate::error::{Error, Result};
use crate::resolver::ItemRegistry;
use crate::snapshot;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application context for CLI operations.
pub struct App {
    registry: Arc<ItemRegistry>,
    store: DependencyStore,
    skein_dir: PathBuf,
    config: SkeinConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("skein_dir", &self.skein_dir)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for a `.skein/` directory, loads
    /// configuration and the snapshot, and logs any load warnings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when no workspace is found, or the
    /// underlying error if configuration or snapshot loading fails.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root = find_skein_root(working_dir).ok_or(Error::NotInitialized)?;
        let skein_dir = root.join(SKEIN_DIR_NAME);

        let config = SkeinConfig::load(&skein_dir.join(CONFIG_FILE_NAME)).await?;
        let (registry, store, warnings) = snapshot::load(&skein_dir).await?;
        for warning in &warnings {
            tracing::warn!(%warning, "snapshot load warning");
        }

        Ok(Self {
            registry,
            store,
            skein_dir,
            config,
        })
    }

    /// The dependency store.
    #[must_use]
    pub fn store(&self) -> &DependencyStore {
        &self.store
    }

    /// The item registry (also the engine's resolver).
    #[must_use]
    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Workspace configuration.
    #[must_use]
    pub fn config(&self) -> &SkeinConfig {
        &self.config
    }

    /// Path to the `.skein` directory.
    #[must_use]
    pub fn skein_dir(&self) -> &Path {
        &self.skein_dir
    }

    /// Persist the registry and graph to the workspace snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if either snapshot file cannot be written.
    pub async fn save(&self) -> Result<()> {
        snapshot::save(&self.skein_dir, &self.registry, &self.store).await
    }

    /// Remove an item from the registry.
    ///
    /// Item deletion is a registry concern, but the graph invariant demands
    /// that every edge touching the item is removed first; this refuses
    /// otherwise. Returns `Ok(false)` if the item was not registered.
    ///
    /// # Errors
    ///
    /// [`Error::HasRelationships`] while edges still touch the item.
    pub async fn remove_item(&self, id: &WorkItemRef) -> Result<bool> {
        if self.registry.get(id).await.is_none() {
            return Ok(false);
        }

        let edges = self.store.edges_of(id).await?;
        if !edges.is_empty() {
            return Err(Error::HasRelationships {
                item: id.clone(),
                edge_count: edges.len(),
            });
        }

        Ok(self.registry.remove(id).await)
    }
}
