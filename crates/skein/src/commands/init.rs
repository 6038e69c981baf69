//! Implementation of the `init` command.
//!
//! Initializes a skein workspace: creates the `.skein/` directory with a
//! configuration file and empty snapshot files.

use crate::error::{Error, Result};
use crate::snapshot::{ITEMS_FILE_NAME, LINKS_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the skein directory.
pub const SKEIN_DIR_NAME: &str = ".skein";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the gitignore file within `.skein`.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Default expansion depth for the `view` command.
pub const DEFAULT_VIEW_DEPTH: usize = 2;

/// Maximum directory depth to traverse when searching for the skein root.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for skein.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkeinConfig {
    /// Default neighborhood depth used by `skein view` when `--depth` is
    /// not given.
    #[serde(rename = "view-depth", default = "default_view_depth")]
    pub view_depth: usize,
}

fn default_view_depth() -> usize {
    DEFAULT_VIEW_DEPTH
}

impl SkeinConfig {
    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for SkeinConfig {
    fn default() -> Self {
        Self {
            view_depth: DEFAULT_VIEW_DEPTH,
        }
    }
}

/// Result of the init command.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created skein directory.
    pub skein_dir: PathBuf,
    /// Path to the created config file.
    pub config_file: PathBuf,
    /// Path to the created items file.
    pub items_file: PathBuf,
    /// Path to the created links file.
    pub links_file: PathBuf,
}

/// Initialize a skein workspace in the given directory.
///
/// # Errors
///
/// Returns `Error::Config` if the directory is already initialized, or an
/// IO error if the files cannot be created.
pub async fn init(dir: &Path) -> Result<InitResult> {
    let skein_dir = dir.join(SKEIN_DIR_NAME);
    let config_file = skein_dir.join(CONFIG_FILE_NAME);

    if config_file.exists() {
        return Err(Error::Config(format!(
            "Already initialized: {} exists",
            config_file.display()
        )));
    }

    fs::create_dir_all(&skein_dir).await?;

    SkeinConfig::default().save(&config_file).await?;

    let items_file = skein_dir.join(ITEMS_FILE_NAME);
    let links_file = skein_dir.join(LINKS_FILE_NAME);
    fs::write(&items_file, b"").await?;
    fs::write(&links_file, b"").await?;

    // Keep interrupted atomic writes out of version control.
    fs::write(skein_dir.join(GITIGNORE_FILE_NAME), b"*.tmp\n").await?;

    tracing::debug!(dir = %skein_dir.display(), "initialized skein workspace");

    Ok(InitResult {
        skein_dir,
        config_file,
        items_file,
        links_file,
    })
}

/// Walk upward from `start` looking for a directory containing `.skein/`.
///
/// The walk is capped so that pathological symlink layouts cannot loop
/// forever.
#[must_use]
pub fn find_skein_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    for _ in 0..MAX_TRAVERSAL_DEPTH {
        let dir = current?;
        if dir.join(SKEIN_DIR_NAME).is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_creates_workspace_layout() {
        let temp_dir = TempDir::new().unwrap();

        let result = init(temp_dir.path()).await.unwrap();

        assert!(result.skein_dir.is_dir());
        assert!(result.config_file.is_file());
        assert!(result.items_file.is_file());
        assert!(result.links_file.is_file());
    }

    #[tokio::test]
    async fn init_twice_fails() {
        let temp_dir = TempDir::new().unwrap();

        init(temp_dir.path()).await.unwrap();
        let second = init(temp_dir.path()).await;

        assert!(second.is_err());
    }

    #[tokio::test]
    async fn config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let config = SkeinConfig { view_depth: 4 };
        config.save(&path).await.unwrap();
        let loaded = SkeinConfig::load(&path).await.unwrap();

        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn find_root_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init(temp_dir.path()).await.unwrap();

        let sub = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&sub).unwrap();

        let root = find_skein_root(&sub).unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn find_root_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_skein_root(temp_dir.path()).is_none());
    }
}
