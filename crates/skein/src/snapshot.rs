//! Workspace snapshot persistence.
//!
//! The CLI keeps its state in two JSONL files under `.skein/`:
//!
//! - `items.jsonl` — the item registry (one [`ItemRecord`] per line)
//! - `links.jsonl` — one line per logical relationship, stored in its
//!   canonical direction; complements are rebuilt on load
//!
//! Loading replays every link through [`DependencyStore::add_dependency`],
//! so the cycle guard revalidates the whole file: a hand-edited line that
//! would close a cycle, or one referencing an unregistered item, degrades
//! to a [`LoadWarning`] instead of aborting the load.

use crate::domain::{DependencyEdge, RelationshipType, WorkItemRef};
use crate::engine::DependencyStore;
use crate::error::{Error, Result};
use crate::resolver::{ItemRecord, ItemRegistry, ItemResolver};
use serde::{Deserialize, Serialize};
use skein_jsonl::{read_jsonl_resilient, write_jsonl_atomic};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Name of the item registry file inside `.skein/`.
pub const ITEMS_FILE_NAME: &str = "items.jsonl";

/// Name of the relationship file inside `.skein/`.
pub const LINKS_FILE_NAME: &str = "links.jsonl";

/// One line of `links.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Source of the canonical edge.
    pub source: WorkItemRef,

    /// Target of the canonical edge.
    pub target: WorkItemRef,

    /// Relationship type, always the canonical member of its pair.
    pub relationship: RelationshipType,
}

/// Non-fatal problems encountered while loading a snapshot.
#[derive(Debug, Clone)]
pub enum LoadWarning {
    /// A line could not be parsed; it was skipped.
    MalformedLine {
        /// File the line came from.
        file: &'static str,
        /// 1-based line number.
        line_number: usize,
        /// Parse failure description.
        error: String,
    },

    /// A link referenced an item missing from the registry; skipped.
    UnknownEndpoint {
        /// The offending link.
        link: LinkRecord,
    },

    /// A link would have closed a cycle; skipped to keep the invariant.
    CycleBroken {
        /// The offending link.
        link: LinkRecord,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine {
                file,
                line_number,
                error,
            } => write!(f, "{file}:{line_number}: malformed line: {error}"),
            Self::UnknownEndpoint { link } => write!(
                f,
                "skipped link {} --[{}]--> {}: endpoint not registered",
                link.source, link.relationship, link.target
            ),
            Self::CycleBroken { link } => write!(
                f,
                "skipped link {} --[{}]--> {}: would create a cycle",
                link.source, link.relationship, link.target
            ),
        }
    }
}

/// Load the registry and dependency store from a `.skein/` directory.
///
/// Missing files are treated as empty (first run after `skein init`).
///
/// # Errors
///
/// Only IO failures abort the load; data problems become warnings.
pub async fn load(
    skein_dir: &Path,
) -> Result<(Arc<ItemRegistry>, DependencyStore, Vec<LoadWarning>)> {
    let mut warnings = Vec::new();

    let items_path = skein_dir.join(ITEMS_FILE_NAME);
    let records: Vec<ItemRecord> = if items_path.exists() {
        let (records, jsonl_warnings) = read_jsonl_resilient(&items_path).await.map_err(io_err)?;
        warnings.extend(convert_warnings(ITEMS_FILE_NAME, jsonl_warnings));
        records
    } else {
        Vec::new()
    };

    let registry = Arc::new(ItemRegistry::from_records(records));
    let resolver: Arc<dyn ItemResolver> = registry.clone();
    let store = DependencyStore::new(resolver);

    let links_path = skein_dir.join(LINKS_FILE_NAME);
    if links_path.exists() {
        let (links, jsonl_warnings): (Vec<LinkRecord>, _) =
            read_jsonl_resilient(&links_path).await.map_err(io_err)?;
        warnings.extend(convert_warnings(LINKS_FILE_NAME, jsonl_warnings));

        for link in links {
            match store
                .add_dependency(&link.source, &link.target, link.relationship)
                .await
            {
                // Ok(false) is a duplicate line; nothing to report.
                Ok(_) => {}
                Err(Error::NotFound(_)) => {
                    warnings.push(LoadWarning::UnknownEndpoint { link });
                }
                Err(Error::CycleDetected { .. }) => {
                    warnings.push(LoadWarning::CycleBroken { link });
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok((registry, store, warnings))
}

/// Save the registry and dependency store to a `.skein/` directory.
///
/// Both files are written atomically. Links are written in their canonical
/// direction only and sorted, so unchanged graphs produce byte-identical
/// files across saves.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub async fn save(skein_dir: &Path, registry: &ItemRegistry, store: &DependencyStore) -> Result<()> {
    let items = registry.all().await;
    write_jsonl_atomic(skein_dir.join(ITEMS_FILE_NAME), &items)
        .await
        .map_err(io_err)?;

    let mut links: Vec<LinkRecord> = store
        .edges()
        .await
        .into_iter()
        .filter(is_canonical)
        .map(|edge| LinkRecord {
            source: edge.source,
            target: edge.target,
            relationship: edge.relationship,
        })
        .collect();
    links.sort_by(|a, b| {
        (&a.source, &a.target, a.relationship).cmp(&(&b.source, &b.target, b.relationship))
    });
    write_jsonl_atomic(skein_dir.join(LINKS_FILE_NAME), &links)
        .await
        .map_err(io_err)?;

    tracing::debug!(items = items.len(), links = links.len(), "snapshot saved");
    Ok(())
}

/// Picks one direction of each complementary pair for serialization.
///
/// `related` mirrors itself, so the pair is collapsed by endpoint order;
/// a related self-link is stored as a single edge and always kept.
fn is_canonical(edge: &DependencyEdge) -> bool {
    match edge.relationship {
        RelationshipType::Parent
        | RelationshipType::Blocks
        | RelationshipType::Duplicates
        | RelationshipType::Precedes => true,
        RelationshipType::Child
        | RelationshipType::BlockedBy
        | RelationshipType::DuplicatedBy
        | RelationshipType::Follows => false,
        RelationshipType::Related => edge.source <= edge.target,
    }
}

fn convert_warnings(
    file: &'static str,
    warnings: Vec<skein_jsonl::Warning>,
) -> Vec<LoadWarning> {
    warnings
        .into_iter()
        .map(|w| match w {
            skein_jsonl::Warning::MalformedLine { line_number, error } => {
                LoadWarning::MalformedLine {
                    file,
                    line_number,
                    error,
                }
            }
        })
        .collect()
}

fn io_err(e: skein_jsonl::Error) -> Error {
    match e {
        skein_jsonl::Error::Io(io) => Error::Io(io),
        skein_jsonl::Error::Json(json) => Error::Json(json),
    }
}
