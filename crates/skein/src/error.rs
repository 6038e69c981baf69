//! Error types for skein operations.

use crate::domain::{RelationshipType, WorkItemRef};
use std::io;
use thiserror::Error;

/// The error type for skein operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The working directory is not inside an initialized skein workspace.
    #[error("Not a skein workspace (run `skein init` first)")]
    NotInitialized,

    /// Referenced work item is unknown to the item resolver.
    #[error("Work item not found: {0}")]
    NotFound(WorkItemRef),

    /// The proposed relationship would close a cycle in a cycle-sensitive
    /// relationship family.
    #[error("Cycle detected: {from} --[{relationship}]--> {to} would create a cycle")]
    CycleDetected {
        /// Source of the proposed edge.
        from: WorkItemRef,
        /// Target of the proposed edge.
        to: WorkItemRef,
        /// The attempted relationship type.
        relationship: RelationshipType,
    },

    /// Unrecognized relationship type supplied.
    #[error("Invalid relationship type: {0}")]
    InvalidRelationshipType(String),

    /// The item still has relationships and cannot be removed.
    #[error("Work item {item} still has {edge_count} relationship(s); remove them first")]
    HasRelationships {
        /// The item that was asked to be removed.
        item: WorkItemRef,
        /// How many edges still touch it.
        edge_count: usize,
    },
}

/// A specialized Result type for skein operations.
pub type Result<T> = std::result::Result<T, Error>;
