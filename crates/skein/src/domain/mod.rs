//! Domain types for the work-item dependency graph.
//!
//! The engine only ever sees opaque [`WorkItemRef`] identifiers; item content
//! (title, state, priority) lives with whoever implements
//! [`ItemResolver`](crate::resolver::ItemResolver).

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier for a work item.
///
/// Ordered so that analyzer tie-breaks and set-valued query results are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkItemRef(String);

impl WorkItemRef {
    /// Create a new work item reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WorkItemRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkItemRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Typed, directed relationship between two work items.
///
/// An edge reads left to right: `source blocks target`, `source parent-of
/// target`, and so on. Every type has exactly one complementary type;
/// [`Related`](Self::Related) is its own complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// Source is the parent of target.
    Parent,

    /// Source is a child of target.
    Child,

    /// Source blocks target; target cannot proceed until source is done.
    Blocks,

    /// Source is blocked by target.
    BlockedBy,

    /// Source duplicates target.
    Duplicates,

    /// Source is duplicated by target.
    DuplicatedBy,

    /// Source comes before target in a planned sequence.
    Precedes,

    /// Source comes after target in a planned sequence.
    Follows,

    /// Soft, symmetric association.
    Related,
}

/// Grouping of relationship types into families that share cycle semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipFamily {
    /// Parent/Child. Acyclic: no item may be its own transitive ancestor.
    Hierarchy,

    /// Blocks/BlockedBy. Acyclic: a blocking cycle is unresolvable.
    Blocking,

    /// Duplicates/DuplicatedBy. Cycles are harmless (mutual duplicates).
    Duplication,

    /// Precedes/Follows. Treated as a strict order, so acyclic.
    Sequence,

    /// Related. Symmetric; circular clusters are fine.
    Association,
}

impl RelationshipType {
    /// Every relationship type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Parent,
        Self::Child,
        Self::Blocks,
        Self::BlockedBy,
        Self::Duplicates,
        Self::DuplicatedBy,
        Self::Precedes,
        Self::Follows,
        Self::Related,
    ];

    /// The mandatory inverse accompanying every stored edge of this type.
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Blocks => Self::BlockedBy,
            Self::BlockedBy => Self::Blocks,
            Self::Duplicates => Self::DuplicatedBy,
            Self::DuplicatedBy => Self::Duplicates,
            Self::Precedes => Self::Follows,
            Self::Follows => Self::Precedes,
            Self::Related => Self::Related,
        }
    }

    /// The family this type belongs to.
    #[must_use]
    pub fn family(self) -> RelationshipFamily {
        match self {
            Self::Parent | Self::Child => RelationshipFamily::Hierarchy,
            Self::Blocks | Self::BlockedBy => RelationshipFamily::Blocking,
            Self::Duplicates | Self::DuplicatedBy => RelationshipFamily::Duplication,
            Self::Precedes | Self::Follows => RelationshipFamily::Sequence,
            Self::Related => RelationshipFamily::Association,
        }
    }

    /// Whether the cycle guard must validate edges of this type.
    #[must_use]
    pub fn is_cycle_sensitive(self) -> bool {
        matches!(
            self.family(),
            RelationshipFamily::Hierarchy
                | RelationshipFamily::Blocking
                | RelationshipFamily::Sequence
        )
    }

    /// Kebab-case name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Blocks => "blocks",
            Self::BlockedBy => "blocked-by",
            Self::Duplicates => "duplicates",
            Self::DuplicatedBy => "duplicated-by",
            Self::Precedes => "precedes",
            Self::Follows => "follows",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| Error::InvalidRelationshipType(s.to_string()))
    }
}

/// A typed, directed edge between two work items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Item the edge starts at.
    pub source: WorkItemRef,

    /// Item the edge points to.
    pub target: WorkItemRef,

    /// How source relates to target.
    pub relationship: RelationshipType,
}

impl DependencyEdge {
    /// Create an edge.
    pub fn new(
        source: impl Into<WorkItemRef>,
        target: impl Into<WorkItemRef>,
        relationship: RelationshipType,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship,
        }
    }

    /// The complementary edge that always accompanies this one in the store.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            relationship: self.relationship.complement(),
        }
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --[{}]--> {}",
            self.source, self.relationship, self.target
        )
    }
}

/// A node in an extracted neighborhood, tagged with its BFS ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborhoodNode {
    /// The work item.
    pub item: WorkItemRef,

    /// Distance from the focal item in traversed hops. Ring 0 is the focus.
    pub ring: usize,
}

/// Depth-bounded, type-filtered sub-graph around a focal item.
///
/// Nodes are sorted by `(ring, item)` and edges by `(source, target,
/// relationship)`, so repeated extractions compare equal and a deeper
/// extraction is a superset of a shallower one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighborhood {
    /// The focal item the expansion started from.
    pub focus: WorkItemRef,

    /// Items reached within the depth bound, focus included.
    pub nodes: Vec<NeighborhoodNode>,

    /// All visible-type edges connecting included nodes.
    pub edges: Vec<DependencyEdge>,
}

impl Neighborhood {
    /// Items in the neighborhood, without ring information.
    #[must_use]
    pub fn node_refs(&self) -> Vec<&WorkItemRef> {
        self.nodes.iter().map(|n| &n.item).collect()
    }
}
