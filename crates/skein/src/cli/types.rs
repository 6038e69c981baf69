//! Argument value types shared across CLI commands.

use crate::domain::RelationshipType;
use clap::ValueEnum;
use std::fmt;

/// Relationship type as a CLI argument.
///
/// Mirrors [`RelationshipType`]; clap derives the kebab-case value names
/// (`blocks`, `blocked-by`, ...), matching the serde representation used in
/// snapshot files and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelationshipTypeArg {
    /// Source is the parent of target.
    Parent,

    /// Source is a child of target.
    Child,

    /// Source blocks target.
    Blocks,

    /// Source is blocked by target.
    BlockedBy,

    /// Source duplicates target.
    Duplicates,

    /// Source is duplicated by target.
    DuplicatedBy,

    /// Source comes before target.
    Precedes,

    /// Source comes after target.
    Follows,

    /// Soft symmetric association.
    Related,
}

impl From<RelationshipTypeArg> for RelationshipType {
    fn from(arg: RelationshipTypeArg) -> Self {
        match arg {
            RelationshipTypeArg::Parent => Self::Parent,
            RelationshipTypeArg::Child => Self::Child,
            RelationshipTypeArg::Blocks => Self::Blocks,
            RelationshipTypeArg::BlockedBy => Self::BlockedBy,
            RelationshipTypeArg::Duplicates => Self::Duplicates,
            RelationshipTypeArg::DuplicatedBy => Self::DuplicatedBy,
            RelationshipTypeArg::Precedes => Self::Precedes,
            RelationshipTypeArg::Follows => Self::Follows,
            RelationshipTypeArg::Related => Self::Related,
        }
    }
}

impl fmt::Display for RelationshipTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", RelationshipType::from(*self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arg_maps_onto_every_domain_type() {
        let args = [
            RelationshipTypeArg::Parent,
            RelationshipTypeArg::Child,
            RelationshipTypeArg::Blocks,
            RelationshipTypeArg::BlockedBy,
            RelationshipTypeArg::Duplicates,
            RelationshipTypeArg::DuplicatedBy,
            RelationshipTypeArg::Precedes,
            RelationshipTypeArg::Follows,
            RelationshipTypeArg::Related,
        ];
        let mapped: Vec<RelationshipType> = args.iter().map(|&a| a.into()).collect();
        assert_eq!(mapped, RelationshipType::ALL);
    }

    #[test]
    fn display_matches_domain_names() {
        assert_eq!(RelationshipTypeArg::BlockedBy.to_string(), "blocked-by");
        assert_eq!(RelationshipTypeArg::Related.to_string(), "related");
    }
}
