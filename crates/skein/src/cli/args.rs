//! Argument structs for CLI commands.

use super::types::RelationshipTypeArg;
use super::validators::{validate_item_id, validate_title};
use clap::{Args, Subcommand};

/// Arguments for the `init` command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command.
#[derive(Args, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `item` command.
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Registry action to perform
    #[command(subcommand)]
    pub action: ItemAction,
}

/// Item registry actions.
#[derive(Subcommand, Debug, Clone)]
pub enum ItemAction {
    /// Register a work item identifier
    Add {
        /// Item identifier
        #[arg(value_parser = validate_item_id)]
        id: String,

        /// Optional display title
        #[arg(long, value_parser = validate_title)]
        title: Option<String>,
    },

    /// Remove a work item from the registry
    ///
    /// Fails while any relationship still touches the item.
    Rm {
        /// Item identifier
        #[arg(value_parser = validate_item_id)]
        id: String,
    },

    /// List registered items
    List,
}

/// Arguments for the `link` command.
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Link action to perform
    #[command(subcommand)]
    pub action: LinkAction,
}

/// Relationship actions.
#[derive(Subcommand, Debug, Clone)]
pub enum LinkAction {
    /// Add a typed relationship (the complementary link is implied)
    Add {
        /// Source item
        #[arg(value_parser = validate_item_id)]
        source: String,

        /// Target item
        #[arg(value_parser = validate_item_id)]
        target: String,

        /// Relationship type, read source-to-target
        #[arg(long = "type", value_enum, default_value_t = RelationshipTypeArg::Blocks)]
        relationship: RelationshipTypeArg,
    },

    /// Remove a typed relationship and its complement
    Rm {
        /// Source item
        #[arg(value_parser = validate_item_id)]
        source: String,

        /// Target item
        #[arg(value_parser = validate_item_id)]
        target: String,

        /// Relationship type, read source-to-target
        #[arg(long = "type", value_enum, default_value_t = RelationshipTypeArg::Blocks)]
        relationship: RelationshipTypeArg,
    },

    /// List every relationship touching an item
    List {
        /// Item identifier
        #[arg(value_parser = validate_item_id)]
        id: String,
    },

    /// Check whether any relationship runs source -> target
    Check {
        /// Source item
        #[arg(value_parser = validate_item_id)]
        source: String,

        /// Target item
        #[arg(value_parser = validate_item_id)]
        target: String,
    },
}

/// Arguments for the `deps` command.
#[derive(Args, Debug, Clone)]
pub struct DepsArgs {
    /// Item identifier
    #[arg(value_parser = validate_item_id)]
    pub id: String,

    /// Show the items this item blocks instead of its blockers
    #[arg(long)]
    pub reverse: bool,
}

/// Arguments for the `path` command.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Show the blocking-item set instead of the critical path
    #[arg(long)]
    pub blockers: bool,
}

/// Arguments for the `impact` command.
#[derive(Args, Debug, Clone)]
pub struct ImpactArgs {
    /// Item identifier
    #[arg(value_parser = validate_item_id)]
    pub id: String,
}

/// Arguments for the `view` command.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Focal item identifier
    #[arg(value_parser = validate_item_id)]
    pub id: String,

    /// Expansion depth in hops (defaults to the workspace view-depth)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Visible relationship types, comma separated (defaults to all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub types: Vec<RelationshipTypeArg>,
}
