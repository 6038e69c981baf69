//! CLI argument parsing and command dispatch.
//!
//! The command surface maps one-to-one onto the engine operations:
//!
//! - `item add|rm|list`: manage the item registry (the resolver's data)
//! - `link add|rm|list|check`: mutate and query typed relationships
//! - `deps`: blockers of an item (or `--reverse`, the items it blocks)
//! - `path`: the critical path, or `--blockers` for the blocking-item set
//! - `impact`: what directly breaks if an item is not finished
//! - `view`: depth-bounded, type-filtered neighborhood of an item
//!
//! # Global Flags
//!
//! - `--json`: output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! skein item add auth-api --title "Auth service API"
//! skein link add auth-api login-ui --type blocks
//! skein path --blockers
//! skein view login-ui --depth 2 --types blocks,blocked-by
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    DepsArgs, ImpactArgs, InfoArgs, InitArgs, ItemAction, ItemArgs, LinkAction, LinkArgs,
    PathArgs, ViewArgs,
};
pub use types::RelationshipTypeArg;
pub use validators::{validate_item_id, validate_title};

/// Skein - work-item dependency graph and critical path tracking
///
/// Track typed relationships between work items, keep the blocking and
/// hierarchy graphs acyclic, and query the critical path. State lives in
/// `.skein/` as JSON Lines for easy version control integration.
#[derive(Parser, Debug)]
#[command(name = "skein")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a skein workspace
    ///
    /// Creates the `.skein/` directory with configuration and empty
    /// snapshot files. Run once in your project root.
    Init(InitArgs),

    /// Show workspace information
    ///
    /// Displays workspace path, item and edge counts, and analyzer
    /// summaries.
    Info(InfoArgs),

    /// Manage the work item registry
    ///
    /// Items must be registered before they can participate in
    /// relationships; relationships never outlive their items.
    Item(ItemArgs),

    /// Manage typed relationships between items
    ///
    /// Every link is stored together with its complementary inverse;
    /// blocking, hierarchy, and sequence links are refused when they would
    /// close a cycle.
    Link(LinkArgs),

    /// Show what blocks an item (or what it blocks)
    Deps(DepsArgs),

    /// Show the critical path through the blocking graph
    ///
    /// The longest chain of blocking dependencies, or with `--blockers`
    /// the set of items other work cannot proceed without.
    Path(PathArgs),

    /// Show the items that directly depend on an item
    Impact(ImpactArgs),

    /// Explore an item's neighborhood
    ///
    /// Breadth-first expansion up to a depth bound, filtered by
    /// relationship type. Re-run with a larger depth to expand the view;
    /// the previous result is always a subset.
    View(ViewArgs),
}

impl Cli {
    /// Parse CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing).
    ///
    /// # Errors
    ///
    /// Returns the clap error when parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error when the command fails; the binary converts it to
    /// a non-zero exit code.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::Item(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_item(&app, args, output_mode).await
            }
            Some(Commands::Link(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_link(&app, args, output_mode).await
            }
            Some(Commands::Deps(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_deps(&app, args, output_mode).await
            }
            Some(Commands::Path(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_path(&app, args, output_mode).await
            }
            Some(Commands::Impact(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_impact(&app, args, output_mode).await
            }
            Some(Commands::View(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_view(&app, args, output_mode).await
            }
            None => {
                println!("Skein dependency tracking");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
