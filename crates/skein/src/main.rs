//! Skein CLI binary.

use anyhow::Result;
use skein::cli::Cli;
use skein::output::color;
use tracing_subscriber::EnvFilter;

/// Main entry point for the skein CLI.
///
/// Uses tokio's current_thread runtime for simplicity and lower overhead.
/// This is appropriate for CLI applications with sequential I/O-bound
/// operations.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=skein=debug,skein_jsonl=trace skein path
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skein=info,skein_jsonl=info")),
        )
        .with_target(false)
        .init();

    color::init_from_env();

    tracing::debug!("Starting skein CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Skein CLI completed successfully");
    Ok(())
}
