//! Taskdeck CLI binary.

use anyhow::Result;
use taskdeck::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the taskdeck CLI.
///
/// Uses tokio's current_thread runtime; every command is a short sequence
/// of awaited file operations.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=taskdeck=debug,taskdeck_kv=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskdeck=info,taskdeck_kv=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting taskdeck CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Taskdeck CLI completed successfully");
    Ok(())
}
