//! Main entry point for the zipsweep CLI application.
//!
//! Parses command-line arguments, installs the tracing subscriber, then
//! scans the data directory and expands every discovered archive.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zipsweep::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(data_dir = %cli.data_dir.display(), jobs = cli.jobs, "starting");

    let summary = zipsweep::expand::run(&cli).await.context("run failed")?;

    // Per-archive failures are reported here but do not affect the exit
    // status; only a failed scan does.
    info!(
        found = summary.found,
        extracted = summary.extracted,
        skipped = summary.skipped,
        failed = summary.failed,
        "done"
    );

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `-v` occurrences select the default level; `RUST_LOG` overrides it.
/// `--log-format json` switches to line-delimited JSON records.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    let result = if cli.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|err| anyhow::anyhow!("error setting up logger: {err}"))
}
