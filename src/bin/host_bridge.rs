//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! This binary reads `CommandEnvelope` messages as newline-delimited JSON
//! from stdin, runs timeline searches, and writes `ResponseEnvelope`
//! messages to stdout.
//!
//! Usage: `lineage-host [CONFIG_PATH]`. Without a path the platform config
//! directory is consulted and defaults are used if no file exists.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;

use lineage::host::router::HostRouter;
use lineage::host::stdio::run_stdio_bridge;
use lineage_search::DefaultTimelineSearch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("lineage=info,lineage_search=info")
            }),
        )
        .init();

    tracing::info!("lineage-host starting");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = lineage::config::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;
    let search = DefaultTimelineSearch::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build timeline search: {e}"))?;

    run_stdio_bridge(HostRouter::new(search))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "lineage-host exited with error");
            anyhow::anyhow!("lineage-host failed: {e}")
        })?;

    tracing::info!("lineage-host shut down cleanly");
    Ok(())
}
