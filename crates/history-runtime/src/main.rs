//! # history-node
//!
//! Serves the history API until Ctrl+C.

use anyhow::{Context, Result};
use history_runtime::{HistoryNode, RuntimeConfig, VERSION};
use history_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .await
        .context("failed to initialize telemetry")?;

    let config = RuntimeConfig::load().context("failed to load configuration")?;
    info!(version = VERSION, port = config.port, "Starting history node");

    let node = HistoryNode::new(config).context("failed to assemble history node")?;
    node.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
        info!("Shutdown signal received");
    })
    .await
    .context("history node stopped with an error")?;

    Ok(())
}
