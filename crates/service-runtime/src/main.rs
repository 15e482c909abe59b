//! # Murmur
//!
//! Runs every Murmur service in one process until interrupted.

use anyhow::{Context, Result};
use service_runtime::container::RuntimeConfig;
use service_runtime::ServiceRuntime;
use sn_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .await
        .context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;

    let runtime = ServiceRuntime::new(config);
    runtime.start().await;

    info!("Murmur is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    runtime.shutdown().await;

    Ok(())
}
