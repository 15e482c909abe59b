//! # Murmur Telemetry
//!
//! Logging, tracing and metrics for every Murmur service.
//!
//! ## Components
//!
//! - **Logs**: `tracing` + `tracing-subscriber` (pretty or JSON)
//! - **Traces**: optional OpenTelemetry OTLP export
//! - **Metrics**: Prometheus counters in a process-wide registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sn_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).await.expect("telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset (no export) | OTLP collector endpoint |
//! | `OTEL_SERVICE_NAME` | `murmur` | Service name in traces |
//! | `SN_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SN_JSON_LOGS` | `false` | Emit JSON log lines |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, register_metrics, EVENTS_DROPPED, EVENTS_HANDLED, EVENTS_PUBLISHED,
    GUARD_REJECTIONS, NODES_MATERIALIZED, RECONCILIATION_RUNS, REGISTRY, REQUESTS_REJECTED,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize metrics, logging and (when configured) trace export.
///
/// Returns a guard that must be held for the lifetime of the process. Dropping
/// it flushes pending spans.
pub async fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    let tracing = tracing_setup::init_tracing(&config).await?;
    Ok(TelemetryGuard { _tracing: tracing })
}

pub struct TelemetryGuard {
    _tracing: TracingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry");
    }
}

/// Increment a counter, optionally by label values.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
