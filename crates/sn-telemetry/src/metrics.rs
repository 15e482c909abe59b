//! Prometheus metrics for Murmur services.
//!
//! All metrics follow the naming convention: `sn_<area>_<metric>_total`.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // EVENT BUS
    // =========================================================================

    /// Messages handed to the bus, per channel
    pub static ref EVENTS_PUBLISHED: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_bus_events_published_total", "Events handed to the bus"),
        &["channel"]
    ).expect("metric creation failed");

    /// Messages lost before reaching a handler
    pub static ref EVENTS_DROPPED: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_bus_events_dropped_total", "Events lost in transit"),
        &["channel", "reason"]  // reason: no_subscribers/delivery_policy/lagged/malformed
    ).expect("metric creation failed");

    /// Messages processed by projector handlers
    pub static ref EVENTS_HANDLED: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_bus_events_handled_total", "Events processed by handlers"),
        &["handler", "outcome"]  // outcome: ok/failed
    ).expect("metric creation failed");

    // =========================================================================
    // AUTHORITIES
    // =========================================================================

    /// Writes refused by the block-enforcement guard
    pub static ref GUARD_REJECTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_guard_rejections_total", "Writes refused because of a block"),
        &["caller"]
    ).expect("metric creation failed");

    /// Graph nodes created by lazy materialization
    pub static ref NODES_MATERIALIZED: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_graph_nodes_materialized_total", "Graph nodes created lazily"),
        &["kind"]  // kind: user/post
    ).expect("metric creation failed");

    /// Requests rejected, by service and error kind
    pub static ref REQUESTS_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_requests_rejected_total", "Rejected requests by error kind"),
        &["service", "kind"]
    ).expect("metric creation failed");

    // =========================================================================
    // RECONCILIATION
    // =========================================================================

    /// Projection resync passes
    pub static ref RECONCILIATION_RUNS: IntCounterVec = IntCounterVec::new(
        Opts::new("sn_reconciliation_runs_total", "Projection resync passes"),
        &["outcome"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(EVENTS_PUBLISHED.clone()),
        Box::new(EVENTS_DROPPED.clone()),
        Box::new(EVENTS_HANDLED.clone()),
        Box::new(GUARD_REJECTIONS.clone()),
        Box::new(NODES_MATERIALIZED.clone()),
        Box::new(REQUESTS_REJECTED.clone()),
        Box::new(RECONCILIATION_RUNS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_is_idempotent() {
        register_metrics().unwrap();
        register_metrics().unwrap();
    }

    #[test]
    fn test_counter_increment() {
        EVENTS_PUBLISHED.with_label_values(&["post_events"]).inc();
        assert!(EVENTS_PUBLISHED.with_label_values(&["post_events"]).get() >= 1);
    }

    #[test]
    fn test_gather_contains_registered_metric() {
        register_metrics().unwrap();
        GUARD_REJECTIONS.with_label_values(&["test"]).inc();
        let text = gather_metrics().unwrap();
        assert!(text.contains("sn_guard_rejections_total"));
    }
}
