//! A started runtime with a clock the test controls.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use service_runtime::container::{RuntimeConfig, ServiceContainer};
use service_runtime::ServiceRuntime;
use shared_bus::DispatchMode;
use shared_types::{ManualTimeSource, UserId};
use sn_01_posts::PostApi;

/// How long [`eventually`] waits before giving up.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct Harness {
    pub runtime: ServiceRuntime,
    pub services: Arc<ServiceContainer>,
    pub clock: Arc<ManualTimeSource>,
}

impl Harness {
    /// Reliable bus, sequential dispatch, no reconciliation.
    pub async fn start() -> Self {
        let mut config = RuntimeConfig::default();
        config.bus.dispatch = DispatchMode::Sequential;
        Self::with_config(config).await
    }

    pub async fn with_config(config: RuntimeConfig) -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let clock = Arc::new(ManualTimeSource::new(start));
        let container = ServiceContainer::with_clock(config, clock.clone());
        let runtime = ServiceRuntime::with_container(container);
        runtime.start().await;

        Self {
            services: runtime.container(),
            runtime,
            clock,
        }
    }

    /// Move the clock forward by one second.
    pub fn tick(&self) {
        self.clock.advance(chrono::Duration::seconds(1));
    }

    /// A user known to the post authority's directory.
    pub async fn user(&self, name: &str) -> UserId {
        let id = UserId::new();
        let _ = self.services.posts.register_user(id, name.to_string()).await;
        id
    }

    pub async fn stop(self) {
        self.runtime.shutdown().await;
    }
}

/// Poll `check` until it returns `true` or [`SETTLE_TIMEOUT`] elapses.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    tokio::time::timeout(SETTLE_TIMEOUT, async {
        while !check().await {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .is_ok()
}
