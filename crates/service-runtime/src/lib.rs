//! # Murmur Service Runtime
//!
//! Hosts every Murmur service in one process.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the service container
//! - `adapters/` - cross-service clients behind late-bound endpoints
//! - `wiring/` - projector subscriptions and reconciliation
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (`SN_*` environment variables)
//! 2. Build the services and bind the cross-service endpoints
//! 3. Subscribe the projectors to the bus
//! 4. Start periodic reconciliation, if enabled
//!
//! Writes accepted before step 3 reach no projector.

pub mod adapters;
pub mod container;
pub mod wiring;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::container::{ReconciliationPolicy, RuntimeConfig, ServiceContainer};
use crate::wiring::{Reconciler, Subscriptions};

pub struct ServiceRuntime {
    container: Arc<ServiceContainer>,
    reconciler: Arc<Reconciler>,
    subscriptions: Mutex<Option<Subscriptions>>,
    jobs: Mutex<Vec<JoinHandle<()>>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ServiceRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_container(ServiceContainer::new(config))
    }

    pub fn with_container(container: ServiceContainer) -> Self {
        let reconciler = Arc::new(Reconciler::for_container(&container));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            container: Arc::new(container),
            reconciler,
            subscriptions: Mutex::new(None),
            jobs: Mutex::new(Vec::new()),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Subscribe the projectors and start background jobs. Calling it twice
    /// is a no-op.
    pub async fn start(&self) {
        let mut subscriptions = self.subscriptions.lock();
        if subscriptions.is_some() {
            warn!("Runtime already started");
            return;
        }

        info!("===========================================");
        info!("  Murmur Service Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        *subscriptions = Some(Subscriptions::start(&self.container));

        let config = &self.container.config;
        match config.reconciliation {
            ReconciliationPolicy::Disabled => info!("Reconciliation disabled"),
            ReconciliationPolicy::Periodic { interval } => {
                let job = self
                    .reconciler
                    .clone()
                    .spawn_periodic(interval, self.shutdown_rx.clone());
                self.jobs.lock().push(job);
            }
        }

        info!(
            policy = %config.bus.policy,
            dispatch = ?config.bus.dispatch,
            "All services running"
        );
    }

    /// Stop background jobs, then revoke the projector subscriptions.
    ///
    /// Jobs get `shutdown_grace` to finish their current pass.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let jobs: Vec<_> = self.jobs.lock().drain(..).collect();
        let grace = self.container.config.shutdown_grace;
        for job in jobs {
            if tokio::time::timeout(grace, job).await.is_err() {
                warn!(grace_ms = grace.as_millis() as u64, "Background job did not stop in time");
            }
        }

        let subscriptions = self.subscriptions.lock().take();
        if let Some(subscriptions) = subscriptions {
            subscriptions.stop().await;
        }

        info!("Shutdown complete");
    }

    pub fn is_running(&self) -> bool {
        self.subscriptions.lock().is_some()
    }

    pub fn container(&self) -> Arc<ServiceContainer> {
        Arc::clone(&self.container)
    }

    pub fn reconciler(&self) -> Arc<Reconciler> {
        Arc::clone(&self.reconciler)
    }
}
