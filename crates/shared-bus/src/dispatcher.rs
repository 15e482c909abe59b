//! # Handler Dispatch
//!
//! Binds an [`EventHandler`] to a bus subscription and runs it off the
//! publisher's task. Handler failures are logged and counted; they never
//! propagate back to the publisher and are never retried.

use crate::events::{DomainEvent, EventFilter};
use crate::subscriber::{EventSubscriber, Subscription};
use async_trait::async_trait;
use sn_telemetry::EVENTS_HANDLED;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Why a handler could not apply an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The event was received on a channel this handler does not understand.
    #[error("unexpected event on {channel}")]
    Unexpected { channel: &'static str },

    /// The handler's store rejected the update.
    #[error("failed to apply event: {0}")]
    Apply(String),
}

/// A consumer of bus events, e.g. a projector.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Stable name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Channels this handler listens on.
    fn filter(&self) -> EventFilter;

    async fn handle(&self, event: DomainEvent) -> Result<(), HandlerError>;
}

/// How received messages are scheduled onto the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Every message gets its own task; messages may be applied out of order.
    #[default]
    Concurrent,
    /// Messages are applied one at a time in receive order.
    Sequential,
}

/// A live handler binding. Revoke it with [`SubscriptionHandle::unsubscribe`].
pub struct SubscriptionHandle {
    name: &'static str,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop receiving. Messages already handed to a per-message task finish
    /// on their own.
    pub async fn unsubscribe(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            error!(handler = self.name, error = %e, "Subscription task ended abnormally");
        }
        info!(handler = self.name, "Unsubscribed");
    }
}

/// Subscribe `handler` to `bus` and start delivering.
///
/// The subscription is registered before this returns, so anything
/// published afterwards reaches the handler.
pub fn spawn_handler<B>(bus: &B, handler: Arc<dyn EventHandler>, mode: DispatchMode) -> SubscriptionHandle
where
    B: EventSubscriber + ?Sized,
{
    let name = handler.name();
    let subscription = bus.subscribe(handler.filter());
    let (stop, stop_rx) = watch::channel(false);

    info!(handler = name, ?mode, "Subscribed");
    let task = tokio::spawn(run(subscription, handler, mode, stop_rx));

    SubscriptionHandle { name, stop, task }
}

async fn run(
    mut subscription: Subscription,
    handler: Arc<dyn EventHandler>,
    mode: DispatchMode,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = stop.changed() => break,
            next = subscription.recv() => {
                let Some(event) = next else {
                    debug!(handler = handler.name(), "Bus closed");
                    break;
                };
                match mode {
                    DispatchMode::Concurrent => {
                        let handler = handler.clone();
                        tokio::spawn(async move { dispatch_one(handler.as_ref(), event).await });
                    }
                    DispatchMode::Sequential => dispatch_one(handler.as_ref(), event).await,
                }
            }
        }
    }
}

async fn dispatch_one(handler: &dyn EventHandler, event: DomainEvent) {
    let channel = event.topic().label();
    match handler.handle(event).await {
        Ok(()) => {
            EVENTS_HANDLED.with_label_values(&[handler.name(), "ok"]).inc();
        }
        Err(e) => {
            EVENTS_HANDLED.with_label_values(&[handler.name(), "failed"]).inc();
            error!(handler = handler.name(), channel, error = %e, "Event handler failed");
        }
    }
}
