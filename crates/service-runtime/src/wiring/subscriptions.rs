//! Projector subscriptions.

use std::sync::Arc;

use shared_bus::{spawn_handler, DispatchMode, EventHandler, InMemoryEventBus, SubscriptionHandle};
use sn_03_search::SearchEventHandler;
use sn_04_user_timeline::UserTimelineEventHandler;
use sn_05_home_timeline::HomeTimelineEventHandler;
use tracing::info;

use crate::container::ServiceContainer;

/// The live bus bindings of every projector.
pub struct Subscriptions {
    handles: Vec<SubscriptionHandle>,
}

impl Subscriptions {
    /// Subscribe the search, user-timeline and home-timeline projectors.
    ///
    /// Must be called from within a Tokio runtime. Events published before
    /// this returns are not seen by the projectors.
    pub fn start(container: &ServiceContainer) -> Self {
        let handlers: Vec<Arc<dyn EventHandler>> = vec![
            Arc::new(SearchEventHandler::new(container.search.clone())),
            Arc::new(UserTimelineEventHandler::new(container.user_timeline.clone())),
            Arc::new(HomeTimelineEventHandler::new(container.home_timeline.clone())),
        ];

        Self::with_handlers(&container.bus, handlers, container.config.bus.dispatch)
    }

    pub fn with_handlers(
        bus: &InMemoryEventBus,
        handlers: Vec<Arc<dyn EventHandler>>,
        mode: DispatchMode,
    ) -> Self {
        let handles: Vec<_> = handlers
            .into_iter()
            .map(|handler| spawn_handler(bus, handler, mode))
            .collect();
        info!(count = handles.len(), "Projectors subscribed");
        Self { handles }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(SubscriptionHandle::name).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Revoke every subscription.
    pub async fn stop(self) {
        for handle in self.handles {
            handle.unsubscribe().await;
        }
    }
}
