//! Bus adapter: feeds `post_events` into the search service.

use crate::ports::SearchApi;
use async_trait::async_trait;
use shared_bus::{DomainEvent, EventFilter, EventHandler, EventTopic, HandlerError};
use std::sync::Arc;

pub struct SearchEventHandler {
    service: Arc<dyn SearchApi>,
}

impl SearchEventHandler {
    pub fn new(service: Arc<dyn SearchApi>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for SearchEventHandler {
    fn name(&self) -> &'static str {
        "search-projector"
    }

    fn filter(&self) -> EventFilter {
        EventFilter::topics(vec![EventTopic::PostEvents])
    }

    async fn handle(&self, event: DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::Post(post) => self
                .service
                .apply(&post)
                .await
                .map_err(|e| HandlerError::Apply(e.to_string())),
            other => Err(HandlerError::Unexpected {
                channel: other.topic().label(),
            }),
        }
    }
}
