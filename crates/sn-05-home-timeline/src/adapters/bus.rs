//! Bus adapter: feeds `queue-follow-events` into the home-timeline service.

use crate::ports::HomeTimelineApi;
use async_trait::async_trait;
use shared_bus::{DomainEvent, EventFilter, EventHandler, EventTopic, HandlerError};
use std::sync::Arc;

pub struct HomeTimelineEventHandler {
    service: Arc<dyn HomeTimelineApi>,
}

impl HomeTimelineEventHandler {
    pub fn new(service: Arc<dyn HomeTimelineApi>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for HomeTimelineEventHandler {
    fn name(&self) -> &'static str {
        "home-timeline-projector"
    }

    fn filter(&self) -> EventFilter {
        EventFilter::topics(vec![EventTopic::FollowEvents])
    }

    async fn handle(&self, event: DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::Follow(follow) => self
                .service
                .apply_follow(&follow)
                .await
                .map_err(|e| HandlerError::Apply(e.to_string())),
            other => Err(HandlerError::Unexpected {
                channel: other.topic().label(),
            }),
        }
    }
}
