//! Bus adapter: feeds `post_events` and `queue-likes-events` into the
//! timeline service.

use crate::ports::UserTimelineApi;
use async_trait::async_trait;
use shared_bus::{DomainEvent, EventFilter, EventHandler, EventTopic, HandlerError};
use std::sync::Arc;

pub struct UserTimelineEventHandler {
    service: Arc<dyn UserTimelineApi>,
}

impl UserTimelineEventHandler {
    pub fn new(service: Arc<dyn UserTimelineApi>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for UserTimelineEventHandler {
    fn name(&self) -> &'static str {
        "user-timeline-projector"
    }

    fn filter(&self) -> EventFilter {
        EventFilter::topics(vec![EventTopic::PostEvents, EventTopic::LikeEvents])
    }

    async fn handle(&self, event: DomainEvent) -> Result<(), HandlerError> {
        let result = match &event {
            DomainEvent::Post(post) => self.service.apply_post(post).await,
            DomainEvent::Like(like) => self.service.apply_like(like).await,
            DomainEvent::Follow(_) => {
                return Err(HandlerError::Unexpected {
                    channel: event.topic().label(),
                })
            }
        };
        result.map_err(|e| HandlerError::Apply(e.to_string()))
    }
}
