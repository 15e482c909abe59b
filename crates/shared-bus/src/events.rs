//! # Domain Events
//!
//! Every message that flows through the shared bus, and the fixed channel each
//! one travels on.

use serde::{Deserialize, Serialize};
use shared_types::{FollowEvent, LikeEvent, PostEvent, ServiceId};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A post was created or deleted.
    /// Source: sn-01 | Targets: sn-03, sn-04
    Post(PostEvent),

    /// A follow edge changed.
    /// Source: sn-02 | Target: sn-05
    Follow(FollowEvent),

    /// A like edge changed.
    /// Source: sn-02 | Target: sn-04
    Like(LikeEvent),
}

impl DomainEvent {
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Post(_) => EventTopic::PostEvents,
            Self::Follow(_) => EventTopic::FollowEvents,
            Self::Like(_) => EventTopic::LikeEvents,
        }
    }

    /// The authority that emits this kind of event.
    #[must_use]
    pub fn source(&self) -> ServiceId {
        match self {
            Self::Post(_) => ServiceId::PostAuthority,
            Self::Follow(_) | Self::Like(_) => ServiceId::SocialGraph,
        }
    }
}

impl From<PostEvent> for DomainEvent {
    fn from(event: PostEvent) -> Self {
        Self::Post(event)
    }
}

impl From<FollowEvent> for DomainEvent {
    fn from(event: FollowEvent) -> Self {
        Self::Follow(event)
    }
}

impl From<LikeEvent> for DomainEvent {
    fn from(event: LikeEvent) -> Self {
        Self::Like(event)
    }
}

/// Bus channels. Each maps to a fixed wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// `post_events`
    PostEvents,
    /// `queue-follow-events`
    FollowEvents,
    /// `queue-likes-events`
    LikeEvents,
    /// All channels (filtering only).
    All,
}

impl EventTopic {
    /// Wire name of the channel. `All` is not a channel and has none.
    #[must_use]
    pub fn channel_name(&self) -> Option<&'static str> {
        match self {
            Self::PostEvents => Some("post_events"),
            Self::FollowEvents => Some("queue-follow-events"),
            Self::LikeEvents => Some("queue-likes-events"),
            Self::All => None,
        }
    }

    #[must_use]
    pub fn from_channel_name(name: &str) -> Option<Self> {
        match name {
            "post_events" => Some(Self::PostEvents),
            "queue-follow-events" => Some(Self::FollowEvents),
            "queue-likes-events" => Some(Self::LikeEvents),
            _ => None,
        }
    }

    /// Label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.channel_name().unwrap_or("all")
    }
}

/// Filter for subscribing to specific channels.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn matches_topic(&self, topic: EventTopic) -> bool {
        self.topics.is_empty() || self.topics.contains(&EventTopic::All) || self.topics.contains(&topic)
    }

    #[must_use]
    pub fn matches(&self, event: &DomainEvent) -> bool {
        self.matches_topic(event.topic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_types::{PostId, UserId};

    fn post_event() -> DomainEvent {
        PostEvent::creation(PostId::new(), UserId::new(), Some("hi".into()), Utc::now()).into()
    }

    #[test]
    fn test_event_topic_mapping() {
        let event = post_event();
        assert_eq!(event.topic(), EventTopic::PostEvents);
        assert_eq!(event.source(), ServiceId::PostAuthority);

        let follow: DomainEvent = FollowEvent::follow(UserId::new(), UserId::new()).into();
        assert_eq!(follow.topic(), EventTopic::FollowEvents);
        assert_eq!(follow.source(), ServiceId::SocialGraph);
    }

    #[test]
    fn test_channel_names_are_fixed() {
        assert_eq!(EventTopic::PostEvents.channel_name(), Some("post_events"));
        assert_eq!(EventTopic::FollowEvents.channel_name(), Some("queue-follow-events"));
        assert_eq!(EventTopic::LikeEvents.channel_name(), Some("queue-likes-events"));
        assert_eq!(EventTopic::All.channel_name(), None);

        for topic in [EventTopic::PostEvents, EventTopic::FollowEvents, EventTopic::LikeEvents] {
            let name = topic.channel_name().unwrap();
            assert_eq!(EventTopic::from_channel_name(name), Some(topic));
        }
        assert_eq!(EventTopic::from_channel_name("nope"), None);
    }

    #[test]
    fn test_filter_all() {
        assert!(EventFilter::all().matches(&post_event()));
        assert!(EventFilter::topics(vec![EventTopic::All]).matches(&post_event()));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::LikeEvents]);
        assert!(!filter.matches(&post_event()));

        let like: DomainEvent =
            LikeEvent::like(UserId::new(), PostId::new(), Utc::now()).into();
        assert!(filter.matches(&like));
    }
}
