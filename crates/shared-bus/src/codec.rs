//! # Wire Codec
//!
//! Encodes events into the JSON body carried on their channel and decodes
//! bodies received on a named channel. The channel decides the payload type;
//! the body itself carries no envelope.

use crate::events::{DomainEvent, EventTopic};
use shared_types::{FollowEvent, LikeEvent, PostEvent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("malformed {channel} payload: {source}")]
    Malformed {
        channel: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Encode the event's payload as its channel body.
pub fn encode(event: &DomainEvent) -> Result<String, CodecError> {
    let channel = event.topic().label();
    let body = match event {
        DomainEvent::Post(e) => serde_json::to_string(e),
        DomainEvent::Follow(e) => serde_json::to_string(e),
        DomainEvent::Like(e) => serde_json::to_string(e),
    };
    body.map_err(|source| CodecError::Malformed { channel, source })
}

/// Decode a body received on `topic`.
pub fn decode(topic: EventTopic, body: &str) -> Result<DomainEvent, CodecError> {
    let channel = topic.label();
    let malformed = |source| CodecError::Malformed { channel, source };
    match topic {
        EventTopic::PostEvents => serde_json::from_str::<PostEvent>(body)
            .map(DomainEvent::Post)
            .map_err(malformed),
        EventTopic::FollowEvents => serde_json::from_str::<FollowEvent>(body)
            .map(DomainEvent::Follow)
            .map_err(malformed),
        EventTopic::LikeEvents => serde_json::from_str::<LikeEvent>(body)
            .map(DomainEvent::Like)
            .map_err(malformed),
        EventTopic::All => Err(CodecError::UnknownChannel(channel.to_string())),
    }
}

/// Decode a body received on a channel given by its wire name.
pub fn decode_named(channel: &str, body: &str) -> Result<DomainEvent, CodecError> {
    let topic = EventTopic::from_channel_name(channel)
        .ok_or_else(|| CodecError::UnknownChannel(channel.to_string()))?;
    decode(topic, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_types::{PostId, UserId};

    #[test]
    fn test_body_has_no_envelope() {
        let event = DomainEvent::Follow(FollowEvent::follow(UserId::new(), UserId::new()));
        let body = encode(&event).unwrap();
        assert!(body.starts_with("{\"userId\""));
        assert_eq!(decode(EventTopic::FollowEvents, &body).unwrap(), event);
    }

    #[test]
    fn test_body_on_wrong_channel_is_malformed() {
        let event = DomainEvent::Post(PostEvent::creation(
            PostId::new(),
            UserId::new(),
            None,
            Utc::now(),
        ));
        let body = encode(&event).unwrap();
        assert!(matches!(
            decode(EventTopic::LikeEvents, &body),
            Err(CodecError::Malformed { channel: "queue-likes-events", .. })
        ));
    }

    #[test]
    fn test_decode_named_rejects_unknown_channel() {
        assert!(matches!(
            decode_named("queue-unknown", "{}"),
            Err(CodecError::UnknownChannel(_))
        ));
    }
}
