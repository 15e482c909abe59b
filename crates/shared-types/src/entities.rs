//! # Core Domain Identifiers
//!
//! Strongly-typed ids for the two entity kinds every service talks about:
//! users and posts. Both wrap a UUID and serialize transparently so the wire
//! format stays a bare UUID string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wall-clock instant used for event times and timeline ordering.
pub type Timestamp = DateTime<Utc>;

/// Identifier of a user, owned by the user directory of the post authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a post, owned by the post authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque reference to a binary object held by the media store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub String);

impl MediaRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The services of the system, used for log context and error attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceId {
    /// sn-01: owns posts and the user directory.
    PostAuthority,
    /// sn-02: owns follow/block/like edges.
    SocialGraph,
    /// sn-03: full-text index over post text.
    Search,
    /// sn-04: per-user ordered post lists.
    UserTimeline,
    /// sn-05: followee sets and the home timeline reader.
    HomeTimeline,
}

impl ServiceId {
    /// Short, stable name used in logs and metric labels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PostAuthority => "sn-01-posts",
            Self::SocialGraph => "sn-02-social-graph",
            Self::Search => "sn-03-search",
            Self::UserTimeline => "sn-04-user-timeline",
            Self::HomeTimeline => "sn-05-home-timeline",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_bare_uuid() {
        let raw = Uuid::new_v4();
        let json = serde_json::to_string(&UserId(raw)).unwrap();
        assert_eq!(json, format!("\"{}\"", raw));

        let back: PostId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, raw);
    }

    #[test]
    fn test_fresh_ids_are_distinct() {
        assert_ne!(PostId::new(), PostId::new());
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn test_service_names() {
        assert_eq!(ServiceId::Search.name(), "sn-03-search");
        assert_eq!(ServiceId::SocialGraph.to_string(), "sn-02-social-graph");
    }
}
