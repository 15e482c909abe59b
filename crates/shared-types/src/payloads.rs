//! # Event Payloads
//!
//! The wire contract between services. Every payload serializes to JSON with
//! a fixed field order, camelCase field names and SCREAMING_CASE type tags,
//! so two services built from different revisions still agree byte-for-byte.
//!
//! | Payload | Producer | Consumers |
//! |---------|----------|-----------|
//! | [`PostEvent`] | sn-01 (posts) | sn-03 (search), sn-04 (user timeline) |
//! | [`FollowEvent`] | sn-02 (social graph) | sn-05 (home timeline) |
//! | [`LikeEvent`] | sn-02 (social graph) | sn-04 (user timeline) |

use crate::entities::{PostId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Kind of post mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostEventType {
    Creation,
    Deletion,
}

/// Emitted by the post authority once per successful create or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEvent {
    #[serde(rename = "type")]
    pub event_type: PostEventType,
    pub post_id: PostId,
    /// Author of the post.
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub event_time: Timestamp,
}

impl PostEvent {
    pub fn creation(
        post_id: PostId,
        user_id: UserId,
        text: Option<String>,
        event_time: Timestamp,
    ) -> Self {
        Self {
            event_type: PostEventType::Creation,
            post_id,
            user_id,
            text,
            event_time,
        }
    }

    pub fn deletion(
        post_id: PostId,
        user_id: UserId,
        text: Option<String>,
        event_time: Timestamp,
    ) -> Self {
        Self {
            event_type: PostEventType::Deletion,
            post_id,
            user_id,
            text,
            event_time,
        }
    }
}

/// Kind of follow-edge mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowEventType {
    Follow,
    Unfollow,
}

/// Emitted by the social graph for every follow edge that actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEvent {
    /// The follower.
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub event_type: FollowEventType,
    pub followee_id: UserId,
}

impl FollowEvent {
    pub fn follow(user_id: UserId, followee_id: UserId) -> Self {
        Self {
            user_id,
            event_type: FollowEventType::Follow,
            followee_id,
        }
    }

    pub fn unfollow(user_id: UserId, followee_id: UserId) -> Self {
        Self {
            user_id,
            event_type: FollowEventType::Unfollow,
            followee_id,
        }
    }
}

/// Kind of like-edge mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeEventType {
    Like,
    Unlike,
}

/// Emitted by the social graph for every like edge that actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEvent {
    /// The liker.
    pub user_id: UserId,
    pub post_id: PostId,
    #[serde(rename = "type")]
    pub event_type: LikeEventType,
    pub creation_date: Timestamp,
}

impl LikeEvent {
    pub fn like(user_id: UserId, post_id: PostId, creation_date: Timestamp) -> Self {
        Self {
            user_id,
            post_id,
            event_type: LikeEventType::Like,
            creation_date,
        }
    }

    pub fn unlike(user_id: UserId, post_id: PostId, creation_date: Timestamp) -> Self {
        Self {
            user_id,
            post_id,
            event_type: LikeEventType::Unlike,
            creation_date,
        }
    }
}
