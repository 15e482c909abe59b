//! # Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{PostId, RemoteError, UserId};
use thiserror::Error;

/// Followee sets, one per user.
pub trait FolloweeStore: Send + Sync {
    /// Returns `false` if `followee` was already in the set.
    fn add(&self, user: UserId, followee: UserId) -> Result<bool, StoreError>;

    /// Returns `false` if `followee` was not in the set.
    fn remove(&self, user: UserId, followee: UserId) -> Result<bool, StoreError>;

    fn followees(&self, user: UserId) -> Result<Vec<UserId>, StoreError>;

    /// Every `(user, followee)` pair.
    fn all(&self) -> Result<Vec<(UserId, UserId)>, StoreError>;
}

/// The user-timeline projector's merge query.
#[async_trait]
pub trait UserTimelineQuery: Send + Sync {
    async fn merged_timeline(&self, users: &[UserId]) -> Result<Vec<PostId>, RemoteError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("followee store unavailable: {0}")]
    Unavailable(String),
}
