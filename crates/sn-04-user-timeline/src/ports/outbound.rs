//! # Outbound Ports (Driven Ports)

use crate::domain::TimelineEntry;
use shared_types::{PostId, UserId};
use thiserror::Error;

/// Per-user timeline storage. At most one entry per `(user, post)`.
pub trait TimelineStore: Send + Sync {
    /// Add an entry unless the user already has one for that post.
    /// Returns `false` when an entry was already present.
    fn add(&self, user: UserId, entry: TimelineEntry) -> Result<bool, StoreError>;

    /// Insert or overwrite the entry for `(user, entry.post_id)`.
    /// Returns the entry it replaced.
    fn put(&self, user: UserId, entry: TimelineEntry) -> Result<Option<TimelineEntry>, StoreError>;

    fn get(&self, user: UserId, post: PostId) -> Result<Option<TimelineEntry>, StoreError>;

    fn remove(&self, user: UserId, post: PostId) -> Result<Option<TimelineEntry>, StoreError>;

    /// Remove the post from every timeline. Returns how many entries went.
    fn purge(&self, post: PostId) -> Result<usize, StoreError>;

    /// Entries of one user, oldest first.
    fn entries(&self, user: UserId) -> Result<Vec<TimelineEntry>, StoreError>;

    fn all(&self) -> Result<Vec<(UserId, TimelineEntry)>, StoreError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("timeline store unavailable: {0}")]
    Unavailable(String),
}
