//! # Outbound Ports (Driven Ports)
//!
//! Storage the post authority owns, plus the collaborators it calls:
//! the block guard (answered by the social graph), the bus and a clock.

use crate::domain::{Post, User};
use shared_types::{PostId, UserId};
use thiserror::Error;

pub use shared_bus::EventPublisher;
pub use shared_types::{BlockGuard, TimeSource};

/// Document store for posts.
pub trait PostStore: Send + Sync {
    /// Insert a new post. Ids are unique; inserting an existing id is an error.
    fn insert(&self, post: Post) -> Result<(), StoreError>;

    fn get(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Remove and return the post, if present.
    fn remove(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Posts by one author, oldest first.
    fn by_author(&self, author: UserId) -> Result<Vec<Post>, StoreError>;

    /// Posts replying to `id`, oldest first.
    fn replies_to(&self, id: PostId) -> Result<Vec<Post>, StoreError>;

    /// Posts reposting `id`, oldest first.
    fn reposts_of(&self, id: PostId) -> Result<Vec<Post>, StoreError>;

    /// Every live post, oldest first.
    fn all(&self) -> Result<Vec<Post>, StoreError>;
}

/// Directory of users known to the post authority.
pub trait UserStore: Send + Sync {
    fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Insert the user unless one with the same id exists. Returns the stored entry.
    fn insert_if_absent(&self, user: User) -> Result<User, StoreError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
