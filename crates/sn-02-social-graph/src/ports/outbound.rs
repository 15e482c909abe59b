//! # Outbound Ports (Driven Ports)
//!
//! The graph store this service owns, and the remote directory it checks
//! unknown ids against before creating a node.

use crate::domain::{FollowEdge, LikeEdge, PostNode, UserRelation};
use async_trait::async_trait;
use shared_types::{PostId, RemoteError, UserId};
use thiserror::Error;

pub use shared_bus::EventPublisher;
pub use shared_types::{BlockGuard, TimeSource};

/// Graph storage.
///
/// Node creation reports whether a node was actually added so that
/// concurrent materializations of the same id create it once.
pub trait GraphStore: Send + Sync {
    fn has_user(&self, id: UserId) -> Result<bool, StoreError>;

    /// Add a user node. Returns `false` if it already existed.
    fn add_user(&self, id: UserId) -> Result<bool, StoreError>;

    fn post(&self, id: PostId) -> Result<Option<PostNode>, StoreError>;

    /// Add a post node. Returns `false` if it already existed.
    fn add_post(&self, node: PostNode) -> Result<bool, StoreError>;

    fn has_edge(&self, relation: UserRelation, from: UserId, to: UserId) -> Result<bool, StoreError>;

    /// Returns `false` if the edge already existed.
    fn add_edge(&self, relation: UserRelation, from: UserId, to: UserId) -> Result<bool, StoreError>;

    /// Returns `false` if there was no such edge.
    fn remove_edge(&self, relation: UserRelation, from: UserId, to: UserId) -> Result<bool, StoreError>;

    /// Targets of `from`'s outgoing edges.
    fn outgoing(&self, relation: UserRelation, from: UserId) -> Result<Vec<UserId>, StoreError>;

    /// Sources of edges pointing at `to`.
    fn incoming(&self, relation: UserRelation, to: UserId) -> Result<Vec<UserId>, StoreError>;

    fn has_like(&self, user: UserId, post: PostId) -> Result<bool, StoreError>;

    fn add_like(&self, user: UserId, post: PostId) -> Result<bool, StoreError>;

    fn remove_like(&self, user: UserId, post: PostId) -> Result<bool, StoreError>;

    fn liked_posts(&self, user: UserId) -> Result<Vec<PostId>, StoreError>;

    fn likers(&self, post: PostId) -> Result<Vec<UserId>, StoreError>;

    fn all_follows(&self) -> Result<Vec<FollowEdge>, StoreError>;

    fn all_likes(&self) -> Result<Vec<LikeEdge>, StoreError>;
}

/// The remote authority for users and posts.
///
/// `Ok(None)` / `Ok(false)` means the authority answered and does not know
/// the id. `Err` means it could not answer.
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    async fn user_exists(&self, id: UserId) -> Result<bool, RemoteError>;

    /// The author of a live post.
    async fn post_author(&self, id: PostId) -> Result<Option<UserId>, RemoteError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("graph store unavailable: {0}")]
    Unavailable(String),
}
