//! # Inbound Ports (Driving Ports)
//!
//! Public API of the post authority.

use crate::domain::{Post, PostDraft, User};
use crate::error::PostError;
use async_trait::async_trait;
use shared_types::{PostId, UserId};

#[async_trait]
pub trait PostApi: Send + Sync {
    /// Validate and store a new post, then publish its CREATION event.
    ///
    /// ## Errors
    ///
    /// - `InvalidRequest`: content rules violated (checked first)
    /// - `NotFound`: reply or repost target does not exist
    /// - `Forbidden`: the author and a referenced post's author block each other
    /// - `UpstreamUnavailable`: the block check could not be performed
    async fn create_post(&self, draft: PostDraft) -> Result<PostId, PostError>;

    /// Delete a post owned by `requester`, then publish its DELETION event.
    async fn delete_post(&self, requester: UserId, post_id: PostId) -> Result<(), PostError>;

    async fn get_post(&self, post_id: PostId) -> Result<Post, PostError>;

    /// All posts of a known author, oldest first.
    async fn posts_by_author(&self, author: UserId) -> Result<Vec<Post>, PostError>;

    async fn replies_of(&self, post_id: PostId) -> Result<Vec<Post>, PostError>;

    async fn reposts_of(&self, post_id: PostId) -> Result<Vec<Post>, PostError>;

    async fn get_user(&self, user_id: UserId) -> Result<User, PostError>;

    /// Register a user ahead of their first post. Existing entries are kept.
    async fn register_user(&self, user_id: UserId, name: String) -> Result<User, PostError>;

    /// Every live post, for projection resync.
    async fn snapshot(&self) -> Result<Vec<Post>, PostError>;
}
