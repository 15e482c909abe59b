//! # Inbound Ports (Driving Ports)
//!
//! Public API of the social graph authority.

use crate::domain::{FollowEdge, LikeEdge};
use crate::error::GraphError;
use async_trait::async_trait;
use shared_types::{BlockStatus, PostId, UserId};

#[async_trait]
pub trait SocialGraphApi: Send + Sync {
    /// `follower` starts following `followee`. Publishes FOLLOW unless the
    /// edge already existed.
    ///
    /// ## Errors
    ///
    /// - `Forbidden`: self-follow, or a block exists in either direction
    /// - `NotFound`: either user is unknown here and to the post authority
    /// - `UpstreamUnavailable`: the post authority could not be asked
    async fn follow(&self, follower: UserId, followee: UserId) -> Result<(), GraphError>;

    /// Remove a follow edge and publish UNFOLLOW. The edge must exist.
    async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), GraphError>;

    /// Create a block edge, first removing follows in both directions and
    /// publishing UNFOLLOW for each removed edge.
    async fn block(&self, blocker: UserId, blocked: UserId) -> Result<(), GraphError>;

    /// Remove a block edge. The edge must exist.
    async fn unblock(&self, blocker: UserId, blocked: UserId) -> Result<(), GraphError>;

    /// Like a post. Publishes LIKE unless already liked.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: user or post unknown
    /// - `Forbidden`: the user and the post's author block each other
    async fn like(&self, user: UserId, post: PostId) -> Result<(), GraphError>;

    /// Remove a like and publish UNLIKE. The like must exist.
    async fn unlike(&self, user: UserId, post: PostId) -> Result<(), GraphError>;

    async fn followers(&self, user: UserId) -> Result<Vec<UserId>, GraphError>;

    async fn followees(&self, user: UserId) -> Result<Vec<UserId>, GraphError>;

    /// Users `user` blocks.
    async fn blocked_by(&self, user: UserId) -> Result<Vec<UserId>, GraphError>;

    /// Users who block `user`.
    async fn blockers_of(&self, user: UserId) -> Result<Vec<UserId>, GraphError>;

    async fn liked_posts(&self, user: UserId) -> Result<Vec<PostId>, GraphError>;

    async fn likers(&self, post: PostId) -> Result<Vec<UserId>, GraphError>;

    /// Block lookup between two users, answered from local edges only.
    async fn block_status(&self, acting: UserId, target: UserId) -> Result<BlockStatus, GraphError>;

    /// Every follow edge, for projection resync.
    async fn follow_snapshot(&self) -> Result<Vec<FollowEdge>, GraphError>;

    /// Every like edge, for projection resync.
    async fn like_snapshot(&self) -> Result<Vec<LikeEdge>, GraphError>;
}
