//! # Inbound Ports (Driving Ports)

use crate::error::HomeTimelineError;
use async_trait::async_trait;
use shared_types::{FollowEvent, PostId, ResyncReport, UserId};

#[async_trait]
pub trait HomeTimelineApi: Send + Sync {
    /// Posts of everyone `user` follows, oldest first.
    ///
    /// ## Errors
    ///
    /// - `UpstreamUnavailable`: the user-timeline projector could not be queried
    async fn home_timeline(&self, user: UserId) -> Result<Vec<PostId>, HomeTimelineError>;

    async fn followees(&self, user: UserId) -> Result<Vec<UserId>, HomeTimelineError>;

    /// Apply one follow event. Idempotent.
    async fn apply_follow(&self, event: &FollowEvent) -> Result<(), HomeTimelineError>;

    /// Reconcile against a FOLLOW event for every follow edge.
    async fn resync(&self, follows: &[FollowEvent]) -> Result<ResyncReport, HomeTimelineError>;
}
