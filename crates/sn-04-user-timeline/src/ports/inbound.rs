//! # Inbound Ports (Driving Ports)

use crate::domain::TimelineEntry;
use crate::error::TimelineError;
use async_trait::async_trait;
use shared_types::{LikeEvent, PostEvent, PostId, ResyncReport, UserId};

#[async_trait]
pub trait UserTimelineApi: Send + Sync {
    /// Every entry of every listed user, oldest first, as post ids.
    async fn merged_timeline(&self, users: &[UserId]) -> Result<Vec<PostId>, TimelineError>;

    /// One user's entries, oldest first.
    async fn timeline(&self, user: UserId) -> Result<Vec<TimelineEntry>, TimelineError>;

    async fn apply_post(&self, event: &PostEvent) -> Result<(), TimelineError>;

    async fn apply_like(&self, event: &LikeEvent) -> Result<(), TimelineError>;

    /// Reconcile against the CREATION events of every live post and a LIKE
    /// event for every like edge.
    async fn resync(
        &self,
        posts: &[PostEvent],
        likes: &[LikeEvent],
    ) -> Result<ResyncReport, TimelineError>;
}
