//! Clients for the synchronous cross-service queries:
//!
//! - social graph -> post authority: does this user / post exist?
//! - post authority -> social graph: block check
//! - home timeline -> user timeline: merged timeline

use async_trait::async_trait;
use shared_types::{BlockGuard, BlockStatus, ErrorKind, PostId, RemoteError, ServiceId, UserId};
use sn_01_posts::{PostApi, PostError};
use sn_02_social_graph::{EntityDirectory, SocialGraphApi};
use sn_04_user_timeline::UserTimelineApi;
use sn_05_home_timeline::UserTimelineQuery;

use super::Endpoint;

/// Maps a remote failure to `RemoteError`, keeping "not found" as a value.
fn lookup<T>(service: ServiceId, result: Result<T, PostError>) -> Result<Option<T>, RemoteError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RemoteError::unavailable(service, e.to_string())),
    }
}

/// Entity directory backed by the post authority.
pub struct PostDirectoryClient {
    posts: Endpoint<dyn PostApi>,
}

impl PostDirectoryClient {
    pub fn new(posts: Endpoint<dyn PostApi>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl EntityDirectory for PostDirectoryClient {
    async fn user_exists(&self, id: UserId) -> Result<bool, RemoteError> {
        let posts = self.posts.get()?;
        Ok(lookup(self.posts.service(), posts.get_user(id).await)?.is_some())
    }

    async fn post_author(&self, id: PostId) -> Result<Option<UserId>, RemoteError> {
        let posts = self.posts.get()?;
        Ok(lookup(self.posts.service(), posts.get_post(id).await)?.map(|p| p.author_id))
    }
}

/// Block guard backed by the social graph's block-check query.
pub struct SocialGraphGuardClient {
    graph: Endpoint<dyn SocialGraphApi>,
}

impl SocialGraphGuardClient {
    pub fn new(graph: Endpoint<dyn SocialGraphApi>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl BlockGuard for SocialGraphGuardClient {
    async fn block_status(&self, acting: UserId, target: UserId) -> Result<BlockStatus, RemoteError> {
        let graph = self.graph.get()?;
        graph
            .block_status(acting, target)
            .await
            .map_err(|e| RemoteError::unavailable(self.graph.service(), e.to_string()))
    }
}

/// Merge query against the user-timeline projector.
pub struct UserTimelineClient {
    timelines: Endpoint<dyn UserTimelineApi>,
}

impl UserTimelineClient {
    pub fn new(timelines: Endpoint<dyn UserTimelineApi>) -> Self {
        Self { timelines }
    }
}

#[async_trait]
impl UserTimelineQuery for UserTimelineClient {
    async fn merged_timeline(&self, users: &[UserId]) -> Result<Vec<PostId>, RemoteError> {
        let timelines = self.timelines.get()?;
        timelines
            .merged_timeline(users)
            .await
            .map_err(|e| RemoteError::unavailable(self.timelines.service(), e.to_string()))
    }
}
