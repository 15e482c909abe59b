//! Graph Service
//!
//! Edge writes follow one shape: reject self-relations, materialize the
//! endpoints, run the block check where one applies, mutate the store, then
//! publish. A write that changes nothing publishes nothing.

use async_trait::async_trait;
use shared_bus::DomainEvent;
use shared_types::{BlockStatus, FollowEvent, LikeEvent, PostId, ServiceId, UserId};
use sn_telemetry::{GUARD_REJECTIONS, REQUESTS_REJECTED};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{FollowEdge, LikeEdge, UserRelation};
use crate::error::GraphError;
use crate::ports::{
    BlockGuard, EntityDirectory, EventPublisher, GraphStore, SocialGraphApi, TimeSource,
};
use crate::service::Materializer;

pub struct GraphService {
    store: Arc<dyn GraphStore>,
    materializer: Materializer,
    guard: Arc<dyn BlockGuard>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn TimeSource>,
}

impl GraphService {
    pub fn new(
        store: Arc<dyn GraphStore>,
        directory: Arc<dyn EntityDirectory>,
        guard: Arc<dyn BlockGuard>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            materializer: Materializer::new(store.clone(), directory),
            store,
            guard,
            publisher,
            clock,
        }
    }

    fn rejected(&self, operation: &'static str, err: GraphError) -> GraphError {
        let kind = err.kind();
        REQUESTS_REJECTED
            .with_label_values(&[ServiceId::SocialGraph.name(), kind.as_str()])
            .inc();
        warn!(operation, kind = kind.as_str(), error = %err, "Request rejected");
        err
    }

    fn distinct(relation: UserRelation, from: UserId, to: UserId) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfRelation(relation));
        }
        Ok(())
    }

    async fn check_clear(&self, acting: UserId, target: UserId) -> Result<(), GraphError> {
        if let Err(e) = self.guard.ensure_clear(acting, target).await {
            GUARD_REJECTIONS.with_label_values(&["social-graph"]).inc();
            return Err(e.into());
        }
        Ok(())
    }

    async fn publish(&self, event: DomainEvent) {
        let receivers = self.publisher.publish(event).await;
        debug!(receivers, "Graph event published");
    }

    async fn do_follow(&self, follower: UserId, followee: UserId) -> Result<(), GraphError> {
        Self::distinct(UserRelation::Follow, follower, followee)?;
        self.materializer.user(follower).await?;
        self.materializer.user(followee).await?;
        self.check_clear(follower, followee).await?;

        if !self.store.add_edge(UserRelation::Follow, follower, followee)? {
            debug!(follower = %follower, followee = %followee, "Already following");
            return Ok(());
        }
        info!(follower = %follower, followee = %followee, "Follow created");
        self.publish(FollowEvent::follow(follower, followee).into()).await;
        Ok(())
    }

    async fn do_unfollow(&self, follower: UserId, followee: UserId) -> Result<(), GraphError> {
        Self::distinct(UserRelation::Follow, follower, followee)?;
        if !self.store.remove_edge(UserRelation::Follow, follower, followee)? {
            return Err(GraphError::EdgeNotFound {
                relation: UserRelation::Follow,
                from: follower,
                to: followee,
            });
        }
        info!(follower = %follower, followee = %followee, "Follow removed");
        self.publish(FollowEvent::unfollow(follower, followee).into()).await;
        Ok(())
    }

    async fn do_block(&self, blocker: UserId, blocked: UserId) -> Result<(), GraphError> {
        Self::distinct(UserRelation::Block, blocker, blocked)?;
        self.materializer.user(blocker).await?;
        self.materializer.user(blocked).await?;

        for (from, to) in [(blocker, blocked), (blocked, blocker)] {
            if self.store.remove_edge(UserRelation::Follow, from, to)? {
                info!(follower = %from, followee = %to, "Follow severed by block");
                self.publish(FollowEvent::unfollow(from, to).into()).await;
            }
        }

        if self.store.add_edge(UserRelation::Block, blocker, blocked)? {
            info!(blocker = %blocker, blocked = %blocked, "Block created");
        } else {
            debug!(blocker = %blocker, blocked = %blocked, "Already blocked");
        }
        Ok(())
    }

    async fn do_unblock(&self, blocker: UserId, blocked: UserId) -> Result<(), GraphError> {
        Self::distinct(UserRelation::Block, blocker, blocked)?;
        if !self.store.remove_edge(UserRelation::Block, blocker, blocked)? {
            return Err(GraphError::EdgeNotFound {
                relation: UserRelation::Block,
                from: blocker,
                to: blocked,
            });
        }
        info!(blocker = %blocker, blocked = %blocked, "Block removed");
        Ok(())
    }

    async fn do_like(&self, user: UserId, post: PostId) -> Result<(), GraphError> {
        let node = self.materializer.post(post).await?;
        self.materializer.user(user).await?;
        self.check_clear(user, node.author_id).await?;

        if !self.store.add_like(user, post)? {
            debug!(user_id = %user, post_id = %post, "Already liked");
            return Ok(());
        }
        info!(user_id = %user, post_id = %post, "Like created");
        self.publish(LikeEvent::like(user, post, self.clock.now()).into())
            .await;
        Ok(())
    }

    async fn do_unlike(&self, user: UserId, post: PostId) -> Result<(), GraphError> {
        if !self.store.remove_like(user, post)? {
            return Err(GraphError::LikeNotFound { user, post });
        }
        info!(user_id = %user, post_id = %post, "Like removed");
        self.publish(LikeEvent::unlike(user, post, self.clock.now()).into())
            .await;
        Ok(())
    }

    async fn edges_of(
        &self,
        user: UserId,
        relation: UserRelation,
        outgoing: bool,
    ) -> Result<Vec<UserId>, GraphError> {
        self.materializer.user(user).await?;
        let users = if outgoing {
            self.store.outgoing(relation, user)?
        } else {
            self.store.incoming(relation, user)?
        };
        Ok(users)
    }

    async fn likes_of(&self, user: UserId) -> Result<Vec<PostId>, GraphError> {
        self.materializer.user(user).await?;
        Ok(self.store.liked_posts(user)?)
    }

    async fn likers_of(&self, post: PostId) -> Result<Vec<UserId>, GraphError> {
        self.materializer.post(post).await?;
        Ok(self.store.likers(post)?)
    }
}

#[async_trait]
impl SocialGraphApi for GraphService {
    async fn follow(&self, follower: UserId, followee: UserId) -> Result<(), GraphError> {
        self.do_follow(follower, followee)
            .await
            .map_err(|e| self.rejected("follow", e))
    }

    async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), GraphError> {
        self.do_unfollow(follower, followee)
            .await
            .map_err(|e| self.rejected("unfollow", e))
    }

    async fn block(&self, blocker: UserId, blocked: UserId) -> Result<(), GraphError> {
        self.do_block(blocker, blocked)
            .await
            .map_err(|e| self.rejected("block", e))
    }

    async fn unblock(&self, blocker: UserId, blocked: UserId) -> Result<(), GraphError> {
        self.do_unblock(blocker, blocked)
            .await
            .map_err(|e| self.rejected("unblock", e))
    }

    async fn like(&self, user: UserId, post: PostId) -> Result<(), GraphError> {
        self.do_like(user, post)
            .await
            .map_err(|e| self.rejected("like", e))
    }

    async fn unlike(&self, user: UserId, post: PostId) -> Result<(), GraphError> {
        self.do_unlike(user, post)
            .await
            .map_err(|e| self.rejected("unlike", e))
    }

    async fn followers(&self, user: UserId) -> Result<Vec<UserId>, GraphError> {
        self.edges_of(user, UserRelation::Follow, false)
            .await
            .map_err(|e| self.rejected("followers", e))
    }

    async fn followees(&self, user: UserId) -> Result<Vec<UserId>, GraphError> {
        self.edges_of(user, UserRelation::Follow, true)
            .await
            .map_err(|e| self.rejected("followees", e))
    }

    async fn blocked_by(&self, user: UserId) -> Result<Vec<UserId>, GraphError> {
        self.edges_of(user, UserRelation::Block, true)
            .await
            .map_err(|e| self.rejected("blocked_by", e))
    }

    async fn blockers_of(&self, user: UserId) -> Result<Vec<UserId>, GraphError> {
        self.edges_of(user, UserRelation::Block, false)
            .await
            .map_err(|e| self.rejected("blockers_of", e))
    }

    async fn liked_posts(&self, user: UserId) -> Result<Vec<PostId>, GraphError> {
        self.likes_of(user)
            .await
            .map_err(|e| self.rejected("liked_posts", e))
    }

    async fn likers(&self, post: PostId) -> Result<Vec<UserId>, GraphError> {
        self.likers_of(post)
            .await
            .map_err(|e| self.rejected("likers", e))
    }

    async fn block_status(&self, acting: UserId, target: UserId) -> Result<BlockStatus, GraphError> {
        Ok(self.guard.block_status(acting, target).await?)
    }

    async fn follow_snapshot(&self) -> Result<Vec<FollowEdge>, GraphError> {
        Ok(self.store.all_follows()?)
    }

    async fn like_snapshot(&self) -> Result<Vec<LikeEdge>, GraphError> {
        Ok(self.store.all_likes()?)
    }
}
