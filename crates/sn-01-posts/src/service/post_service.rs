//! Post Service
//!
//! Orchestrates validation, the block check, storage and event emission.
//! Order of a write: validate content, resolve referenced posts, ask the
//! guard, commit locally, publish. The publish is best-effort and never
//! undoes the commit.

use async_trait::async_trait;
use shared_bus::DomainEvent;
use shared_types::{PostEvent, PostId, ServiceId, UserId};
use sn_telemetry::{GUARD_REJECTIONS, REQUESTS_REJECTED};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{ContentRules, Post, PostDraft, User};
use crate::error::PostError;
use crate::ports::{BlockGuard, EventPublisher, PostApi, PostStore, TimeSource, UserStore};

pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
    guard: Arc<dyn BlockGuard>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn TimeSource>,
    rules: ContentRules,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserStore>,
        guard: Arc<dyn BlockGuard>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            posts,
            users,
            guard,
            publisher,
            clock,
            rules: ContentRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ContentRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &ContentRules {
        &self.rules
    }

    fn rejected(&self, operation: &'static str, err: PostError) -> PostError {
        let kind = err.kind();
        REQUESTS_REJECTED
            .with_label_values(&[ServiceId::PostAuthority.name(), kind.as_str()])
            .inc();
        warn!(operation, kind = kind.as_str(), error = %err, "Request rejected");
        err
    }

    fn require_post(&self, id: PostId) -> Result<Post, PostError> {
        self.posts.get(id)?.ok_or(PostError::PostNotFound(id))
    }

    /// Authors of the posts a draft replies to or reposts, deduplicated.
    fn referenced_authors(&self, draft: &PostDraft) -> Result<BTreeSet<UserId>, PostError> {
        let mut authors = BTreeSet::new();
        for id in draft.reply_to.iter().chain(draft.repost_of.iter()) {
            authors.insert(self.require_post(*id)?.author_id);
        }
        Ok(authors)
    }

    async fn create(&self, draft: PostDraft) -> Result<PostId, PostError> {
        draft.validate(&self.rules)?;

        let author = draft.author_id;
        for target in self.referenced_authors(&draft)? {
            if let Err(e) = self.guard.ensure_clear(author, target).await {
                GUARD_REJECTIONS.with_label_values(&["posts"]).inc();
                return Err(e.into());
            }
        }

        let user = self.users.insert_if_absent(User::anonymous(author))?;
        debug!(user_id = %user.id, "Author present in directory");

        let post = draft.into_post(PostId::new(), self.clock.now());
        let event = PostEvent::creation(post.id, author, post.text.clone(), post.created_at);
        let post_id = post.id;
        self.posts.insert(post)?;
        info!(post_id = %post_id, user_id = %author, "Post created");

        let receivers = self.publisher.publish(DomainEvent::Post(event)).await;
        debug!(post_id = %post_id, receivers, "Post creation event published");

        Ok(post_id)
    }

    async fn delete(&self, requester: UserId, post_id: PostId) -> Result<(), PostError> {
        let post = self.require_post(post_id)?;
        if post.author_id != requester {
            return Err(PostError::NotAuthor { requester, post_id });
        }

        // Gone between the lookup and now: someone else already deleted it.
        let Some(post) = self.posts.remove(post_id)? else {
            return Err(PostError::PostNotFound(post_id));
        };
        info!(post_id = %post_id, user_id = %requester, "Post deleted");

        let event = PostEvent::deletion(post.id, post.author_id, post.text, post.created_at);
        let receivers = self.publisher.publish(DomainEvent::Post(event)).await;
        debug!(post_id = %post_id, receivers, "Post deletion event published");

        Ok(())
    }

    fn require_user(&self, id: UserId) -> Result<User, PostError> {
        self.users.get(id)?.ok_or(PostError::UserNotFound(id))
    }
}

#[async_trait]
impl PostApi for PostService {
    async fn create_post(&self, draft: PostDraft) -> Result<PostId, PostError> {
        self.create(draft)
            .await
            .map_err(|e| self.rejected("create_post", e))
    }

    async fn delete_post(&self, requester: UserId, post_id: PostId) -> Result<(), PostError> {
        self.delete(requester, post_id)
            .await
            .map_err(|e| self.rejected("delete_post", e))
    }

    async fn get_post(&self, post_id: PostId) -> Result<Post, PostError> {
        self.require_post(post_id)
            .map_err(|e| self.rejected("get_post", e))
    }

    async fn posts_by_author(&self, author: UserId) -> Result<Vec<Post>, PostError> {
        self.require_user(author)
            .and_then(|_| Ok(self.posts.by_author(author)?))
            .map_err(|e| self.rejected("posts_by_author", e))
    }

    async fn replies_of(&self, post_id: PostId) -> Result<Vec<Post>, PostError> {
        Ok(self.posts.replies_to(post_id)?)
    }

    async fn reposts_of(&self, post_id: PostId) -> Result<Vec<Post>, PostError> {
        Ok(self.posts.reposts_of(post_id)?)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, PostError> {
        self.require_user(user_id)
            .map_err(|e| self.rejected("get_user", e))
    }

    async fn register_user(&self, user_id: UserId, name: String) -> Result<User, PostError> {
        let user = self.users.insert_if_absent(User::new(user_id, name))?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn snapshot(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.posts.all()?)
    }
}
