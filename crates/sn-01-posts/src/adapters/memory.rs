//! In-memory post and user stores.

use crate::domain::{Post, User};
use crate::ports::{PostStore, StoreError, UserStore};
use parking_lot::RwLock;
use shared_types::{PostId, UserId};
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }

    fn collect(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut out: Vec<Post> = self.posts.read().values().filter(|p| keep(p)).cloned().collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        out
    }
}

impl PostStore for InMemoryPostStore {
    fn insert(&self, post: Post) -> Result<(), StoreError> {
        let mut posts = self.posts.write();
        if posts.contains_key(&post.id) {
            return Err(StoreError::Duplicate(post.id.to_string()));
        }
        posts.insert(post.id, post);
        Ok(())
    }

    fn get(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().get(&id).cloned())
    }

    fn remove(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.write().remove(&id))
    }

    fn by_author(&self, author: UserId) -> Result<Vec<Post>, StoreError> {
        Ok(self.collect(|p| p.author_id == author))
    }

    fn replies_to(&self, id: PostId) -> Result<Vec<Post>, StoreError> {
        Ok(self.collect(|p| p.reply_to == Some(id)))
    }

    fn reposts_of(&self, id: PostId) -> Result<Vec<Post>, StoreError> {
        Ok(self.collect(|p| p.repost_of == Some(id)))
    }

    fn all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.collect(|_| true))
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().get(&id).cloned())
    }

    fn insert_if_absent(&self, user: User) -> Result<User, StoreError> {
        Ok(self.users.write().entry(user.id).or_insert(user).clone())
    }
}
