//! In-memory graph store.
//!
//! Edges live in ordered sets so list queries come back in id order.

use crate::domain::{FollowEdge, LikeEdge, PostNode, UserRelation};
use crate::ports::{GraphStore, StoreError};
use parking_lot::RwLock;
use shared_types::{PostId, UserId};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Default)]
struct Graph {
    users: HashSet<UserId>,
    posts: HashMap<PostId, PostNode>,
    follows: BTreeSet<(UserId, UserId)>,
    blocks: BTreeSet<(UserId, UserId)>,
    likes: BTreeSet<(UserId, PostId)>,
}

impl Graph {
    fn edges(&self, relation: UserRelation) -> &BTreeSet<(UserId, UserId)> {
        match relation {
            UserRelation::Follow => &self.follows,
            UserRelation::Block => &self.blocks,
        }
    }

    fn edges_mut(&mut self, relation: UserRelation) -> &mut BTreeSet<(UserId, UserId)> {
        match relation {
            UserRelation::Follow => &mut self.follows,
            UserRelation::Block => &mut self.blocks,
        }
    }
}

#[derive(Default)]
pub struct InMemoryGraphStore {
    graph: RwLock<Graph>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user and post nodes.
    pub fn node_count(&self) -> usize {
        let graph = self.graph.read();
        graph.users.len() + graph.posts.len()
    }
}

impl GraphStore for InMemoryGraphStore {
    fn has_user(&self, id: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.read().users.contains(&id))
    }

    fn add_user(&self, id: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.write().users.insert(id))
    }

    fn post(&self, id: PostId) -> Result<Option<PostNode>, StoreError> {
        Ok(self.graph.read().posts.get(&id).copied())
    }

    fn add_post(&self, node: PostNode) -> Result<bool, StoreError> {
        let mut graph = self.graph.write();
        if graph.posts.contains_key(&node.id) {
            return Ok(false);
        }
        graph.posts.insert(node.id, node);
        Ok(true)
    }

    fn has_edge(&self, relation: UserRelation, from: UserId, to: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.read().edges(relation).contains(&(from, to)))
    }

    fn add_edge(&self, relation: UserRelation, from: UserId, to: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.write().edges_mut(relation).insert((from, to)))
    }

    fn remove_edge(&self, relation: UserRelation, from: UserId, to: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.write().edges_mut(relation).remove(&(from, to)))
    }

    fn outgoing(&self, relation: UserRelation, from: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .graph
            .read()
            .edges(relation)
            .iter()
            .filter(|(f, _)| *f == from)
            .map(|(_, t)| *t)
            .collect())
    }

    fn incoming(&self, relation: UserRelation, to: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .graph
            .read()
            .edges(relation)
            .iter()
            .filter(|(_, t)| *t == to)
            .map(|(f, _)| *f)
            .collect())
    }

    fn has_like(&self, user: UserId, post: PostId) -> Result<bool, StoreError> {
        Ok(self.graph.read().likes.contains(&(user, post)))
    }

    fn add_like(&self, user: UserId, post: PostId) -> Result<bool, StoreError> {
        Ok(self.graph.write().likes.insert((user, post)))
    }

    fn remove_like(&self, user: UserId, post: PostId) -> Result<bool, StoreError> {
        Ok(self.graph.write().likes.remove(&(user, post)))
    }

    fn liked_posts(&self, user: UserId) -> Result<Vec<PostId>, StoreError> {
        Ok(self
            .graph
            .read()
            .likes
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, p)| *p)
            .collect())
    }

    fn likers(&self, post: PostId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .graph
            .read()
            .likes
            .iter()
            .filter(|(_, p)| *p == post)
            .map(|(u, _)| *u)
            .collect())
    }

    fn all_follows(&self) -> Result<Vec<FollowEdge>, StoreError> {
        Ok(self
            .graph
            .read()
            .follows
            .iter()
            .map(|&(follower, followee)| FollowEdge { follower, followee })
            .collect())
    }

    fn all_likes(&self) -> Result<Vec<LikeEdge>, StoreError> {
        Ok(self
            .graph
            .read()
            .likes
            .iter()
            .map(|&(user_id, post_id)| LikeEdge { user_id, post_id })
            .collect())
    }
}
