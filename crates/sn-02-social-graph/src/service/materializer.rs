//! Lazy entity materialization.
//!
//! Resolve-or-fail: look the id up locally, then ask the owning authority,
//! then create the node. A node is never created for an id the authority did
//! not confirm, and a node that already exists is never created again.

use crate::domain::{NodeKind, PostNode};
use crate::error::GraphError;
use crate::ports::{EntityDirectory, GraphStore};
use shared_types::{PostId, UserId};
use sn_telemetry::NODES_MATERIALIZED;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Materializer {
    store: Arc<dyn GraphStore>,
    directory: Arc<dyn EntityDirectory>,
}

impl Materializer {
    pub fn new(store: Arc<dyn GraphStore>, directory: Arc<dyn EntityDirectory>) -> Self {
        Self { store, directory }
    }

    /// Ensure a user node exists.
    pub async fn user(&self, id: UserId) -> Result<(), GraphError> {
        if self.store.has_user(id)? {
            return Ok(());
        }
        if !self.directory.user_exists(id).await? {
            debug!(user_id = %id, "User unknown to the post authority");
            return Err(GraphError::UserNotFound(id));
        }
        if self.store.add_user(id)? {
            NODES_MATERIALIZED
                .with_label_values(&[NodeKind::User.label()])
                .inc();
            info!(user_id = %id, "User node materialized");
        }
        Ok(())
    }

    /// Ensure a post node exists and return it.
    pub async fn post(&self, id: PostId) -> Result<PostNode, GraphError> {
        if let Some(node) = self.store.post(id)? {
            return Ok(node);
        }
        let Some(author_id) = self.directory.post_author(id).await? else {
            debug!(post_id = %id, "Post unknown to the post authority");
            return Err(GraphError::PostNotFound(id));
        };

        let node = PostNode { id, author_id };
        if self.store.add_post(node)? {
            NODES_MATERIALIZED
                .with_label_values(&[NodeKind::Post.label()])
                .inc();
            info!(post_id = %id, author_id = %author_id, "Post node materialized");
        }
        Ok(node)
    }
}
