//! Block guard answered from the local graph.

use crate::domain::UserRelation;
use crate::ports::{BlockGuard, GraphStore};
use async_trait::async_trait;
use shared_types::{BlockStatus, RemoteError, ServiceId, UserId};
use std::sync::Arc;

pub struct GraphBlockGuard {
    store: Arc<dyn GraphStore>,
}

impl GraphBlockGuard {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BlockGuard for GraphBlockGuard {
    async fn block_status(&self, acting: UserId, target: UserId) -> Result<BlockStatus, RemoteError> {
        let lookup = |from, to| {
            self.store
                .has_edge(UserRelation::Block, from, to)
                .map_err(|e| RemoteError::unavailable(ServiceId::SocialGraph, e.to_string()))
        };

        if lookup(acting, target)? {
            Ok(BlockStatus::ActingBlocksTarget)
        } else if lookup(target, acting)? {
            Ok(BlockStatus::TargetBlocksActing)
        } else {
            Ok(BlockStatus::Clear)
        }
    }
}
