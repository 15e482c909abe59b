//! # Block-Enforcement Guard
//!
//! One contract for "may `acting` interact with content owned by `target`?".
//! The post authority asks it before accepting a reply or repost; the social
//! graph asks it before accepting a like, once it has resolved the liked
//! post's author. Both call sites go through the same trait.
//!
//! The check is a read against an independently mutable store, so a block
//! created concurrently with the write may not be observed. It is a gate, not
//! a consistency guarantee.

use crate::entities::UserId;
use crate::errors::RemoteError;
use async_trait::async_trait;
use thiserror::Error;

/// Result of a block lookup between two users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// No block edge in either direction.
    Clear,
    /// The acting user blocks the target.
    ActingBlocksTarget,
    /// The target blocks the acting user.
    TargetBlocksActing,
}

impl BlockStatus {
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        !matches!(self, Self::Clear)
    }
}

/// Why the guard refused (or could not decide).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("interaction between {acting} and {target} is blocked ({status:?})")]
    Blocked {
        acting: UserId,
        target: UserId,
        status: BlockStatus,
    },

    /// The block store could not be queried. Callers must reject the write.
    #[error("block check unavailable: {0}")]
    Unavailable(#[from] RemoteError),
}

#[async_trait]
pub trait BlockGuard: Send + Sync {
    /// Look up block edges between `acting` and `target` in both directions.
    async fn block_status(&self, acting: UserId, target: UserId)
        -> Result<BlockStatus, RemoteError>;

    /// Fail unless the two users are clear of each other.
    async fn ensure_clear(&self, acting: UserId, target: UserId) -> Result<(), GuardError> {
        match self.block_status(acting, target).await? {
            BlockStatus::Clear => Ok(()),
            status => Err(GuardError::Blocked {
                acting,
                target,
                status,
            }),
        }
    }
}
