//! Error types for the social graph authority.

use crate::domain::UserRelation;
use crate::ports::StoreError;
use shared_types::{ErrorKind, GuardError, PostId, RemoteError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("a user cannot {0} themselves")]
    SelfRelation(UserRelation),

    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("post not found: {0}")]
    PostNotFound(PostId),

    #[error("no {relation} edge from {from} to {to}")]
    EdgeNotFound {
        relation: UserRelation,
        from: UserId,
        to: UserId,
    },

    #[error("user {user} has not liked post {post}")]
    LikeNotFound { user: UserId, post: PostId },

    #[error("users {acting} and {target} block each other")]
    Blocked { acting: UserId, target: UserId },

    #[error("remote lookup failed: {0}")]
    Upstream(#[from] RemoteError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl GraphError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfRelation(_) | Self::Blocked { .. } => ErrorKind::Forbidden,
            Self::UserNotFound(_)
            | Self::PostNotFound(_)
            | Self::EdgeNotFound { .. }
            | Self::LikeNotFound { .. } => ErrorKind::NotFound,
            Self::Upstream(_) => ErrorKind::UpstreamUnavailable,
            Self::Store(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<GuardError> for GraphError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Blocked { acting, target, .. } => Self::Blocked { acting, target },
            GuardError::Unavailable(e) => Self::Upstream(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ServiceId;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            GraphError::SelfRelation(UserRelation::Follow).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            GraphError::EdgeNotFound {
                relation: UserRelation::Block,
                from: UserId::new(),
                to: UserId::new()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GraphError::from(RemoteError::unavailable(ServiceId::PostAuthority, "down")).kind(),
            ErrorKind::UpstreamUnavailable
        );
    }

    #[test]
    fn test_self_relation_message() {
        assert_eq!(
            GraphError::SelfRelation(UserRelation::Block).to_string(),
            "a user cannot BLOCK themselves"
        );
    }
}
