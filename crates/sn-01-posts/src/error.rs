//! Error types for the post authority.

use crate::ports::StoreError;
use shared_types::{ErrorKind, GuardError, PostId, RemoteError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post must contain at least one of text, media or repost")]
    EmptyContent,

    #[error("post must contain at most two of text, media and repost")]
    TooMuchContent,

    #[error("post text is {len} characters, limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("post not found: {0}")]
    PostNotFound(PostId),

    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("user {requester} is not the author of post {post_id}")]
    NotAuthor { requester: UserId, post_id: PostId },

    #[error("user {acting} may not interact with content of {target}")]
    Blocked { acting: UserId, target: UserId },

    #[error("block check failed: {0}")]
    GuardUnavailable(RemoteError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl PostError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyContent | Self::TooMuchContent | Self::TextTooLong { .. } => {
                ErrorKind::InvalidRequest
            }
            Self::PostNotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::NotAuthor { .. } | Self::Blocked { .. } => ErrorKind::Forbidden,
            Self::GuardUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::Store(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<GuardError> for PostError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Blocked { acting, target, .. } => Self::Blocked { acting, target },
            GuardError::Unavailable(e) => Self::GuardUnavailable(e),
        }
    }
}
