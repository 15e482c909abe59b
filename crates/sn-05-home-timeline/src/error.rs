//! Error types for the home-timeline projector.

use crate::ports::StoreError;
use shared_types::{ErrorKind, RemoteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeTimelineError {
    #[error("user timelines unavailable: {0}")]
    Upstream(#[from] RemoteError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl HomeTimelineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Upstream(e) => e.kind(),
            Self::Store(_) => ErrorKind::Unexpected,
        }
    }
}
