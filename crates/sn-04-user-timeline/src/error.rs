//! Error types for the user-timeline projector.

use crate::ports::StoreError;
use shared_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl TimelineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(_) => ErrorKind::Unexpected,
        }
    }
}
