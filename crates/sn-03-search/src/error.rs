//! Error types for the search projector.

use crate::ports::IndexError;
use shared_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("index error: {0}")]
    Index(#[from] IndexError),
}

impl SearchError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Index(_) => ErrorKind::Unexpected,
        }
    }
}
