//! # Outbound Ports (Driven Ports)

use crate::domain::{SearchDocument, SearchQuery};
use shared_types::PostId;
use thiserror::Error;

/// Full-text index keyed by post id.
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document for `doc.post_id`.
    fn upsert(&self, doc: SearchDocument) -> Result<(), IndexError>;

    /// Returns `false` if nothing was indexed under `id`.
    fn remove(&self, id: PostId) -> Result<bool, IndexError>;

    fn contains(&self, id: PostId) -> Result<bool, IndexError>;

    /// Matching ids, best first, each at most once.
    fn query(&self, query: &SearchQuery) -> Result<Vec<PostId>, IndexError>;

    fn ids(&self) -> Result<Vec<PostId>, IndexError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("search index unavailable: {0}")]
    Unavailable(String),
}
