//! # Inbound Ports (Driving Ports)

use crate::error::SearchError;
use async_trait::async_trait;
use shared_types::{PostEvent, PostId, ResyncReport};

#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Free-text search. Results are distinct post ids, best match first.
    async fn search(&self, query: &str) -> Result<Vec<PostId>, SearchError>;

    /// Apply one post event to the index. Idempotent.
    async fn apply(&self, event: &PostEvent) -> Result<(), SearchError>;

    /// Reconcile against the CREATION events of every live post.
    async fn resync(&self, live: &[PostEvent]) -> Result<ResyncReport, SearchError>;
}
