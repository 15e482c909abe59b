//! Search Service
//!
//! Projects post events into the index. Deletions leave a tombstone so a
//! late or duplicated CREATION cannot re-index a deleted post.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{PostEvent, PostEventType, PostId, ResyncReport, TombstoneLog};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{SearchDocument, SearchQuery};
use crate::error::SearchError;
use crate::ports::{SearchApi, SearchIndex};

pub struct SearchService {
    index: Arc<dyn SearchIndex>,
    tombstones: Mutex<TombstoneLog<PostId>>,
}

impl SearchService {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self::with_tombstones(index, TombstoneLog::new())
    }

    pub fn with_tombstones(index: Arc<dyn SearchIndex>, tombstones: TombstoneLog<PostId>) -> Self {
        Self {
            index,
            tombstones: Mutex::new(tombstones),
        }
    }

    // The tombstone lock is held across the index write so a concurrent
    // deletion cannot slip between the check and the upsert.
    fn index_post(&self, post_id: PostId, text: Option<&str>) -> Result<(), SearchError> {
        let tombstones = self.tombstones.lock();
        if tombstones.is_buried(&post_id) {
            debug!(post_id = %post_id, "Ignoring creation of deleted post");
            return Ok(());
        }
        self.index
            .upsert(SearchDocument::from_text(post_id, text.unwrap_or_default()))?;
        info!(post_id = %post_id, "Post indexed");
        Ok(())
    }

    fn unindex_post(&self, post_id: PostId) -> Result<(), SearchError> {
        let mut tombstones = self.tombstones.lock();
        tombstones.bury(post_id);
        if self.index.remove(post_id)? {
            info!(post_id = %post_id, "Post removed from index");
        } else {
            debug!(post_id = %post_id, "Deletion of unindexed post");
        }
        Ok(())
    }
}

#[async_trait]
impl SearchApi for SearchService {
    async fn search(&self, query: &str) -> Result<Vec<PostId>, SearchError> {
        let parsed = SearchQuery::parse(query);
        let hits = self.index.query(&parsed)?;
        debug!(query, mode = ?parsed.mode, hits = hits.len(), "Search");
        Ok(hits)
    }

    async fn apply(&self, event: &PostEvent) -> Result<(), SearchError> {
        match event.event_type {
            PostEventType::Creation => self.index_post(event.post_id, event.text.as_deref()),
            PostEventType::Deletion => self.unindex_post(event.post_id),
        }
    }

    async fn resync(&self, live: &[PostEvent]) -> Result<ResyncReport, SearchError> {
        let mut report = ResyncReport::default();
        let live_ids: HashSet<PostId> = live.iter().map(|e| e.post_id).collect();

        for event in live.iter().filter(|e| e.event_type == PostEventType::Creation) {
            if !self.index.contains(event.post_id)? {
                self.index_post(event.post_id, event.text.as_deref())?;
                report.added += 1;
            }
        }
        for id in self.index.ids()? {
            if !live_ids.contains(&id) && self.index.remove(id)? {
                report.removed += 1;
            }
        }

        if !report.is_noop() {
            info!(added = report.added, removed = report.removed, "Search index resynced");
        }
        Ok(report)
    }
}
