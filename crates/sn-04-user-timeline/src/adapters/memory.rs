//! In-memory timeline store: user -> (post -> entry).

use crate::domain::TimelineEntry;
use crate::ports::{StoreError, TimelineStore};
use parking_lot::RwLock;
use shared_types::{PostId, UserId};
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryTimelineStore {
    timelines: RwLock<HashMap<UserId, HashMap<PostId, TimelineEntry>>>,
}

impl InMemoryTimelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entries across all users.
    pub fn len(&self) -> usize {
        self.timelines.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TimelineStore for InMemoryTimelineStore {
    fn add(&self, user: UserId, entry: TimelineEntry) -> Result<bool, StoreError> {
        let mut timelines = self.timelines.write();
        let timeline = timelines.entry(user).or_default();
        if timeline.contains_key(&entry.post_id) {
            return Ok(false);
        }
        timeline.insert(entry.post_id, entry);
        Ok(true)
    }

    fn put(&self, user: UserId, entry: TimelineEntry) -> Result<Option<TimelineEntry>, StoreError> {
        Ok(self
            .timelines
            .write()
            .entry(user)
            .or_default()
            .insert(entry.post_id, entry))
    }

    fn get(&self, user: UserId, post: PostId) -> Result<Option<TimelineEntry>, StoreError> {
        Ok(self
            .timelines
            .read()
            .get(&user)
            .and_then(|t| t.get(&post))
            .copied())
    }

    fn remove(&self, user: UserId, post: PostId) -> Result<Option<TimelineEntry>, StoreError> {
        let mut timelines = self.timelines.write();
        let Some(timeline) = timelines.get_mut(&user) else {
            return Ok(None);
        };
        let removed = timeline.remove(&post);
        if timeline.is_empty() {
            timelines.remove(&user);
        }
        Ok(removed)
    }

    fn purge(&self, post: PostId) -> Result<usize, StoreError> {
        let mut timelines = self.timelines.write();
        let mut removed = 0;
        for timeline in timelines.values_mut() {
            if timeline.remove(&post).is_some() {
                removed += 1;
            }
        }
        timelines.retain(|_, t| !t.is_empty());
        Ok(removed)
    }

    fn entries(&self, user: UserId) -> Result<Vec<TimelineEntry>, StoreError> {
        let mut entries: Vec<TimelineEntry> = self
            .timelines
            .read()
            .get(&user)
            .map(|t| t.values().copied().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| a.insert_date.cmp(&b.insert_date).then(a.post_id.cmp(&b.post_id)));
        Ok(entries)
    }

    fn all(&self) -> Result<Vec<(UserId, TimelineEntry)>, StoreError> {
        Ok(self
            .timelines
            .read()
            .iter()
            .flat_map(|(user, t)| t.values().map(move |e| (*user, *e)))
            .collect())
    }
}
