//! Timeline Service
//!
//! Application rules:
//!
//! | Event | Effect |
//! |-------|--------|
//! | CREATION | add `(author, post)` at `eventTime` unless the post is tombstoned; a liked entry becomes authored |
//! | DELETION | tombstone the post, remove it from every timeline |
//! | LIKE | add `(liker, post)` at `creationDate` unless present, tombstoned, or older than the last UNLIKE |
//! | UNLIKE | remove the liked entry unless it is newer than the UNLIKE |
//!
//! Every rule is a function of current state and the event, so duplicates
//! are no-ops and any delivery order of a CREATION/DELETION pair ends with
//! the post absent. Tombstones and remembered UNLIKEs expire after the
//! retention window (default: 1 hour).

use async_trait::async_trait;
use chrono::Duration;
use parking_lot::Mutex;
use shared_types::{
    LikeEvent, LikeEventType, PostEvent, PostEventType, PostId, ResyncReport, Timestamp,
    TombstoneLog, UserId,
};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{merge, EntryOrigin, TimelineEntry};
use crate::error::TimelineError;
use crate::ports::{TimelineStore, UserTimelineApi};

#[derive(Default)]
struct ApplyState {
    tombstones: TombstoneLog<PostId>,
    /// Latest UNLIKE seen per (user, post).
    unlikes: TombstoneLog<(UserId, PostId), Timestamp>,
}

impl ApplyState {
    fn with_retention(retention: Duration) -> Self {
        let gc_interval = Duration::seconds(TombstoneLog::<PostId>::DEFAULT_GC_INTERVAL_SECS);
        Self {
            tombstones: TombstoneLog::with_config(retention, gc_interval),
            unlikes: TombstoneLog::with_config(retention, gc_interval),
        }
    }
}

pub struct TimelineService {
    store: Arc<dyn TimelineStore>,
    // Held across each check-and-write so concurrent handlers see a
    // consistent tombstone and unlike view.
    state: Mutex<ApplyState>,
}

impl TimelineService {
    pub fn new(store: Arc<dyn TimelineStore>) -> Self {
        Self {
            store,
            state: Mutex::new(ApplyState::default()),
        }
    }

    /// Keep tombstones and remembered UNLIKEs for `retention` instead of
    /// the default hour.
    pub fn with_retention(store: Arc<dyn TimelineStore>, retention: Duration) -> Self {
        Self {
            store,
            state: Mutex::new(ApplyState::with_retention(retention)),
        }
    }

    /// Number of remembered UNLIKEs, expired ones included until collected.
    pub fn tracked_unlikes(&self) -> usize {
        self.state.lock().unlikes.len()
    }

    /// Drop expired tombstones and UNLIKEs.
    pub fn collect_garbage(&self) {
        let mut state = self.state.lock();
        state.tombstones.collect_garbage();
        state.unlikes.collect_garbage();
    }

    fn on_creation(&self, event: &PostEvent) -> Result<(), TimelineError> {
        let state = self.state.lock();
        if state.tombstones.is_buried(&event.post_id) {
            debug!(post_id = %event.post_id, "Ignoring creation of deleted post");
            return Ok(());
        }
        let entry = TimelineEntry::authored(event.post_id, event.event_time);
        match self.store.get(event.user_id, event.post_id)? {
            None => {
                self.store.add(event.user_id, entry)?;
                info!(user_id = %event.user_id, post_id = %event.post_id, "Post added to timeline");
            }
            // The author's own LIKE got here first.
            Some(existing) if existing.origin == EntryOrigin::Liked => {
                self.store.put(event.user_id, entry)?;
                info!(user_id = %event.user_id, post_id = %event.post_id, "Liked entry marked as authored");
            }
            Some(_) => {
                debug!(user_id = %event.user_id, post_id = %event.post_id, "Post already on timeline");
            }
        }
        Ok(())
    }

    fn on_deletion(&self, event: &PostEvent) -> Result<(), TimelineError> {
        let mut state = self.state.lock();
        state.tombstones.bury(event.post_id);
        state.unlikes.retain(|(_, post), _| *post != event.post_id);
        let removed = self.store.purge(event.post_id)?;
        if removed > 0 {
            info!(post_id = %event.post_id, removed, "Post removed from timelines");
        } else {
            debug!(post_id = %event.post_id, "Deletion of post on no timeline");
        }
        Ok(())
    }

    fn on_like(&self, event: &LikeEvent) -> Result<(), TimelineError> {
        let key = (event.user_id, event.post_id);
        let mut state = self.state.lock();
        if state.tombstones.is_buried(&event.post_id) {
            debug!(post_id = %event.post_id, "Ignoring like of deleted post");
            return Ok(());
        }
        if let Some(unliked_at) = state.unlikes.get(&key).copied() {
            if unliked_at >= event.creation_date {
                debug!(user_id = %event.user_id, post_id = %event.post_id, "Ignoring like older than unlike");
                return Ok(());
            }
            state.unlikes.exhume(&key);
        }

        let entry = TimelineEntry::liked(event.post_id, event.creation_date);
        if self.store.add(event.user_id, entry)? {
            info!(user_id = %event.user_id, post_id = %event.post_id, "Liked post added to timeline");
        }
        Ok(())
    }

    fn on_unlike(&self, event: &LikeEvent) -> Result<(), TimelineError> {
        let key = (event.user_id, event.post_id);
        let mut state = self.state.lock();

        match self.store.get(event.user_id, event.post_id)? {
            Some(entry) if entry.insert_date > event.creation_date => {
                debug!(user_id = %event.user_id, post_id = %event.post_id, "Ignoring unlike older than like");
                return Ok(());
            }
            Some(entry) if entry.origin == EntryOrigin::Liked => {
                self.store.remove(event.user_id, event.post_id)?;
                info!(user_id = %event.user_id, post_id = %event.post_id, "Liked post removed from timeline");
            }
            _ => {}
        }

        let newer = state
            .unlikes
            .get(&key)
            .map_or(true, |latest| *latest < event.creation_date);
        if newer {
            state.unlikes.bury_with(key, event.creation_date);
        }
        Ok(())
    }
}

#[async_trait]
impl UserTimelineApi for TimelineService {
    async fn merged_timeline(&self, users: &[UserId]) -> Result<Vec<PostId>, TimelineError> {
        let distinct: BTreeSet<UserId> = users.iter().copied().collect();
        let mut timelines = Vec::with_capacity(distinct.len());
        for user in distinct {
            timelines.push(self.store.entries(user)?);
        }
        let merged = merge(timelines);
        debug!(users = users.len(), entries = merged.len(), "Merged timelines");
        Ok(merged)
    }

    async fn timeline(&self, user: UserId) -> Result<Vec<TimelineEntry>, TimelineError> {
        Ok(self.store.entries(user)?)
    }

    async fn apply_post(&self, event: &PostEvent) -> Result<(), TimelineError> {
        match event.event_type {
            PostEventType::Creation => self.on_creation(event),
            PostEventType::Deletion => self.on_deletion(event),
        }
    }

    async fn apply_like(&self, event: &LikeEvent) -> Result<(), TimelineError> {
        match event.event_type {
            LikeEventType::Like => self.on_like(event),
            LikeEventType::Unlike => self.on_unlike(event),
        }
    }

    async fn resync(
        &self,
        posts: &[PostEvent],
        likes: &[LikeEvent],
    ) -> Result<ResyncReport, TimelineError> {
        self.collect_garbage();
        let mut report = ResyncReport::default();
        let mut expected: HashSet<(UserId, PostId)> = HashSet::new();
        let mut live: HashSet<PostId> = HashSet::new();

        for event in posts.iter().filter(|e| e.event_type == PostEventType::Creation) {
            live.insert(event.post_id);
            expected.insert((event.user_id, event.post_id));
            let existing = self.store.get(event.user_id, event.post_id)?;
            if existing.map(|e| e.origin) != Some(EntryOrigin::Authored) {
                self.on_creation(event)?;
                if existing.is_none() && self.store.get(event.user_id, event.post_id)?.is_some() {
                    report.added += 1;
                }
            }
        }
        // A like edge can outlive its post; only live posts count.
        for event in likes
            .iter()
            .filter(|e| e.event_type == LikeEventType::Like && live.contains(&e.post_id))
        {
            expected.insert((event.user_id, event.post_id));
            if self.store.get(event.user_id, event.post_id)?.is_none() {
                self.on_like(event)?;
                if self.store.get(event.user_id, event.post_id)?.is_some() {
                    report.added += 1;
                }
            }
        }

        for (user, entry) in self.store.all()? {
            if !expected.contains(&(user, entry.post_id))
                && self.store.remove(user, entry.post_id)?.is_some()
            {
                report.removed += 1;
            }
        }

        if !report.is_noop() {
            info!(added = report.added, removed = report.removed, "User timelines resynced");
        }
        Ok(report)
    }
}
