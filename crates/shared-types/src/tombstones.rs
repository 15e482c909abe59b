//! # Time-Bounded Tombstone Log
//!
//! Remembers recently deleted keys so a late or redelivered "add" event for a
//! deleted entity cannot bring it back into a projection.
//!
//! - A tombstone lives for the retention window (default: 1 hour)
//! - Expired tombstones are garbage-collected lazily, at most once per GC interval
//! - Memory is bounded by the deletion rate times the retention window
//! - A tombstone may carry a payload, e.g. the time of the event that laid it

use crate::entities::Timestamp;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

pub struct TombstoneLog<K, V = ()> {
    /// Key -> (instant the tombstone was laid, payload).
    entries: HashMap<K, (Timestamp, V)>,

    retention: Duration,

    last_gc: Timestamp,

    gc_interval: Duration,
}

impl<K: Eq + Hash, V> TombstoneLog<K, V> {
    /// Default retention window in seconds.
    pub const DEFAULT_RETENTION_SECS: i64 = 3600;

    /// Default garbage collection interval in seconds.
    pub const DEFAULT_GC_INTERVAL_SECS: i64 = 60;

    #[must_use]
    pub fn new() -> Self {
        Self::with_config(
            Duration::seconds(Self::DEFAULT_RETENTION_SECS),
            Duration::seconds(Self::DEFAULT_GC_INTERVAL_SECS),
        )
    }

    #[must_use]
    pub fn with_config(retention: Duration, gc_interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            retention,
            last_gc: Utc::now(),
            gc_interval,
        }
    }

    /// Lay a tombstone carrying `value`. Re-burying replaces the payload
    /// and refreshes its age.
    pub fn bury_with(&mut self, key: K, value: V) {
        let now = Utc::now();
        self.maybe_collect(now);
        self.entries.insert(key, (now, value));
    }

    /// Whether `key` carries a live (unexpired) tombstone.
    #[must_use]
    pub fn is_buried(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Payload of a live tombstone.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        match self.entries.get(key) {
            Some((laid_at, value)) if Utc::now() - *laid_at < self.retention => Some(value),
            _ => None,
        }
    }

    /// Keep only the tombstones for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        self.entries.retain(|key, (_, value)| keep(key, value));
    }

    /// Remove a tombstone ahead of expiry.
    pub fn exhume(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every tombstone older than the retention window.
    pub fn collect_garbage(&mut self) {
        let now = Utc::now();
        self.collect_at(now);
        self.last_gc = now;
    }

    fn maybe_collect(&mut self, now: Timestamp) {
        if now - self.last_gc > self.gc_interval {
            self.collect_at(now);
            self.last_gc = now;
        }
    }

    fn collect_at(&mut self, now: Timestamp) {
        let threshold = now - self.retention;
        self.entries.retain(|_, (laid_at, _)| *laid_at > threshold);
    }
}

impl<K: Eq + Hash> TombstoneLog<K> {
    /// Lay a tombstone for `key`. Re-burying refreshes its age.
    pub fn bury(&mut self, key: K) {
        self.bury_with(key, ());
    }
}

impl<K: Eq + Hash, V> Default for TombstoneLog<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
