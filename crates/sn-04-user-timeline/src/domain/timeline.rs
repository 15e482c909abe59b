//! Timeline entries and the multi-user merge.

use serde::{Deserialize, Serialize};
use shared_types::{PostId, Timestamp};

/// Why a post is on a user's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryOrigin {
    Authored,
    Liked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub post_id: PostId,
    pub insert_date: Timestamp,
    pub origin: EntryOrigin,
}

impl TimelineEntry {
    pub fn authored(post_id: PostId, insert_date: Timestamp) -> Self {
        Self {
            post_id,
            insert_date,
            origin: EntryOrigin::Authored,
        }
    }

    pub fn liked(post_id: PostId, insert_date: Timestamp) -> Self {
        Self {
            post_id,
            insert_date,
            origin: EntryOrigin::Liked,
        }
    }
}

/// Flatten several users' entries into one list, oldest first.
///
/// Entries are not deduplicated across users: a post on two timelines
/// appears twice. Ties on `insert_date` are broken by post id.
pub fn merge<I>(timelines: I) -> Vec<PostId>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = TimelineEntry>,
{
    let mut entries: Vec<TimelineEntry> = timelines.into_iter().flatten().collect();
    entries.sort_by(|a, b| {
        a.insert_date
            .cmp(&b.insert_date)
            .then(a.post_id.cmp(&b.post_id))
    });
    entries.into_iter().map(|e| e.post_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_merge_interleaves_by_time() {
        let (p1, p2, p4, p5) = (PostId::new(), PostId::new(), PostId::new(), PostId::new());
        let a = vec![TimelineEntry::authored(p1, at(1)), TimelineEntry::authored(p4, at(4))];
        let b = vec![TimelineEntry::authored(p5, at(5)), TimelineEntry::authored(p2, at(2))];

        assert_eq!(merge(vec![a, b]), vec![p1, p2, p4, p5]);
    }

    #[test]
    fn test_merge_keeps_duplicates_across_users() {
        let p = PostId::new();
        let a = vec![TimelineEntry::authored(p, at(1))];
        let b = vec![TimelineEntry::liked(p, at(3))];
        assert_eq!(merge(vec![a, b]), vec![p, p]);
    }

    #[test]
    fn test_merge_of_nothing() {
        assert!(merge(Vec::<Vec<TimelineEntry>>::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_merge_is_sorted_and_complete(
            a in prop::collection::vec(0i64..1000, 0..20),
            b in prop::collection::vec(0i64..1000, 0..20),
        ) {
            let base = at(0);
            let to_entries = |offsets: &[i64]| -> Vec<TimelineEntry> {
                offsets
                    .iter()
                    .map(|o| TimelineEntry::authored(PostId::new(), base + Duration::seconds(*o)))
                    .collect()
            };
            let (ea, eb) = (to_entries(&a), to_entries(&b));
            let dates: std::collections::HashMap<PostId, Timestamp> = ea
                .iter()
                .chain(eb.iter())
                .map(|e| (e.post_id, e.insert_date))
                .collect();

            let merged = merge(vec![ea, eb]);
            prop_assert_eq!(merged.len(), a.len() + b.len());
            for pair in merged.windows(2) {
                prop_assert!(dates[&pair[0]] <= dates[&pair[1]]);
            }
        }
    }
}
