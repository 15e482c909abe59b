//! Home Timeline Service
//!
//! Write side: FOLLOW adds to the follower's followee set, UNFOLLOW removes.
//! Read side: load the followee set, then one fan-out query to the
//! user-timeline projector with the whole set.

use async_trait::async_trait;
use shared_types::{FollowEvent, FollowEventType, PostId, ResyncReport, ServiceId, UserId};
use sn_telemetry::REQUESTS_REJECTED;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::HomeTimelineError;
use crate::ports::{FolloweeStore, HomeTimelineApi, UserTimelineQuery};

pub struct HomeTimelineService {
    followees: Arc<dyn FolloweeStore>,
    timelines: Arc<dyn UserTimelineQuery>,
}

impl HomeTimelineService {
    pub fn new(followees: Arc<dyn FolloweeStore>, timelines: Arc<dyn UserTimelineQuery>) -> Self {
        Self {
            followees,
            timelines,
        }
    }
}

#[async_trait]
impl HomeTimelineApi for HomeTimelineService {
    async fn home_timeline(&self, user: UserId) -> Result<Vec<PostId>, HomeTimelineError> {
        let followees = self.followees.followees(user)?;
        if followees.is_empty() {
            debug!(user_id = %user, "No followees, empty home timeline");
            return Ok(Vec::new());
        }

        match self.timelines.merged_timeline(&followees).await {
            Ok(posts) => {
                debug!(user_id = %user, followees = followees.len(), posts = posts.len(), "Home timeline built");
                Ok(posts)
            }
            Err(e) => {
                let err = HomeTimelineError::from(e);
                REQUESTS_REJECTED
                    .with_label_values(&[ServiceId::HomeTimeline.name(), err.kind().as_str()])
                    .inc();
                warn!(user_id = %user, error = %err, "Home timeline unavailable");
                Err(err)
            }
        }
    }

    async fn followees(&self, user: UserId) -> Result<Vec<UserId>, HomeTimelineError> {
        Ok(self.followees.followees(user)?)
    }

    async fn apply_follow(&self, event: &FollowEvent) -> Result<(), HomeTimelineError> {
        let (user, followee) = (event.user_id, event.followee_id);
        match event.event_type {
            FollowEventType::Follow => {
                if self.followees.add(user, followee)? {
                    info!(user_id = %user, followee_id = %followee, "Followee added");
                } else {
                    debug!(user_id = %user, followee_id = %followee, "Followee already present");
                }
            }
            FollowEventType::Unfollow => {
                if self.followees.remove(user, followee)? {
                    info!(user_id = %user, followee_id = %followee, "Followee removed");
                } else {
                    debug!(user_id = %user, followee_id = %followee, "Followee already absent");
                }
            }
        }
        Ok(())
    }

    async fn resync(&self, follows: &[FollowEvent]) -> Result<ResyncReport, HomeTimelineError> {
        let mut report = ResyncReport::default();
        let expected: HashSet<(UserId, UserId)> = follows
            .iter()
            .filter(|e| e.event_type == FollowEventType::Follow)
            .map(|e| (e.user_id, e.followee_id))
            .collect();

        for &(user, followee) in &expected {
            if self.followees.add(user, followee)? {
                report.added += 1;
            }
        }
        for (user, followee) in self.followees.all()? {
            if !expected.contains(&(user, followee)) && self.followees.remove(user, followee)? {
                report.removed += 1;
            }
        }

        if !report.is_noop() {
            info!(added = report.added, removed = report.removed, "Followee sets resynced");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryFolloweeStore;
    use parking_lot::Mutex;
    use shared_types::{ErrorKind, RemoteError};

    /// Records every fan-out call and answers with a fixed list.
    #[derive(Default)]
    struct Timelines {
        calls: Mutex<Vec<Vec<UserId>>>,
        answer: Vec<PostId>,
        down: bool,
    }

    #[async_trait]
    impl UserTimelineQuery for Timelines {
        async fn merged_timeline(&self, users: &[UserId]) -> Result<Vec<PostId>, RemoteError> {
            self.calls.lock().push(users.to_vec());
            if self.down {
                return Err(RemoteError::unavailable(ServiceId::UserTimeline, "down"));
            }
            Ok(self.answer.clone())
        }
    }

    fn service(timelines: Timelines) -> (HomeTimelineService, Arc<Timelines>) {
        let timelines = Arc::new(timelines);
        (
            HomeTimelineService::new(Arc::new(InMemoryFolloweeStore::new()), timelines.clone()),
            timelines,
        )
    }

    #[tokio::test]
    async fn test_empty_followee_set_skips_fan_out() {
        let (service, timelines) = service(Timelines::default());
        assert!(service.home_timeline(UserId::new()).await.unwrap().is_empty());
        assert!(timelines.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_uses_followee_set() {
        let posts = vec![PostId::new(), PostId::new()];
        let (service, timelines) = service(Timelines {
            answer: posts.clone(),
            ..Default::default()
        });
        let (user, a, b) = (UserId::new(), UserId::new(), UserId::new());
        service.apply_follow(&FollowEvent::follow(user, a)).await.unwrap();
        service.apply_follow(&FollowEvent::follow(user, b)).await.unwrap();
        service.apply_follow(&FollowEvent::follow(user, b)).await.unwrap();

        assert_eq!(service.home_timeline(user).await.unwrap(), posts);
        let calls = timelines.calls.lock();
        assert_eq!(calls.len(), 1);
        let mut asked = calls[0].clone();
        asked.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(asked, expected);
    }

    #[tokio::test]
    async fn test_unfollow_is_idempotent() {
        let (service, _) = service(Timelines::default());
        let (user, a) = (UserId::new(), UserId::new());
        service.apply_follow(&FollowEvent::follow(user, a)).await.unwrap();
        service.apply_follow(&FollowEvent::unfollow(user, a)).await.unwrap();
        service.apply_follow(&FollowEvent::unfollow(user, a)).await.unwrap();
        assert!(service.followees(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_outage_is_reported() {
        let (service, _) = service(Timelines {
            down: true,
            ..Default::default()
        });
        let user = UserId::new();
        service
            .apply_follow(&FollowEvent::follow(user, UserId::new()))
            .await
            .unwrap();

        let err = service.home_timeline(user).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn test_resync() {
        let (service, _) = service(Timelines::default());
        let (user, kept, stale, missed) = (UserId::new(), UserId::new(), UserId::new(), UserId::new());
        service.apply_follow(&FollowEvent::follow(user, kept)).await.unwrap();
        service.apply_follow(&FollowEvent::follow(user, stale)).await.unwrap();

        let snapshot = vec![FollowEvent::follow(user, kept), FollowEvent::follow(user, missed)];
        let report = service.resync(&snapshot).await.unwrap();

        assert_eq!(report, ResyncReport { added: 1, removed: 1 });
        let mut followees = service.followees(user).await.unwrap();
        followees.sort();
        let mut expected = vec![kept, missed];
        expected.sort();
        assert_eq!(followees, expected);
    }
}
