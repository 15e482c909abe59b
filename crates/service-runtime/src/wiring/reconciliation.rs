//! # Reconciliation
//!
//! The bus never redelivers, so a projector that missed an event stays
//! divergent. A reconciliation pass snapshots the authorities and replays the
//! snapshot into each projector as synthesized events:
//!
//! - every live post becomes a CREATION event (search, user timeline)
//! - every like edge of a live post becomes a LIKE event stamped with the
//!   current time (user timeline)
//! - every follow edge becomes a FOLLOW event (home timeline)
//!
//! Each projector then drops entries the snapshot does not contain.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use shared_types::{FollowEvent, LikeEvent, PostEvent, PostId, ResyncReport, TimeSource};
use sn_01_posts::{PostApi, PostError};
use sn_02_social_graph::{GraphError, SocialGraphApi};
use sn_03_search::{SearchApi, SearchError};
use sn_04_user_timeline::{TimelineError, UserTimelineApi};
use sn_05_home_timeline::{HomeTimelineApi, HomeTimelineError};
use sn_telemetry::RECONCILIATION_RUNS;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::container::ServiceContainer;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("post snapshot failed: {0}")]
    Posts(#[from] PostError),

    #[error("graph snapshot failed: {0}")]
    Graph(#[from] GraphError),

    #[error("search resync failed: {0}")]
    Search(#[from] SearchError),

    #[error("user-timeline resync failed: {0}")]
    UserTimeline(#[from] TimelineError),

    #[error("home-timeline resync failed: {0}")]
    HomeTimeline(#[from] HomeTimelineError),
}

/// Changes made by one pass, per projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub search: ResyncReport,
    pub user_timeline: ResyncReport,
    pub home_timeline: ResyncReport,
}

impl ReconcileReport {
    #[must_use]
    pub fn total(&self) -> ResyncReport {
        self.search
            .merge(self.user_timeline)
            .merge(self.home_timeline)
    }
}

pub struct Reconciler {
    posts: Arc<dyn PostApi>,
    graph: Arc<dyn SocialGraphApi>,
    search: Arc<dyn SearchApi>,
    user_timeline: Arc<dyn UserTimelineApi>,
    home_timeline: Arc<dyn HomeTimelineApi>,
    clock: Arc<dyn TimeSource>,
}

impl Reconciler {
    pub fn new(
        posts: Arc<dyn PostApi>,
        graph: Arc<dyn SocialGraphApi>,
        search: Arc<dyn SearchApi>,
        user_timeline: Arc<dyn UserTimelineApi>,
        home_timeline: Arc<dyn HomeTimelineApi>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            posts,
            graph,
            search,
            user_timeline,
            home_timeline,
            clock,
        }
    }

    pub fn for_container(container: &ServiceContainer) -> Self {
        Self::new(
            container.posts.clone(),
            container.social_graph.clone(),
            container.search.clone(),
            container.user_timeline.clone(),
            container.home_timeline.clone(),
            container.clock.clone(),
        )
    }

    /// Run a single pass. Records the outcome in `RECONCILIATION_RUNS`.
    pub async fn run_once(&self) -> Result<ReconcileReport, ReconcileError> {
        let result = self.reconcile().await;
        match &result {
            Ok(report) => {
                RECONCILIATION_RUNS.with_label_values(&["ok"]).inc();
                let total = report.total();
                if total.is_noop() {
                    debug!("Projections already consistent");
                } else {
                    info!(
                        added = total.added,
                        removed = total.removed,
                        "Projections reconciled"
                    );
                }
            }
            Err(e) => {
                RECONCILIATION_RUNS.with_label_values(&["failed"]).inc();
                error!(error = %e, "Reconciliation failed");
            }
        }
        result
    }

    async fn reconcile(&self) -> Result<ReconcileReport, ReconcileError> {
        let posts: Vec<PostEvent> = self
            .posts
            .snapshot()
            .await?
            .into_iter()
            .map(|p| PostEvent::creation(p.id, p.author_id, p.text, p.created_at))
            .collect();

        // Deleting a post leaves its like edges in the graph.
        let live: HashSet<PostId> = posts.iter().map(|p| p.post_id).collect();
        let now = self.clock.now();
        let likes: Vec<LikeEvent> = self
            .graph
            .like_snapshot()
            .await?
            .into_iter()
            .filter(|edge| live.contains(&edge.post_id))
            .map(|edge| LikeEvent::like(edge.user_id, edge.post_id, now))
            .collect();

        let follows: Vec<FollowEvent> = self
            .graph
            .follow_snapshot()
            .await?
            .into_iter()
            .map(|edge| FollowEvent::follow(edge.follower, edge.followee))
            .collect();

        debug!(
            posts = posts.len(),
            likes = likes.len(),
            follows = follows.len(),
            "Authority snapshots taken"
        );

        Ok(ReconcileReport {
            search: self.search.resync(&posts).await?,
            user_timeline: self.user_timeline.resync(&posts, &likes).await?,
            home_timeline: self.home_timeline.resync(&follows).await?,
        })
    }

    /// Run a pass every `interval` until `shutdown` flips to `true`.
    ///
    /// The first pass happens one interval after the call. A failed pass is
    /// logged and the next one runs on schedule.
    pub fn spawn_periodic(
        self: Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            info!(interval_secs = interval.as_secs(), "Periodic reconciliation started");
            loop {
                tokio::select! {
                    _ = shutdown.changed() => {
                        info!("Periodic reconciliation stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let _ = self.run_once().await;
                    }
                }
            }
        })
    }
}
