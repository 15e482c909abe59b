//! # Service Container
//!
//! Builds every service with its in-memory stores and cross-service clients.
//!
//! ```text
//! Post Authority ──guard──▶ Social Graph ──directory──▶ Post Authority
//! Home Timeline ──merge──▶ User Timeline
//! ```
//!
//! The first line is a cycle, so both clients are created against unbound
//! [`Endpoint`]s and the endpoints are bound once both services exist.

use std::sync::Arc;

use shared_bus::InMemoryEventBus;
use shared_types::{ServiceId, SystemTimeSource, TimeSource};
use sn_01_posts::{ContentRules, InMemoryPostStore, InMemoryUserStore, PostApi, PostService};
use sn_02_social_graph::{GraphBlockGuard, GraphService, InMemoryGraphStore, SocialGraphApi};
use sn_03_search::{InMemorySearchIndex, SearchService};
use sn_04_user_timeline::{InMemoryTimelineStore, TimelineService, UserTimelineApi};
use sn_05_home_timeline::{HomeTimelineService, InMemoryFolloweeStore};
use tracing::{info, instrument};

use crate::adapters::{Endpoint, PostDirectoryClient, SocialGraphGuardClient, UserTimelineClient};
use crate::container::config::RuntimeConfig;

/// Endpoints through which services reach each other.
#[derive(Clone)]
pub struct Endpoints {
    pub posts: Endpoint<dyn PostApi>,
    pub social_graph: Endpoint<dyn SocialGraphApi>,
    pub user_timeline: Endpoint<dyn UserTimelineApi>,
}

pub struct ServiceContainer {
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<dyn TimeSource>,

    /// Post Authority (sn-01)
    pub posts: Arc<PostService>,
    /// Social Graph Authority (sn-02)
    pub social_graph: Arc<GraphService>,
    /// Search Projector (sn-03)
    pub search: Arc<SearchService>,
    /// User-Timeline Projector (sn-04)
    pub user_timeline: Arc<TimelineService>,
    /// Home-Timeline Projector (sn-05)
    pub home_timeline: Arc<HomeTimelineService>,

    pub endpoints: Endpoints,
    pub config: RuntimeConfig,
}

impl ServiceContainer {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    #[instrument(name = "service_init", skip_all)]
    pub fn with_clock(config: RuntimeConfig, clock: Arc<dyn TimeSource>) -> Self {
        info!(
            capacity = config.bus.capacity,
            policy = %config.bus.policy,
            "Creating event bus"
        );
        let bus = Arc::new(InMemoryEventBus::with_policy(
            config.bus.capacity,
            config.bus.policy,
        ));

        let endpoints = Endpoints {
            posts: Endpoint::new(ServiceId::PostAuthority),
            social_graph: Endpoint::new(ServiceId::SocialGraph),
            user_timeline: Endpoint::new(ServiceId::UserTimeline),
        };

        let posts = Arc::new(
            PostService::new(
                Arc::new(InMemoryPostStore::new()),
                Arc::new(InMemoryUserStore::new()),
                Arc::new(SocialGraphGuardClient::new(endpoints.social_graph.clone())),
                bus.clone(),
                clock.clone(),
            )
            .with_rules(ContentRules::default().with_max_text_chars(config.max_text_chars)),
        );
        info!("  [sn-01] Post authority initialized");

        let graph_store = Arc::new(InMemoryGraphStore::new());
        let social_graph = Arc::new(GraphService::new(
            graph_store.clone(),
            Arc::new(PostDirectoryClient::new(endpoints.posts.clone())),
            Arc::new(GraphBlockGuard::new(graph_store)),
            bus.clone(),
            clock.clone(),
        ));
        info!("  [sn-02] Social graph initialized");

        let search = Arc::new(SearchService::new(Arc::new(InMemorySearchIndex::new())));
        info!("  [sn-03] Search projector initialized");

        let user_timeline = Arc::new(TimelineService::new(Arc::new(InMemoryTimelineStore::new())));
        info!("  [sn-04] User-timeline projector initialized");

        let home_timeline = Arc::new(HomeTimelineService::new(
            Arc::new(InMemoryFolloweeStore::new()),
            Arc::new(UserTimelineClient::new(endpoints.user_timeline.clone())),
        ));
        info!("  [sn-05] Home-timeline projector initialized");

        endpoints.posts.bind(posts.clone());
        endpoints.social_graph.bind(social_graph.clone());
        endpoints.user_timeline.bind(user_timeline.clone());

        Self {
            bus,
            clock,
            posts,
            social_graph,
            search,
            user_timeline,
            home_timeline,
            endpoints,
            config,
        }
    }
}
