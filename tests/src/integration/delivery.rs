//! # Delivery Failure Flows
//!
//! The bus is fire-and-forget: lost events leave projections behind until a
//! reconciliation pass replays authority snapshots. Synchronous queries to an
//! unreachable service fail with `UpstreamUnavailable`.

use std::time::Duration;

use super::harness::{eventually, Harness};
use service_runtime::container::{ReconciliationPolicy, RuntimeConfig};
use shared_bus::{DeliveryPolicy, DispatchMode};
use shared_types::{ErrorKind, UserId};
use sn_01_posts::{PostApi, PostDraft};
use sn_02_social_graph::SocialGraphApi;
use sn_03_search::SearchApi;
use sn_04_user_timeline::UserTimelineApi;
use sn_05_home_timeline::HomeTimelineApi;

fn lossy(policy: DeliveryPolicy) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.bus.policy = policy;
    config.bus.dispatch = DispatchMode::Sequential;
    config
}

#[tokio::test]
async fn lost_events_stay_lost_without_reconciliation() {
    let h = Harness::with_config(lossy(DeliveryPolicy::Blackhole)).await;
    let (reader, author) = (h.user("reader").await, UserId::new());
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("into the void"))
        .await
        .unwrap();
    h.services.social_graph.follow(reader, author).await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.services.search.search("void").await.unwrap().is_empty());
    assert!(h.services.home_timeline.home_timeline(reader).await.unwrap().is_empty());
    assert_eq!(h.services.bus.events_dropped(), 2);

    let report = h.runtime.reconciler().run_once().await.unwrap();
    assert_eq!(report.search.added, 1);
    assert_eq!(report.home_timeline.added, 1);
    assert_eq!(h.services.search.search("void").await.unwrap(), vec![post]);
    assert_eq!(
        h.services.home_timeline.home_timeline(reader).await.unwrap(),
        vec![post]
    );
    h.stop().await;
}

#[tokio::test]
async fn partial_loss_is_repaired_by_a_resync_pass() {
    let h = Harness::with_config(lossy(DeliveryPolicy::DropEveryNth(2))).await;
    let author = UserId::new();
    for n in 0..4 {
        h.services
            .posts
            .create_post(PostDraft::new(author).text(format!("#batch {}", n)))
            .await
            .unwrap();
    }

    let search = &h.services.search;
    assert!(eventually(|| async { search.search("#batch").await.unwrap().len() == 2 }).await);
    assert_eq!(h.services.bus.events_dropped(), 2);

    let report = h.runtime.reconciler().run_once().await.unwrap();
    assert_eq!(report.search.added, 2);
    assert_eq!(report.user_timeline.added, 2);
    assert_eq!(search.search("#batch").await.unwrap().len(), 4);
    assert_eq!(h.services.user_timeline.timeline(author).await.unwrap().len(), 4);
    h.stop().await;
}

#[tokio::test]
async fn periodic_reconciliation_catches_up_on_its_own() {
    let mut config = lossy(DeliveryPolicy::Blackhole);
    config.reconciliation = ReconciliationPolicy::Periodic {
        interval: Duration::from_millis(25),
    };
    let h = Harness::with_config(config).await;
    let author = UserId::new();
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("late but present"))
        .await
        .unwrap();

    let search = &h.services.search;
    assert!(eventually(|| async { search.search("present").await.unwrap() == vec![post] }).await);
    h.stop().await;
}

#[tokio::test]
async fn home_timeline_reports_an_unreachable_user_timeline() {
    let h = Harness::start().await;
    let (reader, author) = (h.user("reader").await, h.user("author").await);
    h.services.social_graph.follow(reader, author).await.unwrap();

    let home = &h.services.home_timeline;
    assert!(eventually(|| async { home.followees(reader).await.unwrap() == vec![author] }).await);

    h.services.endpoints.user_timeline.set_reachable(false);
    let err = home.home_timeline(reader).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);

    h.services.endpoints.user_timeline.set_reachable(true);
    assert!(home.home_timeline(reader).await.is_ok());
    h.stop().await;
}

#[tokio::test]
async fn graph_writes_fail_while_the_post_authority_is_unreachable() {
    let h = Harness::start().await;
    let (x, y) = (h.user("x").await, h.user("y").await);

    h.services.endpoints.posts.set_reachable(false);
    let err = h.services.social_graph.follow(x, y).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    assert!(h.services.social_graph.follow_snapshot().await.unwrap().is_empty());

    h.services.endpoints.posts.set_reachable(true);
    h.services.social_graph.follow(x, y).await.unwrap();
    h.stop().await;
}

#[tokio::test]
async fn replies_fail_while_the_social_graph_is_unreachable() {
    let h = Harness::start().await;
    let author = UserId::new();
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("reply to me"))
        .await
        .unwrap();

    h.services.endpoints.social_graph.set_reachable(false);
    let err = h
        .services
        .posts
        .create_post(PostDraft::new(UserId::new()).text("re").reply_to(post))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);

    // Plain posts need no block check.
    assert!(h
        .services
        .posts
        .create_post(PostDraft::new(author).text("still here"))
        .await
        .is_ok());
    h.stop().await;
}
