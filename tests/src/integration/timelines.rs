//! # Timeline Flows
//!
//! User timelines built from post and like events, home timelines merged
//! from followees, and how both behave under redelivery and reordering.

use std::sync::Arc;

use super::harness::{eventually, Harness};
use shared_bus::{DomainEvent, EventPublisher};
use shared_types::{PostEvent, PostId, TimeSource, UserId};
use sn_01_posts::{PostApi, PostDraft};
use sn_02_social_graph::SocialGraphApi;
use sn_03_search::{InMemorySearchIndex, SearchApi, SearchService};
use sn_04_user_timeline::{EntryOrigin, InMemoryTimelineStore, TimelineService, UserTimelineApi};
use sn_05_home_timeline::HomeTimelineApi;

async fn post_at(h: &Harness, author: UserId, text: &str) -> PostId {
    h.tick();
    h.services
        .posts
        .create_post(PostDraft::new(author).text(text))
        .await
        .unwrap()
}

#[tokio::test]
async fn home_timeline_interleaves_followees_by_time() {
    let h = Harness::start().await;
    let (reader, a, b) = (h.user("reader").await, h.user("a").await, h.user("b").await);

    h.services.social_graph.follow(reader, a).await.unwrap();
    h.services.social_graph.follow(reader, b).await.unwrap();

    let t1 = post_at(&h, a, "one").await;
    let t2 = post_at(&h, b, "two").await;
    let t4 = post_at(&h, a, "four").await;
    let t5 = post_at(&h, b, "five").await;
    let expected = vec![t1, t2, t4, t5];

    let home = &h.services.home_timeline;
    assert!(eventually(|| async { home.home_timeline(reader).await.unwrap() == expected }).await);
    assert_eq!(
        h.services.user_timeline.merged_timeline(&[a, b]).await.unwrap(),
        expected
    );
    h.stop().await;
}

#[tokio::test]
async fn home_timeline_without_followees_is_empty() {
    let h = Harness::start().await;
    let loner = h.user("loner").await;
    assert!(h
        .services
        .home_timeline
        .home_timeline(loner)
        .await
        .unwrap()
        .is_empty());
    h.stop().await;
}

#[tokio::test]
async fn redelivered_creation_is_applied_once() {
    let h = Harness::start().await;
    let author = UserId::new();
    let first = post_at(&h, author, "first").await;
    let timelines = &h.services.user_timeline;
    assert!(eventually(|| async { timelines.timeline(author).await.unwrap().len() == 1 }).await);

    let post = h.services.posts.get_post(first).await.unwrap();
    let duplicate = PostEvent::creation(post.id, author, post.text, post.created_at);
    h.services.bus.publish(DomainEvent::Post(duplicate)).await;

    // Sequential dispatch: once this one lands, the duplicate has been handled.
    let marker = post_at(&h, author, "marker").await;
    assert!(eventually(|| async {
        timelines
            .timeline(author)
            .await
            .unwrap()
            .iter()
            .any(|e| e.post_id == marker)
    })
    .await);
    assert_eq!(timelines.timeline(author).await.unwrap().len(), 2);
    h.stop().await;
}

#[tokio::test]
async fn stale_creation_cannot_resurrect_a_deleted_post() {
    let h = Harness::start().await;
    let author = UserId::new();
    let doomed = post_at(&h, author, "doomed #gone").await;
    let post = h.services.posts.get_post(doomed).await.unwrap();

    h.services.posts.delete_post(author, doomed).await.unwrap();
    let stale = PostEvent::creation(post.id, author, post.text, post.created_at);
    h.services.bus.publish(DomainEvent::Post(stale)).await;

    let marker = post_at(&h, author, "marker #gone").await;
    let search = &h.services.search;
    assert!(eventually(|| async { search.search("#gone").await.unwrap() == vec![marker] }).await);

    let entries = h.services.user_timeline.timeline(author).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].post_id, marker);
    h.stop().await;
}

#[tokio::test]
async fn likes_enter_and_leave_the_likers_timeline() {
    let h = Harness::start().await;
    let (author, fan) = (UserId::new(), h.user("fan").await);
    let post = post_at(&h, author, "likeable").await;
    let timelines = &h.services.user_timeline;

    h.tick();
    let liked_at = h.clock.now();
    h.services.social_graph.like(fan, post).await.unwrap();
    assert!(eventually(|| async { timelines.timeline(fan).await.unwrap().len() == 1 }).await);

    let entry = timelines.timeline(fan).await.unwrap()[0];
    assert_eq!(entry.post_id, post);
    assert_eq!(entry.origin, EntryOrigin::Liked);
    assert_eq!(entry.insert_date, liked_at);

    h.tick();
    h.services.social_graph.unlike(fan, post).await.unwrap();
    assert!(eventually(|| async { timelines.timeline(fan).await.unwrap().is_empty() }).await);
    h.stop().await;
}

#[tokio::test]
async fn deleting_a_post_clears_it_from_likers_timelines() {
    let h = Harness::start().await;
    let (author, fan) = (UserId::new(), h.user("fan").await);
    let post = post_at(&h, author, "short lived").await;
    let timelines = &h.services.user_timeline;

    h.services.social_graph.like(fan, post).await.unwrap();
    assert!(eventually(|| async { timelines.timeline(fan).await.unwrap().len() == 1 }).await);

    h.services.posts.delete_post(author, post).await.unwrap();
    assert!(eventually(|| async {
        timelines.timeline(fan).await.unwrap().is_empty()
            && timelines.timeline(author).await.unwrap().is_empty()
    })
    .await);
    h.stop().await;
}

/// Every ordering of CREATION, DELETION and a duplicate CREATION.
fn orderings(created: PostEvent, deleted: PostEvent) -> Vec<Vec<PostEvent>> {
    let (c, d) = (created, deleted);
    vec![
        vec![c.clone(), d.clone(), c.clone()],
        vec![c.clone(), c.clone(), d.clone()],
        vec![d.clone(), c.clone(), c.clone()],
    ]
}

#[tokio::test]
async fn projections_converge_whatever_the_delivery_order() {
    let (author, post) = (UserId::new(), PostId::new());
    let now = chrono::Utc::now();
    let created = PostEvent::creation(post, author, Some("race #cond".into()), now);
    let deleted = PostEvent::deletion(post, author, Some("race #cond".into()), now);

    for order in orderings(created, deleted) {
        let timelines = TimelineService::new(Arc::new(InMemoryTimelineStore::new()));
        let search = SearchService::new(Arc::new(InMemorySearchIndex::new()));

        for event in &order {
            timelines.apply_post(event).await.unwrap();
            search.apply(event).await.unwrap();
        }

        assert!(timelines.timeline(author).await.unwrap().is_empty());
        assert!(search.search("#cond").await.unwrap().is_empty());
    }
}
