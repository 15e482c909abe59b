//! # Social Graph Flows
//!
//! Relations between users, lazily created graph nodes, and the follow
//! events the graph emits on behalf of the home-timeline projector.

use super::harness::{eventually, Harness};
use shared_types::{BlockStatus, ErrorKind, PostId, UserId};
use sn_01_posts::{PostApi, PostDraft};
use sn_02_social_graph::SocialGraphApi;
use sn_05_home_timeline::HomeTimelineApi;

#[tokio::test]
async fn self_relations_are_forbidden() {
    let h = Harness::start().await;
    let x = h.user("x").await;
    let graph = &h.services.social_graph;

    assert_eq!(graph.follow(x, x).await.unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(graph.block(x, x).await.unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(graph.unfollow(x, x).await.unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(graph.unblock(x, x).await.unwrap_err().kind(), ErrorKind::Forbidden);
    h.stop().await;
}

#[tokio::test]
async fn like_materializes_posts_known_to_the_post_authority() {
    let h = Harness::start().await;
    let (author, fan) = (UserId::new(), h.user("fan").await);
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("likeable"))
        .await
        .unwrap();
    let graph = &h.services.social_graph;

    graph.like(fan, post).await.unwrap();
    graph.like(fan, post).await.unwrap();
    assert_eq!(graph.likers(post).await.unwrap(), vec![fan]);
    assert_eq!(graph.liked_posts(fan).await.unwrap(), vec![post]);

    let unknown = PostId::new();
    assert_eq!(graph.like(fan, unknown).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(graph.likers(unknown).await.unwrap_err().kind(), ErrorKind::NotFound);
    h.stop().await;
}

#[tokio::test]
async fn unknown_users_cannot_be_followed() {
    let h = Harness::start().await;
    let x = h.user("x").await;
    let err = h
        .services
        .social_graph
        .follow(x, UserId::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    h.stop().await;
}

#[tokio::test]
async fn follows_reach_the_home_timeline_projection() {
    let h = Harness::start().await;
    let (reader, a, b) = (h.user("reader").await, h.user("a").await, h.user("b").await);
    let graph = &h.services.social_graph;
    let home = &h.services.home_timeline;

    graph.follow(reader, a).await.unwrap();
    graph.follow(reader, b).await.unwrap();
    assert!(eventually(|| async { home.followees(reader).await.unwrap().len() == 2 }).await);

    graph.unfollow(reader, a).await.unwrap();
    assert!(eventually(|| async { home.followees(reader).await.unwrap() == vec![b] }).await);
    assert_eq!(graph.followers(b).await.unwrap(), vec![reader]);
    h.stop().await;
}

#[tokio::test]
async fn block_severs_follows_in_both_directions() {
    let h = Harness::start().await;
    let (x, y) = (h.user("x").await, h.user("y").await);
    let graph = &h.services.social_graph;
    let home = &h.services.home_timeline;

    graph.follow(x, y).await.unwrap();
    graph.follow(y, x).await.unwrap();
    assert!(eventually(|| async {
        home.followees(x).await.unwrap() == vec![y] && home.followees(y).await.unwrap() == vec![x]
    })
    .await);

    graph.block(y, x).await.unwrap();
    assert!(eventually(|| async {
        home.followees(x).await.unwrap().is_empty() && home.followees(y).await.unwrap().is_empty()
    })
    .await);

    assert_eq!(
        graph.block_status(x, y).await.unwrap(),
        BlockStatus::TargetBlocksActing
    );
    assert_eq!(graph.blocked_by(y).await.unwrap(), vec![x]);
    assert_eq!(graph.blockers_of(x).await.unwrap(), vec![y]);
    assert_eq!(graph.follow(x, y).await.unwrap_err().kind(), ErrorKind::Forbidden);
    h.stop().await;
}
