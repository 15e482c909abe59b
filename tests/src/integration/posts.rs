//! # Post Authority Flows
//!
//! Content rules and the block gate on the write path, and what the search
//! projector makes of the resulting events.

use super::harness::{eventually, Harness};
use shared_types::{ErrorKind, MediaRef, PostId, UserId};
use sn_01_posts::{PostApi, PostDraft};
use sn_02_social_graph::SocialGraphApi;
use sn_03_search::SearchApi;

#[tokio::test]
async fn content_rules_are_enforced_before_anything_is_stored() {
    let h = Harness::start().await;
    let author = UserId::new();
    let target = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("original"))
        .await
        .unwrap();

    let crowded = PostDraft::new(author)
        .text("t")
        .media(MediaRef::new("m1"))
        .repost_of(target);
    let err = h.services.posts.create_post(crowded).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    let empty = PostDraft::new(author);
    let err = h.services.posts.create_post(empty).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    let ok = PostDraft::new(author).text("t").media(MediaRef::new("m1"));
    assert!(h.services.posts.create_post(ok).await.is_ok());

    let long = PostDraft::new(author).text("x".repeat(161));
    let err = h.services.posts.create_post(long).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    assert_eq!(h.services.posts.posts_by_author(author).await.unwrap().len(), 2);
    h.stop().await;
}

#[tokio::test]
async fn block_gates_replies_until_unblocked() {
    let h = Harness::start().await;
    let x = UserId::new();
    let y = h.user("y").await;
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(x).text("mine"))
        .await
        .unwrap();

    h.services.social_graph.block(x, y).await.unwrap();
    let reply = || PostDraft::new(y).text("re").reply_to(post);

    let err = h.services.posts.create_post(reply()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    // The blocker is gated too.
    let theirs = h
        .services
        .posts
        .create_post(PostDraft::new(y).text("theirs"))
        .await
        .unwrap();
    let err = h
        .services
        .posts
        .create_post(PostDraft::new(x).text("rt").repost_of(theirs))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    h.services.social_graph.unblock(x, y).await.unwrap();
    let reply_id = h.services.posts.create_post(reply()).await.unwrap();
    assert_eq!(
        h.services
            .posts
            .replies_of(post)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect::<Vec<_>>(),
        vec![reply_id]
    );
    h.stop().await;
}

#[tokio::test]
async fn reply_to_missing_post_is_not_found() {
    let h = Harness::start().await;
    let err = h
        .services
        .posts
        .create_post(PostDraft::new(UserId::new()).text("re").reply_to(PostId::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    h.stop().await;
}

#[tokio::test]
async fn search_sees_created_posts_and_forgets_deleted_ones() {
    let h = Harness::start().await;
    let author = UserId::new();
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("hello #world #world foo"))
        .await
        .unwrap();

    let search = &h.services.search;
    assert!(eventually(|| async { search.search("#world").await.unwrap() == vec![post] }).await);
    assert_eq!(search.search("hello").await.unwrap(), vec![post]);
    assert_eq!(search.search("#WORLD hello").await.unwrap(), vec![post]);
    assert!(search.search("foo #doesnotexist").await.unwrap().is_empty());
    assert!(search.search("world").await.unwrap().is_empty());
    assert!(search.search("").await.unwrap().is_empty());

    h.services.posts.delete_post(author, post).await.unwrap();
    assert!(eventually(|| async { search.search("#world").await.unwrap().is_empty() }).await);
    h.stop().await;
}

#[tokio::test]
async fn only_the_author_may_delete() {
    let h = Harness::start().await;
    let author = UserId::new();
    let post = h
        .services
        .posts
        .create_post(PostDraft::new(author).text("keep"))
        .await
        .unwrap();

    let err = h
        .services
        .posts
        .delete_post(UserId::new(), post)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert!(h.services.posts.get_post(post).await.is_ok());
    h.stop().await;
}
