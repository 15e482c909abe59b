//! # Posts
//!
//! A post carries up to two of three kinds of content (text, media, a repost
//! target) and may additionally reply to another post.

use crate::domain::rules::ContentRules;
use crate::error::PostError;
use serde::{Deserialize, Serialize};
use shared_types::{MediaRef, PostId, Timestamp, UserId};

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub text: Option<String>,
    pub media: Option<MediaRef>,
    pub reply_to: Option<PostId>,
    pub repost_of: Option<PostId>,
    pub created_at: Timestamp,
}

impl Post {
    /// Posts this one points at, reply target first.
    pub fn referenced_posts(&self) -> impl Iterator<Item = PostId> + '_ {
        self.reply_to.iter().chain(self.repost_of.iter()).copied()
    }
}

/// A request to create a post, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub author_id: UserId,
    pub text: Option<String>,
    pub media: Option<MediaRef>,
    pub reply_to: Option<PostId>,
    pub repost_of: Option<PostId>,
}

impl PostDraft {
    pub fn new(author_id: UserId) -> Self {
        Self {
            author_id,
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn media(mut self, media: MediaRef) -> Self {
        self.media = Some(media);
        self
    }

    pub fn reply_to(mut self, post: PostId) -> Self {
        self.reply_to = Some(post);
        self
    }

    pub fn repost_of(mut self, post: PostId) -> Self {
        self.repost_of = Some(post);
        self
    }

    /// How many of {text, media, repost} are present. Replies don't count.
    #[must_use]
    pub fn content_kinds(&self) -> usize {
        [
            self.text.is_some(),
            self.media.is_some(),
            self.repost_of.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Check content-count and length rules. Runs before any lookup.
    pub fn validate(&self, rules: &ContentRules) -> Result<(), PostError> {
        match self.content_kinds() {
            0 => return Err(PostError::EmptyContent),
            n if n > rules.max_content_kinds => return Err(PostError::TooMuchContent),
            _ => {}
        }

        if let Some(text) = &self.text {
            let len = text.chars().count();
            if len > rules.max_text_chars {
                return Err(PostError::TextTooLong {
                    len,
                    max: rules.max_text_chars,
                });
            }
        }

        Ok(())
    }

    /// Turn a validated draft into a post.
    pub fn into_post(self, id: PostId, created_at: Timestamp) -> Post {
        Post {
            id,
            author_id: self.author_id,
            text: self.text,
            media: self.media,
            reply_to: self.reply_to,
            repost_of: self.repost_of,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rules() -> ContentRules {
        ContentRules::default()
    }

    #[test]
    fn test_text_media_and_repost_is_rejected() {
        let draft = PostDraft::new(UserId::new())
            .text("hi")
            .media(MediaRef::new("m1"))
            .repost_of(PostId::new());
        assert!(matches!(draft.validate(&rules()), Err(PostError::TooMuchContent)));
    }

    #[test]
    fn test_empty_draft_is_rejected() {
        let draft = PostDraft::new(UserId::new());
        assert!(matches!(draft.validate(&rules()), Err(PostError::EmptyContent)));

        // A reply target alone is not content.
        let reply_only = PostDraft::new(UserId::new()).reply_to(PostId::new());
        assert!(matches!(reply_only.validate(&rules()), Err(PostError::EmptyContent)));
    }

    #[test]
    fn test_text_and_media_is_accepted() {
        let draft = PostDraft::new(UserId::new())
            .text("look")
            .media(MediaRef::new("m1"));
        assert!(draft.validate(&rules()).is_ok());
    }

    #[test]
    fn test_text_length_counts_characters() {
        let at_limit = PostDraft::new(UserId::new()).text("é".repeat(160));
        assert!(at_limit.validate(&rules()).is_ok());

        let over = PostDraft::new(UserId::new()).text("a".repeat(161));
        assert!(matches!(
            over.validate(&rules()),
            Err(PostError::TextTooLong { len: 161, max: 160 })
        ));
    }

    #[test]
    fn test_referenced_posts_order() {
        let reply = PostId::new();
        let repost = PostId::new();
        let post = PostDraft::new(UserId::new())
            .reply_to(reply)
            .repost_of(repost)
            .into_post(PostId::new(), chrono::Utc::now());
        assert_eq!(post.referenced_posts().collect::<Vec<_>>(), vec![reply, repost]);
    }

    proptest! {
        #[test]
        fn prop_valid_iff_one_or_two_kinds(text in any::<bool>(), media in any::<bool>(), repost in any::<bool>()) {
            let mut draft = PostDraft::new(UserId::new());
            if text { draft = draft.text("x"); }
            if media { draft = draft.media(MediaRef::new("m")); }
            if repost { draft = draft.repost_of(PostId::new()); }

            let kinds = [text, media, repost].iter().filter(|b| **b).count();
            prop_assert_eq!(draft.validate(&rules()).is_ok(), (1..=2).contains(&kinds));
        }
    }
}
