//! # Post Authority (sn-01)
//!
//! Source of truth for posts and for the directory of users who have posted.
//! Every successful create or delete is followed by a `PostEvent` on the
//! `post_events` channel.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `Post`, `PostDraft`, content rules
//! - **Ports Layer** (`ports/`): `PostApi` inbound; stores, guard, publisher outbound
//! - **Service Layer** (`service/`): `PostService` implements `PostApi`
//! - **Adapters Layer** (`adapters/`): in-memory stores
//!
//! ## Content Rules
//!
//! - At least one and at most two of {text, media, repost target}
//! - Text at most 160 characters
//! - Reply and repost targets must exist
//! - Replying to or reposting a user who blocks you (or whom you block) is forbidden
//!
//! ## Event Emission
//!
//! The store is written first and the event published afterwards. A lost
//! event is never rolled back against the committed write.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryPostStore, InMemoryUserStore};
pub use domain::{ContentRules, Post, PostDraft, User, DEFAULT_MAX_TEXT_CHARS};
pub use error::PostError;
pub use ports::{PostApi, PostStore, StoreError, UserStore};
pub use service::PostService;
