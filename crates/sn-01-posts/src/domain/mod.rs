//! # Domain Layer
//!
//! Post entities and content validation. No I/O.

pub mod post;
pub mod rules;
pub mod user;

pub use post::{Post, PostDraft};
pub use rules::{ContentRules, DEFAULT_MAX_TEXT_CHARS};
pub use user::User;
