//! Service layer for the post authority.

mod post_service;

pub use post_service::PostService;
