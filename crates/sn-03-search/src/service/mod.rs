//! Service layer for the search projector.

mod search_service;

pub use search_service::SearchService;
