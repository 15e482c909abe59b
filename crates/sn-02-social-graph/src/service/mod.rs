//! Service layer for the social graph authority.

mod graph_service;
mod materializer;

pub use graph_service::GraphService;
pub use materializer::Materializer;
