//! Service layer for the user-timeline projector.

mod timeline_service;

pub use timeline_service::TimelineService;
