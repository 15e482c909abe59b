//! Service layer for the home-timeline projector.

mod home_service;

pub use home_service::HomeTimelineService;
