//! Adapters layer for the home-timeline projector.

pub mod bus;
pub mod memory;

pub use bus::HomeTimelineEventHandler;
pub use memory::InMemoryFolloweeStore;
