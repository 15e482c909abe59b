//! Adapters layer for the user-timeline projector.

pub mod bus;
pub mod memory;

pub use bus::UserTimelineEventHandler;
pub use memory::InMemoryTimelineStore;
