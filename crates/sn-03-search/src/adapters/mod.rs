//! Adapters layer for the search projector.

pub mod bus;
pub mod memory;

pub use bus::SearchEventHandler;
pub use memory::InMemorySearchIndex;
