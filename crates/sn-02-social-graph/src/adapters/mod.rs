//! Adapters layer for the social graph authority.

pub mod guard;
pub mod memory;

pub use guard::GraphBlockGuard;
pub use memory::InMemoryGraphStore;
