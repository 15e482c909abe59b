//! Adapters layer for the post authority.

pub mod memory;

pub use memory::{InMemoryPostStore, InMemoryUserStore};
