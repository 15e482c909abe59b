//! # Domain Layer

pub mod timeline;

pub use timeline::{merge, EntryOrigin, TimelineEntry};
