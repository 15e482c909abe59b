//! # User-Timeline Projector (sn-04)
//!
//! Maintains, per user, the posts they authored or liked, fed by
//! `post_events` and `queue-likes-events`. Answers the multi-user merge the
//! home timeline is built from.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryTimelineStore, UserTimelineEventHandler};
pub use domain::{merge, EntryOrigin, TimelineEntry};
pub use error::TimelineError;
pub use ports::{StoreError, TimelineStore, UserTimelineApi};
pub use service::TimelineService;
