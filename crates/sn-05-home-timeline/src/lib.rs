//! # Home-Timeline Projector (sn-05)
//!
//! Keeps each user's followee set from `queue-follow-events` and builds the
//! home timeline on read by asking the user-timeline projector for the
//! merged timelines of those followees.
//!
//! Follow events carry no timestamp. Out-of-order FOLLOW/UNFOLLOW for the
//! same pair settle on whichever was applied last.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{HomeTimelineEventHandler, InMemoryFolloweeStore};
pub use error::HomeTimelineError;
pub use ports::{FolloweeStore, HomeTimelineApi, StoreError, UserTimelineQuery};
pub use service::HomeTimelineService;
