//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`HomeTimelineApi`]
//! - **Driven Ports (Outbound)**: [`FolloweeStore`], [`UserTimelineQuery`]

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
