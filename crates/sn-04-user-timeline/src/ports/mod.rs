//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`UserTimelineApi`]
//! - **Driven Ports (Outbound)**: [`TimelineStore`]

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
