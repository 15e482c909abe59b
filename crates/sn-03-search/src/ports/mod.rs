//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`SearchApi`]
//! - **Driven Ports (Outbound)**: [`SearchIndex`]

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
