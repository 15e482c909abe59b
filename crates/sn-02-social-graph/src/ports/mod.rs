//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`SocialGraphApi`]
//! - **Driven Ports (Outbound)**: graph store, entity directory, guard,
//!   publisher, clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
