//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`PostApi`], consumed by the runtime and
//!   by other services' adapters
//! - **Driven Ports (Outbound)**: stores, guard, publisher, clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
