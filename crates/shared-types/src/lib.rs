//! # Shared Types Crate
//!
//! Identifiers, wire payloads and cross-service contracts used by every
//! Murmur service.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: everything that crosses a service boundary
//!   (event payloads, id types, error kinds) is defined here.
//! - **Self-describing events**: payloads carry enough data for a projector to
//!   update its view without calling back into the authority that emitted them.
//! - **One guard contract**: the block check is expressed once, as
//!   [`BlockGuard`], whatever store ends up answering it.

pub mod clock;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod payloads;
pub mod resync;
pub mod tombstones;

pub use clock::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use entities::*;
pub use errors::*;
pub use guard::{BlockGuard, BlockStatus, GuardError};
pub use payloads::*;
pub use resync::ResyncReport;
pub use tombstones::TombstoneLog;
