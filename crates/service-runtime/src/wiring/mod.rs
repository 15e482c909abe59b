//! # Service Wiring
//!
//! Connects the projectors to the bus and, optionally, keeps them honest
//! against authority snapshots.
//!
//! ```text
//!                 post_events        queue-likes-events      follow_events
//!  Post Authority ─────┬─────▶ Search Projector
//!                      └─────▶ User-Timeline ◀───── Social Graph ─────▶ Home-Timeline
//! ```

pub mod reconciliation;
pub mod subscriptions;

pub use reconciliation::{ReconcileError, ReconcileReport, Reconciler};
pub use subscriptions::Subscriptions;
