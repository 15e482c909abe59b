//! # Shared Bus - Event Bus Between Murmur Services
//!
//! Authorities publish domain events; projectors subscribe and apply them to
//! their own stores.
//!
//! ```text
//! ┌──────────────┐    publish()     ┌──────────────┐   subscribe()   ┌──────────────┐
//! │  Authority   │ ───────────────▶ │  Event Bus   │ ──────────────▶ │  Projector   │
//! │ (posts/graph)│                  │  (channels)  │                 │ (search/...) │
//! └──────────────┘                  └──────────────┘                 └──────────────┘
//! ```
//!
//! ## Delivery Contract
//!
//! - **Fire-and-forget:** no acknowledgement, retry or replay
//! - **Non-durable:** with no live subscriber a message is lost
//! - **Ordered per channel:** each subscriber sees one publisher's messages in
//!   send order, possibly with gaps when it lags
//! - **Off-thread handlers:** failures are logged, never reported upstream

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod codec;
pub mod delivery;
pub mod dispatcher;
pub mod events;
pub mod publisher;
pub mod subscriber;

pub use codec::CodecError;
pub use delivery::DeliveryPolicy;
pub use dispatcher::{spawn_handler, DispatchMode, EventHandler, HandlerError, SubscriptionHandle};
pub use events::{DomainEvent, EventFilter, EventTopic};
pub use publisher::{BusMessage, EventPublisher, InMemoryEventBus, RecordingPublisher};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum messages buffered per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}
