//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::codec::{self, CodecError};
use crate::delivery::DeliveryPolicy;
use crate::events::{DomainEvent, EventFilter, EventTopic};
use crate::subscriber::{EventStream, EventSubscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use sn_telemetry::{EVENTS_DROPPED, EVENTS_PUBLISHED};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

/// An encoded message in transit on one channel.
#[derive(Debug, Clone)]
pub struct BusMessage {
    pub topic: EventTopic,
    pub body: Arc<str>,
}

/// Trait for publishing events to the bus.
///
/// Publishing is fire-and-forget: the returned count is informational and a
/// zero never signals an error to the caller.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event on its channel.
    ///
    /// # Returns
    ///
    /// The number of subscribers the message was handed to.
    async fn publish(&self, event: DomainEvent) -> usize;

    /// Total number of publish attempts.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
/// Nothing is persisted: a message published while nobody listens is gone,
/// and a subscriber that falls more than `capacity` messages behind skips
/// the overflow.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<BusMessage>,

    /// Active subscription count by filter key.
    subscriptions: Arc<RwLock<HashMap<String, usize>>>,

    policy: DeliveryPolicy,

    events_published: AtomicU64,

    events_dropped: AtomicU64,

    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_policy(capacity, DeliveryPolicy::Reliable)
    }

    /// Create a bus that loses messages according to `policy`.
    #[must_use]
    pub fn with_policy(capacity: usize, policy: DeliveryPolicy) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            policy,
            events_published: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            capacity,
        }
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Messages lost to the delivery policy or to an empty channel.
    #[must_use]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    /// Publish an already-encoded body on a channel given by its wire name.
    ///
    /// Bodies are validated against the channel's payload type first so a
    /// malformed message never reaches a subscriber.
    pub fn publish_raw(&self, channel: &str, body: &str) -> Result<usize, CodecError> {
        let event = codec::decode_named(channel, body)?;
        Ok(self.send(event.topic(), Arc::from(body)))
    }

    fn send(&self, topic: EventTopic, body: Arc<str>) -> usize {
        let seq = self.events_published.fetch_add(1, Ordering::Relaxed) + 1;
        EVENTS_PUBLISHED.with_label_values(&[topic.label()]).inc();

        if self.policy.should_drop(seq) {
            self.events_dropped.fetch_add(1, Ordering::Relaxed);
            EVENTS_DROPPED
                .with_label_values(&[topic.label(), "delivery_policy"])
                .inc();
            debug!(channel = topic.label(), seq, policy = ?self.policy, "Event dropped by delivery policy");
            return 0;
        }

        match self.sender.send(BusMessage { topic, body }) {
            Ok(receiver_count) => {
                debug!(channel = topic.label(), receivers = receiver_count, "Event published");
                receiver_count
            }
            Err(_) => {
                self.events_dropped.fetch_add(1, Ordering::Relaxed);
                EVENTS_DROPPED
                    .with_label_values(&[topic.label(), "no_subscribers"])
                    .inc();
                warn!(channel = topic.label(), "Event dropped (no receivers)");
                0
            }
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        let topic_key = format!("{:?}", filter.topics);

        if let Ok(mut subs) = self.subscriptions.write() {
            *subs.entry(topic_key.clone()).or_insert(0) += 1;
        }

        debug!(topics = ?filter.topics, "New subscription created");

        Subscription::new(receiver, filter, self.subscriptions.clone(), topic_key)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: DomainEvent) -> usize {
        let topic = event.topic();
        match codec::encode(&event) {
            Ok(body) => self.send(topic, Arc::from(body)),
            Err(e) => {
                error!(channel = topic.label(), error = %e, "Failed to encode event");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

/// Publisher that keeps every event in memory instead of delivering it.
///
/// Used as a stand-in bus when exercising an authority on its own.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: DomainEvent) -> usize {
        self.events.lock().push(event);
        1
    }

    fn events_published(&self) -> u64 {
        self.events.lock().len() as u64
    }
}
