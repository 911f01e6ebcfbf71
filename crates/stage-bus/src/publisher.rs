//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EventFilter, SceneEvent};
use crate::subscriber::{SceneEventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for publishing scene events to the bus.
///
/// The scene manager is the only publisher in a well-formed deployment, but
/// tests drive this trait directly to inject synthetic events.
#[async_trait]
pub trait ScenePublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    async fn publish(&self, event: SceneEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the scene event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Suitable for single-node operation; a replicated deployment
/// would put the network scene-replication protocol behind this trait.
pub struct InMemorySceneBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<SceneEvent>,

    /// Active subscription count by topic.
    subscriptions: Arc<RwLock<HashMap<String, usize>>>,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemorySceneBus {
    /// Create a new in-memory bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory bus with specified capacity.
    ///
    /// The broadcast channel requires a capacity of at least one, so zero is
    /// raised to one rather than panicking on misconfiguration.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    ///
    /// Returns a `Subscription` handle that can be used to receive events.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        let topic_key = format!("{:?}", filter.topics);

        // Track subscription
        {
            if let Ok(mut subs) = self.subscriptions.write() {
                *subs.entry(topic_key.clone()).or_insert(0) += 1;
            }
        }

        debug!(topics = ?filter.topics, "New subscription created");

        Subscription::new(receiver, filter, self.subscriptions.clone(), topic_key)
    }

    /// Get a stream of events matching a filter.
    ///
    /// This is a convenience method that returns a `SceneEventStream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> SceneEventStream {
        SceneEventStream::new(self.subscribe(filter))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publish an event synchronously.
    ///
    /// `broadcast::Sender::send` never blocks, so publishers that live on a
    /// synchronous call path (the scene manager's request handling) use this
    /// directly; [`ScenePublisher::publish`] delegates here.
    pub fn publish_now(&self, event: SceneEvent) -> usize {
        let topic = event.topic();
        let client = event.client_id;

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    client = %client,
                    receivers = receiver_count,
                    "Scene event published"
                );
                receiver_count
            }
            Err(e) => {
                // No receivers - event is dropped
                warn!(
                    topic = ?topic,
                    client = %client,
                    error = %e,
                    "Scene event dropped (no receivers)"
                );
                0
            }
        }
    }
}

impl Default for InMemorySceneBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScenePublisher for InMemorySceneBus {
    async fn publish(&self, event: SceneEvent) -> usize {
        self.publish_now(event)
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
