//! # Event Subscriber
//!
//! Subscription handles and the stream wrapper for receiving scene events.

use crate::events::{EventFilter, SceneEvent};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, RwLock};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving scene events.
///
/// Filtering happens on the receiving side: the subscription sees every
/// broadcast event and silently discards the ones its [`EventFilter`]
/// rejects. Dropping the handle deregisters it from the bus.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<SceneEvent>,

    /// Filter for this subscription.
    filter: EventFilter,

    /// Reference to subscription tracking (for cleanup).
    subscriptions: Arc<RwLock<HashMap<String, usize>>>,

    /// Topic key for this subscription.
    topic_key: String,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(
        receiver: broadcast::Receiver<SceneEvent>,
        filter: EventFilter,
        subscriptions: Arc<RwLock<HashMap<String, usize>>>,
        topic_key: String,
    ) -> Self {
        Self {
            receiver,
            filter,
            subscriptions,
            topic_key,
        }
    }

    /// Await the next event matching the filter.
    ///
    /// A slow subscriber that fell behind the channel capacity skips the
    /// missed events (broadcast semantics) and resumes at the oldest event
    /// still buffered; the skip is logged at `debug`.
    ///
    /// Returns `None` once the bus has been dropped and the buffer drained.
    pub async fn recv(&mut self) -> Option<SceneEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
            // Filtered out; keep waiting.
        }
    }

    /// Non-blocking variant of [`Subscription::recv`].
    ///
    /// `Ok(None)` means no matching event is currently buffered;
    /// [`SubscriptionError::Closed`] means the bus is gone.
    pub fn try_recv(&mut self) -> Result<Option<SceneEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
            // Filtered out; keep draining.
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Deregister from the per-topic bookkeeping.
        let Ok(mut subs) = self.subscriptions.write() else {
            return;
        };
        let Some(count) = subs.get_mut(&self.topic_key) else {
            debug!(topic = %self.topic_key, "Subscription dropped");
            return;
        };

        *count = count.saturating_sub(1);
        if *count == 0 {
            subs.remove(&self.topic_key);
        }
        debug!(topic = %self.topic_key, "Subscription dropped");
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct SceneEventStream {
    subscription: Subscription,
}

impl SceneEventStream {
    /// Create a new event stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        self.subscription.filter()
    }
}

impl Stream for SceneEventStream {
    type Item = SceneEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Use try_recv for non-blocking check
        match self.subscription.try_recv() {
            Ok(Some(event)) => Poll::Ready(Some(event)),
            Ok(None) => {
                // No event ready, need to wait
                // Register waker and return pending
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(SubscriptionError::Closed) => Poll::Ready(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use crate::publisher::InMemorySceneBus;
    use crate::ScenePublisher;
    use stage_types::{ClientId, LoadMode, SceneEventType, SceneHandle, SceneName};
    use std::time::Duration;
    use tokio::time::timeout;

    fn name(s: &str) -> SceneName {
        SceneName::new(s).unwrap()
    }

    fn scene_event(event_type: SceneEventType, client: ClientId, scene: &str) -> SceneEvent {
        SceneEvent {
            event_type,
            client_id: client,
            scene_name: name(scene),
            handle: SceneHandle::issue(1),
            mode: LoadMode::Additive,
        }
    }

    fn completion(scene: &str) -> SceneEvent {
        scene_event(SceneEventType::LoadComplete, ClientId::SERVER, scene)
    }

    async fn next(sub: &mut Subscription) -> SceneEvent {
        timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("recv timed out")
            .expect("bus closed")
    }

    #[tokio::test]
    async fn test_recv_delivers_published_event() {
        let bus = InMemorySceneBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        bus.publish(completion("Harbor")).await;

        let received = next(&mut sub).await;
        assert_eq!(received.event_type, SceneEventType::LoadComplete);
        assert_eq!(received.scene_name, name("Harbor"));
    }

    #[tokio::test]
    async fn test_client_filter_discards_other_clients() {
        let bus = InMemorySceneBus::new();
        let mut sub = bus.subscribe(EventFilter::from_clients(vec![ClientId::SERVER]));

        // A follower's completion arrives first but must be discarded; the
        // server's is what the subscription yields.
        bus.publish(scene_event(
            SceneEventType::LoadComplete,
            ClientId(9),
            "Harbor",
        ))
        .await;
        bus.publish(completion("Harbor")).await;

        let received = next(&mut sub).await;
        assert_eq!(received.client_id, ClientId::SERVER);
        assert!(matches!(sub.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_topic_and_client_filters_combine() {
        let bus = InMemorySceneBus::new();
        let mut sub = bus.subscribe(EventFilter {
            topics: vec![EventTopic::Unloading],
            clients: vec![ClientId::SERVER],
        });

        // Right topic, wrong client.
        bus.publish(scene_event(
            SceneEventType::UnloadComplete,
            ClientId(3),
            "Lobby",
        ))
        .await;
        // Right client, wrong topic.
        bus.publish(completion("Harbor")).await;
        // Both match.
        bus.publish(scene_event(
            SceneEventType::Unload,
            ClientId::SERVER,
            "Lobby",
        ))
        .await;

        let received = next(&mut sub).await;
        assert_eq!(received.event_type, SceneEventType::Unload);
        assert_eq!(received.scene_name, name("Lobby"));
    }

    #[tokio::test]
    async fn test_lagged_subscriber_resumes_at_oldest_buffered() {
        let bus = InMemorySceneBus::with_capacity(2);
        let mut sub = bus.subscribe(EventFilter::all());

        for i in 0..6 {
            bus.publish(completion(&format!("Zone{i}"))).await;
        }

        // Capacity 2: four events were missed. The subscription skips the
        // lag and resumes at the oldest event still buffered.
        assert_eq!(next(&mut sub).await.scene_name, name("Zone4"));
        assert_eq!(next(&mut sub).await.scene_name, name("Zone5"));
        assert!(matches!(sub.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_try_recv_skips_lag_too() {
        let bus = InMemorySceneBus::with_capacity(2);
        let mut sub = bus.subscribe(EventFilter::all());

        for i in 0..4 {
            bus.publish(completion(&format!("Zone{i}"))).await;
        }

        let received = sub.try_recv().expect("bus open").expect("event buffered");
        assert_eq!(received.scene_name, name("Zone2"));
    }

    #[tokio::test]
    async fn test_recv_ends_when_bus_is_dropped() {
        let bus = InMemorySceneBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        bus.publish(completion("Harbor")).await;
        drop(bus);

        // Buffered events drain first, then the channel reports closed.
        assert!(sub.recv().await.is_some());
        assert!(sub.recv().await.is_none());
        assert_eq!(sub.try_recv(), Err(SubscriptionError::Closed));
    }

    #[tokio::test]
    async fn test_try_recv_with_no_traffic() {
        let bus = InMemorySceneBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        assert!(matches!(sub.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_dropped_subscriptions_release_receivers() {
        let bus = InMemorySceneBus::new();

        {
            let _load_sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Loading]));
            let _server_sub = bus.subscribe(EventFilter::from_clients(vec![ClientId::SERVER]));
            assert_eq!(bus.subscriber_count(), 2);
        }

        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_stream_exposes_filter() {
        let bus = InMemorySceneBus::new();
        let stream = bus.event_stream(EventFilter::from_clients(vec![ClientId::SERVER]));

        assert!(stream.filter().topics.is_empty());
        assert_eq!(stream.filter().clients, vec![ClientId::SERVER]);
    }
}
