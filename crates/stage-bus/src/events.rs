//! # Scene Events
//!
//! The notification the scene manager publishes on every lifecycle
//! transition, plus the topic/filter machinery subscribers use to narrow
//! what they receive.

use serde::{Deserialize, Serialize};
use stage_types::{ClientId, LoadMode, SceneEventType, SceneHandle, SceneName};

/// A scene lifecycle notification.
///
/// Mirrors the host contract from the engine side: event type, originating
/// client, scene name, the handle the event concerns, and the load mode the
/// originating request used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEvent {
    /// Which lifecycle transition occurred.
    pub event_type: SceneEventType,
    /// The participant this event originated from. Per-client completions
    /// carry the finishing client; begin events carry the server.
    pub client_id: ClientId,
    /// The scene the event concerns.
    pub scene_name: SceneName,
    /// Handle of the scene instance. `INVALID` for events that fire before
    /// a handle exists (a rejected or not-yet-committed load).
    pub handle: SceneHandle,
    /// Load mode of the originating request.
    pub mode: LoadMode,
}

impl SceneEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self.event_type {
            SceneEventType::Load
            | SceneEventType::LoadComplete
            | SceneEventType::LoadEventCompleted => EventTopic::Loading,
            SceneEventType::Unload
            | SceneEventType::UnloadComplete
            | SceneEventType::UnloadEventCompleted => EventTopic::Unloading,
            SceneEventType::Synchronize | SceneEventType::SynchronizeComplete => {
                EventTopic::Synchronization
            }
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Load begin/complete events.
    Loading,
    /// Unload begin/complete events.
    Unloading,
    /// Late-join synchronization events.
    Synchronization,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Originating clients to include. Empty means all clients.
    pub clients: Vec<ClientId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            clients: Vec::new(),
        }
    }

    /// Create a filter for events originating from specific clients.
    #[must_use]
    pub fn from_clients(clients: Vec<ClientId>) -> Self {
        Self {
            topics: Vec::new(),
            clients,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SceneEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let client_match = self.clients.is_empty() || self.clients.contains(&event.client_id);

        topic_match && client_match
    }
}
