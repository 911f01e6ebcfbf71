//! # Stage Bus - Scene Event Bus
//!
//! Carries scene lifecycle notifications from the scene manager to every
//! interested subscriber. Subsystems never call each other directly about
//! scene state; they observe the bus.
//!
//! ```text
//! ┌───────────────┐                      ┌────────────────┐
//! │ Scene Manager │                      │ Scene Handoff  │
//! │               │     publish()        │                │
//! │               │ ───────┐             │                │
//! └───────────────┘        │             └────────────────┘
//!                          ▼                     ↑
//!                    ┌───────────┐               │
//!                    │ Event Bus │ ──────────────┘
//!                    │           │   subscribe()
//!                    └───────────┘
//! ```
//!
//! Delivery uses `tokio::sync::broadcast`: every subscriber sees every event
//! published after it subscribed, filtered client-side by [`EventFilter`].

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, SceneEvent};
pub use publisher::{InMemorySceneBus, ScenePublisher};
pub use subscriber::{SceneEventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
