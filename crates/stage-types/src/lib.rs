//! # Stage Types
//!
//! Shared domain entities for the Stagehand scene management system.
//! This is the single source of truth for type definitions used by the
//! scene manager, the event bus, and the handoff component.
//!
//! ## Clusters
//!
//! - **Identity**: `SceneName`, `SceneHandle`, `ClientId`
//! - **Requests**: `LoadMode`, `LoadStatus`
//! - **Events**: `SceneEventType`
//! - **Errors**: `SceneError`

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod entities;
pub mod errors;
pub mod status;

pub use entities::{ClientId, LoadMode, SceneEventType, SceneHandle, SceneName};
pub use errors::SceneError;
pub use status::LoadStatus;
