//! # Scene Handoff Component
//!
//! Event-driven adapter over the scene manager: on spawn it requests an
//! additive load of its target scene, and once the authoritative host
//! reports the load complete it unloads the scene that was active before
//! the handoff, exactly once.
//!
//! ## Architecture Role
//!
//! ```text
//! spawn() ──additive load──→ [Scene Manager]
//!                                  │
//!                                  ↓ LoadComplete (server, target)
//!                            [Stage Bus] ──→ handle_event()
//!                                                  │
//!                                                  └─unload previous──→ [Scene Manager]
//! ```
//!
//! The component holds almost no state: the previous scene's handle, the
//! loaded scene's handle, and a spawned flag. Failure handling is
//! observational only; any non-`started` request status is logged as a
//! warning and callers poll [`SceneHandoff::is_scene_loaded`].

pub mod config;
pub mod service;

pub use config::{Authority, HandoffConfig};
pub use service::{verify_additive_only, SceneHandoff};
