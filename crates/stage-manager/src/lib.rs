//! # Scene Manager Subsystem
//!
//! The authoritative side of scene management: owns the catalog of loadable
//! scenes, the registry of currently loaded scene instances, the pre-load
//! verification hook, and the publication of scene lifecycle events.
//!
//! ## Architecture Role
//!
//! ```text
//! [Scene Handoff] ──load/unload request──→ [Scene Manager]
//!                                               │
//!                                               ↓ lifecycle events
//!                                          [Stage Bus] ──→ subscribers
//! ```
//!
//! This implementation is single-node: per-client completion events are
//! synthesized for the server and every registered client. A replicated
//! deployment would drive the same [`SceneManagerApi`] contract from the
//! network scene-replication protocol instead.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{LoadedScene, ManagerConfig, SceneRegistry};
pub use ports::inbound::{SceneManagerApi, VerifySceneFn};
pub use ports::outbound::SceneEventSink;
pub use service::SceneManagerService;
