//! # Stage Runtime
//!
//! Composition root for the Stagehand scene management system.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from environment
//! 2. Initialize logging (`tracing-subscriber` with env filter)
//! 3. Build the event bus, scene manager, and handoff component
//! 4. Load the bootstrap scene (the "lobby" the handoff will retire)
//! 5. Start the event pump (bus → handoff)
//! 6. Spawn the handoff and run until the handoff completes
//!
//! ## Event Flow
//!
//! ```text
//! handoff.spawn() ──additive load──→ SceneManagerService
//!                                          │ publish
//!                                          ↓
//!                                   InMemorySceneBus
//!                                          │ pump task
//!                                          ↓
//!                                  handoff.handle_event() ──unload previous──→ manager
//! ```

pub mod config;
pub mod telemetry;
pub mod wiring;

pub use config::RuntimeConfig;
pub use telemetry::init_logging;
pub use wiring::{StageRuntime, SceneManager};
