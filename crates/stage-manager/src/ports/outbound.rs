//! Outbound port (SPI) for the scene manager subsystem.

use stage_bus::{InMemorySceneBus, SceneEvent};

/// Sink for scene lifecycle events.
///
/// The manager emits events on its own (synchronous) request path, so the
/// sink contract is synchronous; `broadcast` sends never block.
pub trait SceneEventSink: Send + Sync {
    /// Emit an event. Returns the number of receivers it reached.
    fn emit(&self, event: SceneEvent) -> usize;
}

impl SceneEventSink for InMemorySceneBus {
    fn emit(&self, event: SceneEvent) -> usize {
        self.publish_now(event)
    }
}
