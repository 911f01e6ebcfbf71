//! Handoff configuration and authority.

use stage_types::SceneName;

/// Which role this participant plays in the session.
///
/// Only the authoritative host decides scene-state changes; clients follow
/// whatever the replication layer tells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// The authoritative host.
    Server,
    /// A follower client.
    Client,
}

impl Authority {
    /// True iff this participant may issue scene requests.
    #[must_use]
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server)
    }
}

/// Configuration for the scene handoff component.
#[derive(Debug, Clone, Default)]
pub struct HandoffConfig {
    /// The scene to load additively on spawn. `None` disables the handoff
    /// (the component spawns but never issues a request).
    pub target_scene: Option<SceneName>,
}

impl HandoffConfig {
    /// Build a config targeting the given scene.
    #[must_use]
    pub fn targeting(scene: SceneName) -> Self {
        Self {
            target_scene: Some(scene),
        }
    }
}
