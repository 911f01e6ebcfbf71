//! # Request Progress Statuses
//!
//! Load and unload requests report a progress status rather than an error:
//! a non-`Started` status is an observational outcome the caller logs, not a
//! fault to propagate. Registry-internal faults use [`crate::SceneError`].

use serde::{Deserialize, Serialize};

/// Outcome of submitting a scene load or unload request to the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    /// The request was accepted and the scene event has begun.
    Started,
    /// Another scene event is still in flight; only one may run at a time.
    EventInProgress,
    /// The requested name is not in the scene catalog.
    InvalidSceneName,
    /// The pre-load verification hook rejected the request.
    FailedVerification,
    /// The handle does not refer to a currently loaded scene.
    SceneNotLoaded,
    /// The caller is not the authoritative host.
    ServerOnlyAction,
    /// Scene management is disabled in the manager configuration.
    SceneManagementDisabled,
}

impl LoadStatus {
    /// True iff the request was accepted.
    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Started => "started",
            Self::EventInProgress => "event-in-progress",
            Self::InvalidSceneName => "invalid-scene-name",
            Self::FailedVerification => "failed-verification",
            Self::SceneNotLoaded => "scene-not-loaded",
            Self::ServerOnlyAction => "server-only-action",
            Self::SceneManagementDisabled => "scene-management-disabled",
        };
        f.write_str(s)
    }
}
