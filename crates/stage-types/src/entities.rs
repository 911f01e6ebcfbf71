//! # Scene Domain Entities
//!
//! Identity and request primitives shared across subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `SceneName`, `SceneHandle`, `ClientId`
//! - **Requests**: `LoadMode`
//! - **Events**: `SceneEventType`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// The name of a scene as registered in the scene catalog.
///
/// Names never include a file extension; they are catalog keys, not paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneName(String);

impl SceneName {
    /// Create a scene name. Returns `None` for empty or whitespace-only input.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    /// The raw catalog key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SceneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a loaded scene, issued by the scene manager.
///
/// A handle stays valid for exactly one load; unloading and reloading the
/// same scene name issues a fresh handle with a new token, so stale handles
/// held by components can never alias the new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneHandle {
    /// Monotonically increasing load index (0 is reserved for INVALID).
    index: u64,
    /// Per-load token distinguishing reloads of the same index slot.
    token: Uuid,
}

impl SceneHandle {
    /// The sentinel handle that never refers to a loaded scene.
    pub const INVALID: Self = Self {
        index: 0,
        token: Uuid::nil(),
    };

    /// Issue a new handle for the given load index.
    #[must_use]
    pub fn issue(index: u64) -> Self {
        Self {
            index,
            token: Uuid::new_v4(),
        }
    }

    /// True for every handle issued by the manager; false for `INVALID`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.index != 0 && !self.token.is_nil()
    }

    /// The load index this handle was issued for.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl Default for SceneHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Identifier of a connected participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ClientId(pub u64);

impl ClientId {
    /// The authoritative host. Fixed for the lifetime of a session.
    pub const SERVER: Self = Self(0);

    /// True iff this is the authoritative host.
    #[must_use]
    pub fn is_server(&self) -> bool {
        *self == Self::SERVER
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

// =============================================================================
// CLUSTER B: REQUESTS
// =============================================================================

/// How a scene load affects the set of currently loaded scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadMode {
    /// Replace every loaded scene with the requested one.
    Single,
    /// Load the requested scene alongside the ones already loaded.
    Additive,
}

// =============================================================================
// CLUSTER C: EVENTS
// =============================================================================

/// Lifecycle transitions announced by the scene manager.
///
/// Per-client completions (`LoadComplete`/`UnloadComplete`) carry the client
/// that finished; the `*EventCompleted` variants announce that every connected
/// client finished the corresponding event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneEventType {
    /// A load request was accepted and is in progress.
    Load,
    /// One client finished loading the scene.
    LoadComplete,
    /// All connected clients finished loading the scene.
    LoadEventCompleted,
    /// An unload request was accepted and is in progress.
    Unload,
    /// One client finished unloading the scene.
    UnloadComplete,
    /// All connected clients finished unloading the scene.
    UnloadEventCompleted,
    /// A late-joining client began synchronizing its scene state.
    Synchronize,
    /// A late-joining client finished synchronizing.
    SynchronizeComplete,
}
