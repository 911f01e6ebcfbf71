//! # Loaded-Scene Registry
//!
//! Tracks which scene instances are currently loaded, issues handles, and
//! decides which instance is the active scene.
//!
//! ## Invariants
//!
//! - Every issued handle is valid and unique per load (load indices are
//!   monotonically increasing, never reused).
//! - A `Single` load leaves exactly one instance in the registry.
//! - The active scene is the most recent `Single` load if one survives,
//!   otherwise the earliest-loaded instance still present.

use stage_types::{LoadMode, SceneError, SceneHandle, SceneName};

/// A scene instance currently loaded by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedScene {
    /// Catalog name of the scene.
    pub name: SceneName,
    /// Handle issued for this load.
    pub handle: SceneHandle,
    /// Mode the scene was loaded with.
    pub mode: LoadMode,
    /// Load order (equals the handle's load index).
    pub order: u64,
}

/// The table of loaded scene instances.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: Vec<LoadedScene>,
    next_index: u64,
}

impl SceneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            next_index: 1,
        }
    }

    /// Commit a load, issuing a fresh handle.
    ///
    /// A `Single` load replaces the entire table; an `Additive` load appends.
    pub fn commit_load(&mut self, name: SceneName, mode: LoadMode) -> SceneHandle {
        if mode == LoadMode::Single {
            self.scenes.clear();
        }
        let handle = SceneHandle::issue(self.next_index);
        self.scenes.push(LoadedScene {
            name,
            handle,
            mode,
            order: self.next_index,
        });
        self.next_index += 1;
        handle
    }

    /// Remove a loaded scene by handle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::StaleHandle`] when the handle does not refer to
    /// a currently loaded instance.
    pub fn remove(&mut self, handle: SceneHandle) -> Result<LoadedScene, SceneError> {
        let pos = self
            .scenes
            .iter()
            .position(|s| s.handle == handle)
            .ok_or(SceneError::StaleHandle {
                index: handle.index(),
            })?;
        Ok(self.scenes.remove(pos))
    }

    /// True iff the handle refers to a currently loaded instance.
    #[must_use]
    pub fn is_loaded(&self, handle: SceneHandle) -> bool {
        handle.is_valid() && self.scenes.iter().any(|s| s.handle == handle)
    }

    /// Find the handle for a scene name, if that scene is loaded.
    ///
    /// When the same name is loaded additively more than once, the most
    /// recent instance wins.
    #[must_use]
    pub fn handle_by_name(&self, name: &SceneName) -> Option<SceneHandle> {
        self.scenes
            .iter()
            .rev()
            .find(|s| &s.name == name)
            .map(|s| s.handle)
    }

    /// The active scene: the most recent `Single` load still present,
    /// otherwise the earliest-loaded instance.
    #[must_use]
    pub fn active_scene(&self) -> Option<&LoadedScene> {
        self.scenes
            .iter()
            .rev()
            .find(|s| s.mode == LoadMode::Single)
            .or_else(|| self.scenes.iter().min_by_key(|s| s.order))
    }

    /// Number of loaded instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True iff nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Iterate over loaded instances in load order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedScene> {
        self.scenes.iter()
    }
}
