//! Scene manager configuration.

use stage_types::{SceneError, SceneName};

/// Configuration for the scene manager service.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Whether scene management is enabled. When disabled, every request
    /// returns `SceneManagementDisabled`.
    pub enabled: bool,
    /// The catalog of loadable scene names. The position of a name in this
    /// list is the scene index handed to the verification hook.
    pub catalog: Vec<SceneName>,
}

impl ManagerConfig {
    /// Build a config from a scene catalog with management enabled.
    #[must_use]
    pub fn with_catalog(catalog: Vec<SceneName>) -> Self {
        Self {
            enabled: true,
            catalog,
        }
    }

    /// Check the catalog is usable. A manager with an empty catalog would
    /// reject every load, so composition roots treat that as a setup fault.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.catalog.is_empty() {
            return Err(SceneError::EmptyCatalog);
        }
        Ok(())
    }

    /// Look up the catalog index of a scene name.
    #[must_use]
    pub fn scene_index(&self, name: &SceneName) -> Option<usize> {
        self.catalog.iter().position(|n| n == name)
    }
}
