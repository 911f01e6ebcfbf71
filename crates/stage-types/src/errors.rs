//! # Error Types
//!
//! Registry-internal faults. Request-level outcomes use
//! [`crate::LoadStatus`] instead; see `status.rs`.

use thiserror::Error;

/// Errors that can occur inside the scene registry and catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a loaded scene.
    #[error("Stale scene handle: load index {index}")]
    StaleHandle {
        /// Load index carried by the rejected handle.
        index: u64,
    },

    /// The catalog was constructed empty.
    #[error("Scene catalog is empty")]
    EmptyCatalog,
}
