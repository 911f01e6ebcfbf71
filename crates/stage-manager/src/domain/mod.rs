//! Domain layer: scene catalog configuration and the loaded-scene registry.

pub mod config;
pub mod registry;

pub use config::ManagerConfig;
pub use registry::{LoadedScene, SceneRegistry};
