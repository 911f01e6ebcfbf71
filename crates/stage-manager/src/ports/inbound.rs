//! Inbound port (API) for the scene manager subsystem.

use stage_types::{LoadMode, LoadStatus, SceneHandle, SceneName};

/// Pre-load verification hook.
///
/// Invoked before a load is performed with the catalog index, the scene
/// name, and the requested mode. Returning `false` blocks the load.
pub type VerifySceneFn = dyn Fn(usize, &SceneName, LoadMode) -> bool + Send + Sync;

/// Primary API for scene management.
///
/// Requests report a [`LoadStatus`]; any value other than
/// [`LoadStatus::Started`] means the request was not accepted and the caller
/// is expected to log it, not retry it.
pub trait SceneManagerApi: Send + Sync {
    /// Request a scene load.
    ///
    /// On acceptance, publishes `Load`, commits the scene to the registry,
    /// then publishes per-client `LoadComplete` events followed by
    /// `LoadEventCompleted`.
    fn load_scene(&self, name: &SceneName, mode: LoadMode) -> LoadStatus;

    /// Request a scene unload by handle.
    ///
    /// On acceptance, publishes `Unload`, removes the instance, then
    /// publishes per-client `UnloadComplete` events followed by
    /// `UnloadEventCompleted`.
    fn unload_scene(&self, handle: SceneHandle) -> LoadStatus;

    /// Install the pre-load verification hook, replacing any previous one.
    fn set_verification(&self, hook: Box<VerifySceneFn>);

    /// Find the handle for a loaded scene by name.
    fn scene_by_name(&self, name: &SceneName) -> Option<SceneHandle>;

    /// True iff the handle refers to a currently loaded scene.
    fn is_loaded(&self, handle: SceneHandle) -> bool;

    /// The currently active scene, if any.
    fn active_scene(&self) -> Option<(SceneName, SceneHandle)>;
}
