//! # Scene Handoff Service
//!
//! The adapter itself. State transitions:
//!
//! 1. [`SceneHandoff::spawn`]: capture the active scene as "previous",
//!    install the additive-only verification hook, request the target load.
//! 2. [`SceneHandoff::handle_event`]: on the server's `LoadComplete` for the
//!    target scene, record the loaded handle and unload the previous scene
//!    exactly once.
//! 3. [`SceneHandoff::is_scene_loaded`] / [`SceneHandoff::unload_loaded_scene`]:
//!    the outward-facing query and the guarded manual unload.
//!
//! ## Thread Safety
//!
//! Events may arrive on any task; the handful of handles live behind a
//! `parking_lot::Mutex`, so delivery threading is immaterial.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{Authority, HandoffConfig};
use stage_bus::SceneEvent;
use stage_manager::SceneManagerApi;
use stage_types::{LoadMode, LoadStatus, SceneEventType, SceneHandle, SceneName};

/// Pre-load verification policy: only additive loads are allowed.
///
/// Installed by the handoff at spawn; the manager consults it for every
/// load request, not just the handoff's own.
#[must_use]
pub fn verify_additive_only(_scene_index: usize, _name: &SceneName, mode: LoadMode) -> bool {
    mode == LoadMode::Additive
}

#[derive(Debug, Default)]
struct HandoffState {
    /// Handle of the scene that was active before the load. Swapped to
    /// `INVALID` when its unload is issued, so the unload fires exactly once.
    previous: SceneHandle,
    /// Handle captured from the matching completion event.
    loaded: SceneHandle,
    /// Set by `spawn`; manual unload is refused before then.
    spawned: bool,
}

/// Scene handoff component.
///
/// Generic over the manager port so unit tests can drive it against a stub;
/// the runtime wires in the real [`stage_manager::SceneManagerService`].
pub struct SceneHandoff<M: SceneManagerApi> {
    config: HandoffConfig,
    authority: Authority,
    manager: Arc<M>,
    state: Mutex<HandoffState>,
}

impl<M: SceneManagerApi> SceneHandoff<M> {
    pub fn new(config: HandoffConfig, authority: Authority, manager: Arc<M>) -> Self {
        Self {
            config,
            authority,
            manager,
            state: Mutex::new(HandoffState::default()),
        }
    }

    /// Network-spawn entry point.
    ///
    /// On the authoritative host with a configured target scene: records the
    /// currently active scene as "previous", installs the additive-only
    /// verification hook, and requests the additive load. Elsewhere this
    /// only marks the component spawned.
    pub fn spawn(&self) {
        if self.authority.is_server() {
            if let Some(target) = self.config.target_scene.clone() {
                let previous = self
                    .manager
                    .active_scene()
                    .map_or(SceneHandle::INVALID, |(name, handle)| {
                        debug!(scene = %name, "Recorded previous scene");
                        handle
                    });

                self.manager.set_verification(Box::new(verify_additive_only));

                {
                    let mut state = self.state.lock();
                    state.previous = previous;
                    state.spawned = true;
                }

                let status = self.manager.load_scene(&target, LoadMode::Additive);
                self.check_status(status, "load", &target);
                return;
            }
        }
        self.state.lock().spawned = true;
    }

    /// Scene-event notification entry point.
    ///
    /// Reacts only to the server's `LoadComplete` for the target scene:
    /// records the loaded handle and requests the previous scene's unload.
    pub fn handle_event(&self, event: &SceneEvent) {
        // Scene requests are the server's alone; followers never react.
        if !self.authority.is_server() {
            return;
        }
        let Some(target) = self.config.target_scene.as_ref() else {
            return;
        };
        if event.event_type != SceneEventType::LoadComplete
            || !event.client_id.is_server()
            || &event.scene_name != target
        {
            return;
        }

        let previous = {
            let mut state = self.state.lock();
            state.loaded = event.handle;
            // Exactly once: later duplicates see INVALID here.
            std::mem::replace(&mut state.previous, SceneHandle::INVALID)
        };

        if previous.is_valid() {
            info!(
                scene = %event.scene_name,
                previous_index = previous.index(),
                "Target scene loaded, retiring previous scene"
            );
            let status = self.manager.unload_scene(previous);
            self.check_status(status, "unload", target);
        } else {
            info!(scene = %event.scene_name, "Target scene loaded, no previous scene to retire");
        }
    }

    /// True once the target scene has finished loading and its handle is
    /// still valid and loaded.
    #[must_use]
    pub fn is_scene_loaded(&self) -> bool {
        let loaded = self.state.lock().loaded;
        loaded.is_valid() && self.manager.is_loaded(loaded)
    }

    /// Manual unload of the currently loaded scene, if ever needed.
    ///
    /// No-op unless this is the authoritative host, the component has
    /// spawned, and the recorded handle is valid and currently loaded.
    pub fn unload_loaded_scene(&self) {
        let loaded = {
            let state = self.state.lock();
            if !self.authority.is_server() || !state.spawned {
                return;
            }
            state.loaded
        };
        if !loaded.is_valid() || !self.manager.is_loaded(loaded) {
            return;
        }

        let status = self.manager.unload_scene(loaded);
        if let Some(target) = self.config.target_scene.as_ref() {
            self.check_status(status, "unload", target);
        }
    }

    /// Log any non-`started` request status as a warning.
    fn check_status(&self, status: LoadStatus, action: &str, scene: &SceneName) {
        if !status.is_started() {
            warn!(scene = %scene, status = %status, "Failed to {action} scene");
        }
    }
}
