//! # Scene Manager Service
//!
//! Implements [`SceneManagerApi`] over the loaded-scene registry and an
//! event sink.
//!
//! ## Request discipline
//!
//! Only one scene event may be in flight at a time; a request arriving while
//! another is being processed reports `EventInProgress`. In this single-node
//! implementation requests complete synchronously, so the gate exists to
//! reject reentrant requests (a verification hook or event subscriber
//! calling back into the manager mid-event).
//!
//! ## Thread Safety
//!
//! The service is thread-safe and shared across async tasks via `Arc`.
//! Registry and hook state are guarded by `parking_lot::RwLock`.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{ManagerConfig, SceneRegistry};
use crate::ports::inbound::{SceneManagerApi, VerifySceneFn};
use crate::ports::outbound::SceneEventSink;
use stage_bus::SceneEvent;
use stage_types::{ClientId, LoadMode, LoadStatus, SceneEventType, SceneHandle, SceneName};

/// Authoritative scene manager.
///
/// Generic over its event sink so tests can record emitted events while the
/// runtime wires in the shared bus.
pub struct SceneManagerService<S: SceneEventSink> {
    /// Catalog and feature configuration.
    config: ManagerConfig,
    /// Loaded-scene table.
    registry: RwLock<SceneRegistry>,
    /// Pre-load verification hook. `None` accepts every load. Held as an
    /// `Arc` so it can be invoked outside the lock; a hook may therefore
    /// install a replacement without deadlocking.
    verify: RwLock<Option<Arc<VerifySceneFn>>>,
    /// Connected clients, server excluded (it is always connected).
    clients: RwLock<Vec<ClientId>>,
    /// One-in-flight-event gate.
    busy: AtomicBool,
    /// Lifecycle event sink.
    sink: Arc<S>,
}

/// Clears the busy flag on every exit path of a request.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: SceneEventSink> SceneManagerService<S> {
    pub fn new(config: ManagerConfig, sink: Arc<S>) -> Self {
        Self {
            config,
            registry: RwLock::new(SceneRegistry::new()),
            verify: RwLock::new(None),
            clients: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
            sink,
        }
    }

    /// Register a late-joining client and publish its synchronization events.
    pub fn register_client(&self, client_id: ClientId) {
        if client_id.is_server() {
            return;
        }
        {
            let mut clients = self.clients.write();
            if clients.contains(&client_id) {
                return;
            }
            clients.push(client_id);
        }
        info!(client = %client_id, "Client registered, synchronizing scene state");

        // Synchronization replays current scene state to the new client.
        let registry = self.registry.read();
        for scene in registry.iter() {
            self.sink.emit(SceneEvent {
                event_type: SceneEventType::Synchronize,
                client_id,
                scene_name: scene.name.clone(),
                handle: scene.handle,
                mode: scene.mode,
            });
        }
        drop(registry);

        if let Some((name, handle)) = self.active_scene() {
            self.sink.emit(SceneEvent {
                event_type: SceneEventType::SynchronizeComplete,
                client_id,
                scene_name: name,
                handle,
                mode: LoadMode::Additive,
            });
        }
    }

    /// Currently connected clients, server first.
    #[must_use]
    pub fn connected_clients(&self) -> Vec<ClientId> {
        let mut all = vec![ClientId::SERVER];
        all.extend(self.clients.read().iter().copied());
        all
    }

    /// Try to take the one-in-flight-event gate.
    fn try_begin_event(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    fn emit(&self, event_type: SceneEventType, client_id: ClientId, name: &SceneName, handle: SceneHandle, mode: LoadMode) {
        self.sink.emit(SceneEvent {
            event_type,
            client_id,
            scene_name: name.clone(),
            handle,
            mode,
        });
    }

    /// Emit a per-client completion for every connected participant, then
    /// the event-completed summary.
    fn emit_completions(
        &self,
        per_client: SceneEventType,
        completed: SceneEventType,
        name: &SceneName,
        handle: SceneHandle,
        mode: LoadMode,
    ) {
        for client in self.connected_clients() {
            self.emit(per_client, client, name, handle, mode);
        }
        self.emit(completed, ClientId::SERVER, name, handle, mode);
    }
}

impl<S: SceneEventSink> SceneManagerApi for SceneManagerService<S> {
    fn load_scene(&self, name: &SceneName, mode: LoadMode) -> LoadStatus {
        if !self.config.enabled {
            return LoadStatus::SceneManagementDisabled;
        }
        let Some(index) = self.config.scene_index(name) else {
            warn!(scene = %name, "Load rejected: not in catalog");
            return LoadStatus::InvalidSceneName;
        };
        let Some(_guard) = self.try_begin_event() else {
            return LoadStatus::EventInProgress;
        };

        // Verification hook: None accepts every load. Cloned out of the lock
        // first so the hook itself may call `set_verification`.
        let hook = self.verify.read().clone();
        if let Some(hook) = hook {
            if !hook(index, name, mode) {
                debug!(scene = %name, mode = ?mode, "Load blocked by verification hook");
                return LoadStatus::FailedVerification;
            }
        }

        self.emit(SceneEventType::Load, ClientId::SERVER, name, SceneHandle::INVALID, mode);

        let handle = self.registry.write().commit_load(name.clone(), mode);
        info!(scene = %name, mode = ?mode, load_index = handle.index(), "Scene loaded");

        self.emit_completions(
            SceneEventType::LoadComplete,
            SceneEventType::LoadEventCompleted,
            name,
            handle,
            mode,
        );

        LoadStatus::Started
    }

    fn unload_scene(&self, handle: SceneHandle) -> LoadStatus {
        if !self.config.enabled {
            return LoadStatus::SceneManagementDisabled;
        }
        let Some(_guard) = self.try_begin_event() else {
            return LoadStatus::EventInProgress;
        };

        let removed = match self.registry.write().remove(handle) {
            Ok(scene) => scene,
            Err(e) => {
                debug!(error = %e, "Unload rejected");
                return LoadStatus::SceneNotLoaded;
            }
        };

        self.emit(
            SceneEventType::Unload,
            ClientId::SERVER,
            &removed.name,
            removed.handle,
            removed.mode,
        );
        info!(scene = %removed.name, load_index = removed.handle.index(), "Scene unloaded");

        self.emit_completions(
            SceneEventType::UnloadComplete,
            SceneEventType::UnloadEventCompleted,
            &removed.name,
            removed.handle,
            removed.mode,
        );

        LoadStatus::Started
    }

    fn set_verification(&self, hook: Box<VerifySceneFn>) {
        *self.verify.write() = Some(Arc::from(hook));
    }

    fn scene_by_name(&self, name: &SceneName) -> Option<SceneHandle> {
        self.registry.read().handle_by_name(name)
    }

    fn is_loaded(&self, handle: SceneHandle) -> bool {
        self.registry.read().is_loaded(handle)
    }

    fn active_scene(&self) -> Option<(SceneName, SceneHandle)> {
        self.registry
            .read()
            .active_scene()
            .map(|s| (s.name.clone(), s.handle))
    }
}
