//! # Scene Handoff Choreography
//!
//! Exercises the complete flow across the real bus, manager, and handoff:
//!
//! ```text
//! [Runtime] ──bootstrap Single load──→ [Scene Manager]
//! [Handoff] ──additive target load──→ [Scene Manager]
//!                                          │ LoadComplete (server, target)
//!                                          ↓
//!                                     [Stage Bus] ──pump──→ [Handoff]
//!                                                               │
//!                                     [Scene Manager] ←──unload previous──┘
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    use stage_bus::{EventFilter, EventTopic, InMemorySceneBus, SceneEvent, ScenePublisher};
    use stage_handoff::{Authority, HandoffConfig, SceneHandoff};
    use stage_manager::{ManagerConfig, SceneManagerApi, SceneManagerService};
    use stage_runtime::{RuntimeConfig, StageRuntime};
    use stage_types::{ClientId, LoadMode, LoadStatus, SceneEventType, SceneName};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn name(s: &str) -> SceneName {
        SceneName::new(s).unwrap()
    }

    struct Stack {
        bus: Arc<InMemorySceneBus>,
        manager: Arc<SceneManagerService<InMemorySceneBus>>,
        handoff: Arc<SceneHandoff<SceneManagerService<InMemorySceneBus>>>,
    }

    /// Build a bus + manager + handoff stack with a Lobby/Harbor catalog,
    /// Lobby pre-loaded as the active scene.
    fn stack() -> Stack {
        let bus = Arc::new(InMemorySceneBus::new());
        let manager = Arc::new(SceneManagerService::new(
            ManagerConfig::with_catalog(vec![name("Lobby"), name("Harbor"), name("Ruins")]),
            bus.clone(),
        ));
        assert!(manager
            .load_scene(&name("Lobby"), LoadMode::Single)
            .is_started());

        let handoff = Arc::new(SceneHandoff::new(
            HandoffConfig::targeting(name("Harbor")),
            Authority::Server,
            manager.clone(),
        ));
        Stack {
            bus,
            manager,
            handoff,
        }
    }

    /// Pump bus events into the handoff until the channel drains.
    fn drain_into_handoff(
        stack: &Stack,
        sub: &mut stage_bus::Subscription,
    ) {
        while let Ok(Some(event)) = sub.try_recv() {
            stack.handoff.handle_event(&event);
        }
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[tokio::test]
    async fn test_spawn_load_complete_retires_previous() {
        let stack = stack();
        let lobby = stack.manager.scene_by_name(&name("Lobby")).unwrap();
        let mut sub = stack.bus.subscribe(EventFilter::all());

        stack.handoff.spawn();
        assert!(!stack.handoff.is_scene_loaded());

        drain_into_handoff(&stack, &mut sub);

        // Target loaded, previous retired.
        assert!(stack.handoff.is_scene_loaded());
        assert!(stack.manager.scene_by_name(&name("Harbor")).is_some());
        assert!(!stack.manager.is_loaded(lobby));
        assert!(stack.manager.scene_by_name(&name("Lobby")).is_none());
    }

    #[tokio::test]
    async fn test_previous_scene_unloaded_exactly_once() {
        let stack = stack();
        let mut pump_sub = stack.bus.subscribe(EventFilter::all());
        let mut unload_sub = stack
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Unloading]));

        stack.handoff.spawn();
        drain_into_handoff(&stack, &mut pump_sub);

        // Re-deliver the completion event; the handoff must not unload again.
        let harbor = stack.manager.scene_by_name(&name("Harbor")).unwrap();
        stack
            .bus
            .publish(SceneEvent {
                event_type: SceneEventType::LoadComplete,
                client_id: ClientId::SERVER,
                scene_name: name("Harbor"),
                handle: harbor,
                mode: LoadMode::Additive,
            })
            .await;
        drain_into_handoff(&stack, &mut pump_sub);

        let mut unload_begins = 0;
        while let Ok(Some(event)) = unload_sub.try_recv() {
            if event.event_type == SceneEventType::Unload {
                unload_begins += 1;
            }
        }
        assert_eq!(unload_begins, 1);
    }

    #[tokio::test]
    async fn test_runtime_end_to_end() {
        let config = RuntimeConfig::default();
        let runtime = StageRuntime::build(&config).expect("build");

        assert!(runtime.load_bootstrap_scene().is_started());
        let pump = runtime.start_event_pump();
        runtime.handoff.spawn();

        timeout(Duration::from_secs(1), async {
            while !runtime.handoff_settled() {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("handoff settled");

        pump.abort();
    }

    // =========================================================================
    // VERIFICATION POLICY
    // =========================================================================

    #[tokio::test]
    async fn test_hook_blocks_single_loads_after_spawn() {
        let stack = stack();
        let mut sub = stack.bus.subscribe(EventFilter::all());

        stack.handoff.spawn();
        drain_into_handoff(&stack, &mut sub);

        // The handoff installed the additive-only policy on the manager.
        assert_eq!(
            stack.manager.load_scene(&name("Ruins"), LoadMode::Single),
            LoadStatus::FailedVerification
        );
        assert_eq!(
            stack.manager.load_scene(&name("Ruins"), LoadMode::Additive),
            LoadStatus::Started
        );
    }

    // =========================================================================
    // MANUAL UNLOAD
    // =========================================================================

    #[tokio::test]
    async fn test_manual_unload_after_handoff() {
        let stack = stack();
        let mut sub = stack.bus.subscribe(EventFilter::all());

        stack.handoff.spawn();
        drain_into_handoff(&stack, &mut sub);
        assert!(stack.handoff.is_scene_loaded());

        stack.handoff.unload_loaded_scene();

        assert!(!stack.handoff.is_scene_loaded());
        assert!(stack.manager.scene_by_name(&name("Harbor")).is_none());

        // Second manual unload is a no-op (handle no longer loaded).
        stack.handoff.unload_loaded_scene();
        assert!(!stack.handoff.is_scene_loaded());
    }

    // =========================================================================
    // FAILURE OBSERVATION
    // =========================================================================

    #[tokio::test]
    async fn test_unknown_target_scene_is_logged_not_fatal() {
        let bus = Arc::new(InMemorySceneBus::new());
        let manager = Arc::new(SceneManagerService::new(
            ManagerConfig::with_catalog(vec![name("Lobby")]),
            bus.clone(),
        ));
        manager.load_scene(&name("Lobby"), LoadMode::Single);

        // Target is not in the catalog: the request fails with a status the
        // handoff only logs. No panic, no error propagation.
        let handoff = SceneHandoff::new(
            HandoffConfig::targeting(name("Atlantis")),
            Authority::Server,
            manager.clone(),
        );
        handoff.spawn();

        assert!(!handoff.is_scene_loaded());
        // The previous scene stays loaded; nothing was retired.
        assert!(manager.scene_by_name(&name("Lobby")).is_some());
    }
}
