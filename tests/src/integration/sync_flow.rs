//! # Late-Join Synchronization Flow
//!
//! A client that connects after scenes are loaded receives the current scene
//! state as `Synchronize` events, and subsequent lifecycle completions cover
//! every connected client.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stage_bus::{EventFilter, EventTopic, InMemorySceneBus};
    use stage_manager::{ManagerConfig, SceneManagerApi, SceneManagerService};
    use stage_types::{ClientId, LoadMode, SceneEventType, SceneName};

    fn name(s: &str) -> SceneName {
        SceneName::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_late_join_receives_scene_state() {
        let bus = Arc::new(InMemorySceneBus::new());
        let manager = Arc::new(SceneManagerService::new(
            ManagerConfig::with_catalog(vec![name("Lobby"), name("Harbor")]),
            bus.clone(),
        ));
        manager.load_scene(&name("Lobby"), LoadMode::Single);
        manager.load_scene(&name("Harbor"), LoadMode::Additive);

        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Synchronization]));

        manager.register_client(ClientId(42));

        let mut synchronized = Vec::new();
        while let Ok(Some(event)) = sub.try_recv() {
            assert_eq!(event.client_id, ClientId(42));
            synchronized.push((event.event_type, event.scene_name));
        }

        // One Synchronize per loaded scene, then the completion.
        assert_eq!(synchronized.len(), 3);
        assert_eq!(synchronized[0], (SceneEventType::Synchronize, name("Lobby")));
        assert_eq!(
            synchronized[1],
            (SceneEventType::Synchronize, name("Harbor"))
        );
        assert_eq!(synchronized[2].0, SceneEventType::SynchronizeComplete);
    }

    #[tokio::test]
    async fn test_completions_reach_every_connected_client() {
        let bus = Arc::new(InMemorySceneBus::new());
        let manager = Arc::new(SceneManagerService::new(
            ManagerConfig::with_catalog(vec![name("Lobby"), name("Harbor")]),
            bus.clone(),
        ));
        manager.load_scene(&name("Lobby"), LoadMode::Single);
        manager.register_client(ClientId(7));
        manager.register_client(ClientId(8));

        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Loading]));
        manager.load_scene(&name("Harbor"), LoadMode::Additive);

        let mut completions = Vec::new();
        while let Ok(Some(event)) = sub.try_recv() {
            if event.event_type == SceneEventType::LoadComplete {
                completions.push(event.client_id);
            }
        }
        assert_eq!(
            completions,
            vec![ClientId::SERVER, ClientId(7), ClientId(8)]
        );
    }
}
