//! Construction and event routing for the scene management stack.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::RuntimeConfig;
use stage_bus::{EventFilter, InMemorySceneBus};
use stage_handoff::{Authority, HandoffConfig, SceneHandoff};
use stage_manager::{ManagerConfig, SceneManagerApi, SceneManagerService};
use stage_types::{LoadMode, LoadStatus, SceneName};

/// The concrete manager type the runtime wires: events sink into the bus.
pub type SceneManager = SceneManagerService<InMemorySceneBus>;

/// The wired scene management stack.
pub struct StageRuntime {
    /// Shared event bus; the manager's sink and the pump's source.
    pub bus: Arc<InMemorySceneBus>,
    /// Authoritative scene manager.
    pub manager: Arc<SceneManager>,
    /// The handoff component under this runtime's control.
    pub handoff: Arc<SceneHandoff<SceneManager>>,
    /// Scene loaded at startup, retired by the handoff.
    bootstrap: SceneName,
}

impl StageRuntime {
    /// Build the stack from configuration. Scene names and the catalog are
    /// validated here; bad config is a startup error, not a runtime status.
    pub fn build(config: &RuntimeConfig) -> Result<Self> {
        let bus = Arc::new(InMemorySceneBus::with_capacity(config.bus_capacity));

        let catalog = config
            .catalog
            .iter()
            .map(|raw| {
                SceneName::new(raw.clone())
                    .with_context(|| format!("invalid catalog scene name: {raw:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        let manager_config = ManagerConfig::with_catalog(catalog);
        manager_config.validate().context("scene catalog")?;
        let manager = Arc::new(SceneManagerService::new(manager_config, bus.clone()));

        let target = SceneName::new(config.target_scene.clone())
            .context("target scene name is empty")?;
        let bootstrap = SceneName::new(config.bootstrap_scene.clone())
            .context("bootstrap scene name is empty")?;

        let handoff = Arc::new(SceneHandoff::new(
            HandoffConfig::targeting(target),
            Authority::Server,
            manager.clone(),
        ));

        Ok(Self {
            bus,
            manager,
            handoff,
            bootstrap,
        })
    }

    /// Load the bootstrap scene (a `Single` load; it becomes the active
    /// scene the handoff will later retire).
    pub fn load_bootstrap_scene(&self) -> LoadStatus {
        info!(scene = %self.bootstrap, "Loading bootstrap scene");
        let status = self.manager.load_scene(&self.bootstrap, LoadMode::Single);
        if !status.is_started() {
            warn!(scene = %self.bootstrap, status = %status, "Failed to load bootstrap scene");
        }
        status
    }

    /// Start the event pump forwarding bus events into the handoff.
    ///
    /// Must be started before [`SceneHandoff::spawn`] so the completion
    /// event is observed.
    pub fn start_event_pump(&self) -> JoinHandle<()> {
        let mut sub = self.bus.subscribe(EventFilter::all());
        let handoff = self.handoff.clone();
        tokio::spawn(async move {
            while let Some(event) = sub.recv().await {
                handoff.handle_event(&event);
            }
            debug!("Event pump stopped: bus closed");
        })
    }

    /// True once the handoff's target scene is loaded and the bootstrap
    /// scene has been retired.
    #[must_use]
    pub fn handoff_settled(&self) -> bool {
        self.handoff.is_scene_loaded() && self.manager.scene_by_name(&self.bootstrap).is_none()
    }
}
