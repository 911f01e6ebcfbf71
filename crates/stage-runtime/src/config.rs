//! Runtime configuration from environment variables.

use std::env;

/// Configuration for the stage runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// The scene the handoff loads additively.
    pub target_scene: String,

    /// The scene loaded at startup and retired by the handoff.
    pub bootstrap_scene: String,

    /// The scene catalog. Always contains the bootstrap and target scenes.
    pub catalog: Vec<String>,

    /// Event bus channel capacity.
    pub bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            target_scene: "Harbor".to_string(),
            bootstrap_scene: "Lobby".to_string(),
            catalog: vec!["Lobby".to_string(), "Harbor".to_string()],
            bus_capacity: 256,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STAGE_LOG`: Log level filter (default: info)
    /// - `STAGE_TARGET_SCENE`: Scene the handoff loads (default: Harbor)
    /// - `STAGE_BOOTSTRAP_SCENE`: Scene loaded at startup (default: Lobby)
    /// - `STAGE_CATALOG`: Comma-separated extra catalog entries
    /// - `STAGE_BUS_CAPACITY`: Event bus capacity, at least 1 (default: 256)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let target_scene =
            env::var("STAGE_TARGET_SCENE").unwrap_or(defaults.target_scene);
        let bootstrap_scene =
            env::var("STAGE_BOOTSTRAP_SCENE").unwrap_or(defaults.bootstrap_scene);

        let mut catalog: Vec<String> = env::var("STAGE_CATALOG")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        for required in [&bootstrap_scene, &target_scene] {
            if !catalog.contains(required) {
                catalog.push(required.clone());
            }
        }

        Self {
            log_level: env::var("STAGE_LOG").unwrap_or(defaults.log_level),
            target_scene,
            bootstrap_scene,
            catalog,
            // Zero is not a usable channel capacity; fall back to the default.
            bus_capacity: env::var("STAGE_BUS_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&c: &usize| c > 0)
                .unwrap_or(defaults.bus_capacity),
        }
    }
}
