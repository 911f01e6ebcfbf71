//! # Stagehand Runtime
//!
//! Binary entry point: builds the scene management stack, loads the
//! bootstrap scene, spawns the handoff, and reports once the target scene
//! is live and the bootstrap scene retired.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use tokio::time::{sleep, timeout};
use tracing::info;

use stage_runtime::{init_logging, RuntimeConfig, StageRuntime};

/// How long the runtime waits for the handoff to settle before giving up.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    init_logging(&config);

    info!(
        target = %config.target_scene,
        bootstrap = %config.bootstrap_scene,
        "Starting stage runtime"
    );

    let runtime = StageRuntime::build(&config)?;

    let status = runtime.load_bootstrap_scene();
    ensure!(
        status.is_started(),
        "bootstrap scene failed to load: {status}"
    );

    let pump = runtime.start_event_pump();
    runtime.handoff.spawn();

    timeout(SETTLE_TIMEOUT, async {
        while !runtime.handoff_settled() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .context("scene handoff did not settle in time")?;

    info!(target = %config.target_scene, "Scene handoff complete");
    pump.abort();
    Ok(())
}
