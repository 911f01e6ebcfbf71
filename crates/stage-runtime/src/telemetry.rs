//! Logging initialization.

use crate::RuntimeConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize structured logging for the runtime.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// narrow filtering per target without touching config.
pub fn init_logging(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
