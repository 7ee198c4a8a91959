//! Tracing subscriber bootstrap

use crate::endpoint_config::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter for `logging`
///
/// `RUST_LOG` takes precedence over the configured directive.
pub fn env_filter(logging: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid log filter '{}'", logging.level)),
    }
}

/// Install the global fmt subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = env_filter(logging)?;

    let installed = if logging.pretty {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
