//! Endpoint Configuration Module
//!
//! Loads the parser defaults applied to endpoint strings and the logging
//! settings from an optional TOML file with `CACHEPROXY_` environment overrides.
//!
//! ```toml
//! [logging]
//! level = "info,network=debug"
//!
//! [defaults]
//! protocol = "caret"
//! compressed = true
//! failure_domain = 3
//!
//! [defaults.security_tokens]
//! ssl = "fizz"
//!
//! # tokens accepted besides ssl|plain
//! [defaults.security_tokens.extra]
//! ktls12 = "ktls12"
//! ```
//!
//! Environment keys use `__` between sections, e.g.
//! `CACHEPROXY_DEFAULTS__PORT_OVERRIDE=11311`.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use network::{AccessPoint, AccessPointDefaults};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CACHEPROXY";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Top-level configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Logging bootstrap
    pub logging: LoggingConfig,

    /// Defaults for segments an endpoint string leaves out
    pub defaults: AccessPointDefaults,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"warn,network=debug"`
    pub level: String,
    /// Multi-line human readable output for development
    pub pretty: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: false,
        }
    }
}

impl EndpointConfig {
    /// Load configuration from an optional file with environment overrides
    ///
    /// Without a file, every setting starts from its default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading endpoint config: {:?}", path);
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        debug!(
            protocol = %loaded.defaults.protocol,
            failure_domain = loaded.defaults.failure_domain,
            "Endpoint defaults loaded"
        );
        Ok(loaded)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse endpoint config TOML")
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize endpoint config")
    }

    /// Parse an endpoint string with the configured defaults
    pub fn access_point(&self, ap_string: &str) -> Result<Arc<AccessPoint>> {
        AccessPoint::create_with(ap_string, &self.defaults)
            .with_context(|| format!("Invalid access point '{}'", ap_string))
    }
}
