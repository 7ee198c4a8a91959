//! # Cache Proxy Configuration
//!
//! Loads the defaults the endpoint parser applies to partial endpoint strings
//! and bootstraps logging for binaries that embed the proxy libraries.
//!
//! ## Usage
//!
//! ```no_run
//! use proxy_config::{init_tracing, EndpointConfig};
//! use std::path::Path;
//!
//! let config = EndpointConfig::load(Some(Path::new("config/endpoints.toml")))?;
//! init_tracing(&config.logging)?;
//! let ap = config.access_point("cache01.example.com:11211")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod endpoint_config;
pub mod logging;

// Re-export commonly used types
pub use endpoint_config::{EndpointConfig, LoggingConfig, ENV_PREFIX, ENV_SEPARATOR};
pub use logging::{env_filter, init_tracing};
