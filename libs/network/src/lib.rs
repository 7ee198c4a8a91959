//! Cache Server Endpoint Identity
//!
//! This crate turns endpoint strings from proxy configuration into shared
//! [`AccessPoint`] descriptors. A descriptor's identity hash is the connection
//! pool key; its failure domain feeds replica placement.
//!
//! ```
//! use network::{AccessPoint, McProtocol, SecurityMech};
//!
//! let ap = AccessPoint::create("[::1]:11211:ascii:ssl", McProtocol::Ascii, SecurityMech::None, 0, false, 0)
//!     .expect("valid endpoint");
//! assert_eq!(ap.to_host_port_string(), "[::1]:11211");
//! assert_eq!(ap.to_string(), "[::1]:11211:ascii:ssl");
//! ```

pub mod access_point;
pub mod error;
pub mod protocol;
pub mod transports;

// Re-export commonly used types
pub use access_point::{AccessPoint, AccessPointDefaults, AccessPointSnapshot, EndpointIdentity};
pub use error::{AccessPointError, Result};
pub use protocol::{CompressionPolicy, McProtocol, SecurityMech, SecurityTokenTable};
pub use transports::TransportType;

/// Default memcache port
pub const DEFAULT_MEMCACHE_PORT: u16 = 11211;
