//! Transport Kinds
//!
//! How an endpoint is reached. Opening the socket belongs to the transport
//! layer; the kind is part of an endpoint's identity.

use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};

/// Prefix marking a unix domain socket path in endpoint strings
pub const UNIX_SOCKET_PREFIX: &str = "unix:";

/// Transport type enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    /// TCP network socket
    #[default]
    Tcp = 0,
    /// Unix domain socket
    Unix = 1,
}

impl TransportType {
    /// Check if this is a local unix domain socket
    pub fn is_unix(self) -> bool {
        self == TransportType::Unix
    }

    /// Numeric transport code
    pub fn code(self) -> u8 {
        self.into()
    }
}
