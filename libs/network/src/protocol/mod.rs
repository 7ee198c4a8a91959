//! Wire Protocol Infrastructure
//!
//! Wire protocol tags, transport security mechanisms and compression policy
//! as they appear in endpoint strings.

pub mod compression;
pub mod security;

// Re-export commonly used types
pub use compression::CompressionPolicy;
pub use security::{SecurityMech, SecurityTokenTable};

use crate::AccessPointError;
use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire protocol spoken by a cache server
///
/// The numeric codes feed the identity hash and must stay stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum McProtocol {
    /// Not yet known (address-built descriptors)
    #[default]
    Unknown = 0,
    /// Memcache ASCII text protocol
    Ascii = 1,
    /// Memcache binary protocol
    Binary = 2,
    /// Umbrella framed protocol
    Umbrella = 3,
    /// Caret framed protocol
    Caret = 4,
    /// Thrift framed protocol
    Thrift = 5,
}

impl McProtocol {
    /// Every protocol, in code order
    pub const ALL: [McProtocol; 6] = [
        McProtocol::Unknown,
        McProtocol::Ascii,
        McProtocol::Binary,
        McProtocol::Umbrella,
        McProtocol::Caret,
        McProtocol::Thrift,
    ];

    /// Canonical name used in endpoint strings
    pub fn as_str(self) -> &'static str {
        match self {
            McProtocol::Unknown => "unknown",
            McProtocol::Ascii => "ascii",
            McProtocol::Binary => "binary",
            McProtocol::Umbrella => "umbrella",
            McProtocol::Caret => "caret",
            McProtocol::Thrift => "thrift",
        }
    }

    /// Look up a protocol by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Numeric protocol code
    pub fn code(self) -> u8 {
        self.into()
    }
}

impl fmt::Display for McProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for McProtocol {
    type Err = AccessPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AccessPointError::unknown_protocol(s, s))
    }
}
