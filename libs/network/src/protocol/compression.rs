//! Compression Policy
//!
//! Whether payload compression is negotiated with an endpoint. The codec
//! itself lives with the transport; only the policy token is parsed here.

use crate::AccessPointError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compression policy enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionPolicy {
    /// Negotiate payload compression
    #[serde(rename = "compressed")]
    Compressed,
    /// Never compress
    #[serde(rename = "notcompressed")]
    NotCompressed,
}

impl CompressionPolicy {
    /// Policy for a boolean compression flag
    pub fn from_flag(compressed: bool) -> Self {
        if compressed {
            CompressionPolicy::Compressed
        } else {
            CompressionPolicy::NotCompressed
        }
    }

    /// Parse an endpoint-string token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "compressed" => Some(CompressionPolicy::Compressed),
            "notcompressed" => Some(CompressionPolicy::NotCompressed),
            _ => None,
        }
    }

    /// Token as written in endpoint strings
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionPolicy::Compressed => "compressed",
            CompressionPolicy::NotCompressed => "notcompressed",
        }
    }

    /// Check if compression is enabled
    pub fn is_enabled(self) -> bool {
        self == CompressionPolicy::Compressed
    }
}

impl fmt::Display for CompressionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionPolicy {
    type Err = AccessPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| AccessPointError::unknown_compression(s, s))
    }
}
