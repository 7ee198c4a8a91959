//! Security Layer
//!
//! Transport security mechanisms an endpoint can be reached with, and the
//! table that maps security tokens from endpoint strings onto them.
//!
//! Which mechanism `"ssl"` means depends on the TLS variants a deployment
//! supports, so it is part of [`SecurityTokenTable`] rather than a constant.
//! `"plain"` always means [`SecurityMech::None`].

use crate::AccessPointError;
use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Token selecting the deployment's TLS mechanism
pub const SSL_TOKEN: &str = "ssl";

/// Token forcing a plaintext connection
pub const PLAIN_TOKEN: &str = "plain";

/// Transport security mechanism
///
/// The numeric codes feed the identity hash and must stay stable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    FromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum SecurityMech {
    /// No encryption
    #[default]
    #[serde(rename = "plain")]
    None = 0,
    /// TLS
    #[serde(rename = "ssl")]
    Tls = 1,
    /// TLS 1.3 via fizz
    #[serde(rename = "fizz")]
    Tls13Fizz = 2,
    /// Kernel TLS 1.2 offload
    #[serde(rename = "ktls12")]
    Ktls12 = 3,
    /// TLS handshake, then plaintext payload
    #[serde(rename = "tls_to_plain")]
    TlsToPlaintext = 4,
}

impl SecurityMech {
    /// Every mechanism, in code order
    pub const ALL: [SecurityMech; 5] = [
        SecurityMech::None,
        SecurityMech::Tls,
        SecurityMech::Tls13Fizz,
        SecurityMech::Ktls12,
        SecurityMech::TlsToPlaintext,
    ];

    /// Canonical mechanism name
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityMech::None => PLAIN_TOKEN,
            SecurityMech::Tls => SSL_TOKEN,
            SecurityMech::Tls13Fizz => "fizz",
            SecurityMech::Ktls12 => "ktls12",
            SecurityMech::TlsToPlaintext => "tls_to_plain",
        }
    }

    /// Look up a mechanism by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Check if this mechanism encrypts anything at all
    pub fn is_secure(self) -> bool {
        self != SecurityMech::None
    }

    /// Numeric mechanism code
    pub fn code(self) -> u8 {
        self.into()
    }
}

impl fmt::Display for SecurityMech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityMech {
    type Err = AccessPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AccessPointError::unknown_security(s, s))
    }
}

/// Mapping from security tokens to mechanisms
///
/// `ssl` and `plain` are resolved before the extra tokens, so registering
/// either name as an extra token has no effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityTokenTable {
    /// Mechanism selected by the `ssl` token
    ssl: SecurityMech,
    /// Additional named mechanisms
    extra: BTreeMap<String, SecurityMech>,
}

impl SecurityTokenTable {
    /// Create a table that only understands `ssl` and `plain`, with `ssl`
    /// selecting the given mechanism
    pub fn new(ssl: SecurityMech) -> Self {
        Self {
            ssl,
            extra: BTreeMap::new(),
        }
    }

    /// Also accept the explicit mechanism names (`fizz`, `ktls12`, `tls_to_plain`)
    ///
    /// These widen the endpoint grammar beyond `ssl|plain`; deployments opt in.
    pub fn with_mechanism_names(self) -> Self {
        [
            SecurityMech::Tls13Fizz,
            SecurityMech::Ktls12,
            SecurityMech::TlsToPlaintext,
        ]
        .into_iter()
        .fold(self, |table, mech| table.with_token(mech.as_str(), mech))
    }

    /// Register an extra token
    pub fn with_token(mut self, token: impl Into<String>, mech: SecurityMech) -> Self {
        self.extra.insert(token.into(), mech);
        self
    }

    /// Mechanism selected by the `ssl` token
    pub fn ssl_mechanism(&self) -> SecurityMech {
        self.ssl
    }

    /// Resolve a security token
    pub fn resolve(&self, token: &str) -> Option<SecurityMech> {
        match token {
            PLAIN_TOKEN => Some(SecurityMech::None),
            SSL_TOKEN => Some(self.ssl),
            other => self.extra.get(other).copied(),
        }
    }
}

impl Default for SecurityTokenTable {
    fn default() -> Self {
        Self::new(SecurityMech::Tls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_not_secure() {
        assert!(!SecurityMech::None.is_secure());
        for mech in &SecurityMech::ALL[1..] {
            assert!(mech.is_secure(), "{mech} should be secure");
        }
    }

    #[test]
    fn test_code_round_trip() {
        for mech in SecurityMech::ALL {
            assert_eq!(SecurityMech::from(mech.code()), mech);
        }
        assert_eq!(SecurityMech::from(200u8), SecurityMech::None);
    }

    #[test]
    fn test_default_table_is_ssl_or_plain() {
        let table = SecurityTokenTable::default();
        assert_eq!(table.resolve("ssl"), Some(SecurityMech::Tls));
        assert_eq!(table.resolve("plain"), Some(SecurityMech::None));
        assert_eq!(table.resolve("fizz"), None);
        assert_eq!(table.resolve("ktls12"), None);
        assert_eq!(table.resolve("tls_to_plain"), None);
        assert_eq!(table.resolve("tls"), None);
    }

    #[test]
    fn test_mechanism_names_are_opt_in() {
        let table = SecurityTokenTable::default().with_mechanism_names();
        assert_eq!(table.resolve("ssl"), Some(SecurityMech::Tls));
        assert_eq!(table.resolve("fizz"), Some(SecurityMech::Tls13Fizz));
        assert_eq!(table.resolve("ktls12"), Some(SecurityMech::Ktls12));
        assert_eq!(table.resolve("tls_to_plain"), Some(SecurityMech::TlsToPlaintext));
    }

    #[test]
    fn test_ssl_mapping_is_configurable() {
        let table = SecurityTokenTable::new(SecurityMech::Tls13Fizz);
        assert_eq!(table.resolve("ssl"), Some(SecurityMech::Tls13Fizz));
        assert_eq!(table.ssl_mechanism(), SecurityMech::Tls13Fizz);
    }

    #[test]
    fn test_plain_cannot_be_remapped() {
        let table = SecurityTokenTable::new(SecurityMech::Tls)
            .with_token("plain", SecurityMech::Tls)
            .with_token("mtls", SecurityMech::Tls);
        assert_eq!(table.resolve("plain"), Some(SecurityMech::None));
        assert_eq!(table.resolve("mtls"), Some(SecurityMech::Tls));
        assert_eq!(table.resolve("fizz"), None);
    }

    #[test]
    fn test_security_serde_names() {
        let json = serde_json::to_string(&SecurityMech::TlsToPlaintext).unwrap();
        assert_eq!(json, "\"tls_to_plain\"");
        let parsed: SecurityMech = serde_json::from_str("\"ssl\"").unwrap();
        assert_eq!(parsed, SecurityMech::Tls);
    }
}
