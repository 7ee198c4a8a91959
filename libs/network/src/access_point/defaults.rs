//! Defaults applied to segments an endpoint string leaves out.

use crate::protocol::{McProtocol, SecurityMech, SecurityTokenTable};
use serde::{Deserialize, Serialize};

/// Parser defaults for [`AccessPoint::create_with`](super::AccessPoint::create_with)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPointDefaults {
    /// Protocol used when the string names none
    pub protocol: McProtocol,
    /// Security mechanism used when the string names none
    pub security_mech: SecurityMech,
    /// Replaces the parsed port when nonzero
    pub port_override: u16,
    /// Compression used when the string names none
    pub compressed: bool,
    /// Failure domain stamped on every parsed endpoint
    pub failure_domain: u32,
    /// How security tokens map onto mechanisms
    pub security_tokens: SecurityTokenTable,
}

impl AccessPointDefaults {
    /// Defaults for the given protocol, everything else off
    pub fn new(protocol: McProtocol) -> Self {
        Self {
            protocol,
            security_mech: SecurityMech::None,
            port_override: 0,
            compressed: false,
            failure_domain: 0,
            security_tokens: SecurityTokenTable::default(),
        }
    }

    pub fn with_security_mech(mut self, mech: SecurityMech) -> Self {
        self.security_mech = mech;
        self
    }

    pub fn with_port_override(mut self, port: u16) -> Self {
        self.port_override = port;
        self
    }

    pub fn with_compression(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn with_failure_domain(mut self, failure_domain: u32) -> Self {
        self.failure_domain = failure_domain;
        self
    }

    pub fn with_security_tokens(mut self, tokens: SecurityTokenTable) -> Self {
        self.security_tokens = tokens;
        self
    }
}

impl Default for AccessPointDefaults {
    fn default() -> Self {
        Self::new(McProtocol::Ascii)
    }
}
