//! Endpoint identity snapshot and its pool hash.

use crate::protocol::{McProtocol, SecurityMech};
use crate::transports::TransportType;
use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

/// The fields an endpoint was constructed with
///
/// Captured once and never mutated; two endpoints with equal identities are
/// interchangeable for connection pooling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EndpointIdentity {
    host: String,
    port: u16,
    protocol: McProtocol,
    security_mech: SecurityMech,
    compressed: bool,
    transport: TransportType,
}

impl EndpointIdentity {
    pub(crate) fn new(
        host: String,
        port: u16,
        protocol: McProtocol,
        security_mech: SecurityMech,
        compressed: bool,
        transport: TransportType,
    ) -> Self {
        Self {
            host,
            port,
            protocol,
            security_mech,
            compressed,
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn protocol(&self) -> McProtocol {
        self.protocol
    }

    pub fn security_mech(&self) -> SecurityMech {
        self.security_mech
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn transport(&self) -> TransportType {
        self.transport
    }

    /// Stable 64-bit hash of the identity fields
    ///
    /// Fields are encoded in a fixed order with the host length-prefixed, so
    /// the result does not depend on the process, platform or `std` hasher.
    pub fn stable_hash(&self) -> u64 {
        let mut encoded = Vec::with_capacity(self.host.len() + 16);
        encoded.extend_from_slice(&(self.host.len() as u64).to_le_bytes());
        encoded.extend_from_slice(self.host.as_bytes());
        encoded.extend_from_slice(&self.port.to_le_bytes());
        encoded.push(self.protocol.code());
        encoded.push(self.security_mech.code());
        encoded.push(u8::from(self.compressed));
        encoded.push(self.transport.code());
        xxh3_64(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(host: &str, port: u16) -> EndpointIdentity {
        EndpointIdentity::new(
            host.to_string(),
            port,
            McProtocol::Ascii,
            SecurityMech::None,
            false,
            TransportType::Tcp,
        )
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(
            identity("10.0.0.1", 11211).stable_hash(),
            identity("10.0.0.1", 11211).stable_hash()
        );
    }

    #[test]
    fn test_every_field_participates() {
        let base = identity("10.0.0.1", 11211);
        let hash = base.stable_hash();

        let variants = [
            identity("10.0.0.2", 11211),
            identity("10.0.0.1", 11212),
            EndpointIdentity {
                protocol: McProtocol::Caret,
                ..base.clone()
            },
            EndpointIdentity {
                security_mech: SecurityMech::Tls,
                ..base.clone()
            },
            EndpointIdentity {
                compressed: true,
                ..base.clone()
            },
            EndpointIdentity {
                transport: TransportType::Unix,
                ..base.clone()
            },
        ];

        for variant in &variants {
            assert_ne!(variant.stable_hash(), hash, "{variant:?} collided");
        }
    }

    #[test]
    fn test_host_boundary_is_unambiguous() {
        // "a1" + port vs "a" + port with a leading 1 byte must not collide
        let a = identity("a1", 0x0203);
        let b = identity("a", 0x0203);
        assert_ne!(a.stable_hash(), b.stable_hash());
    }
}
