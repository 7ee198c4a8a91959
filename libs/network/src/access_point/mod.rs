//! Access Points
//!
//! An [`AccessPoint`] names one cache server: host, port, wire protocol,
//! transport security, compression and transport kind, plus the failure domain
//! routing uses to spread replicas.
//!
//! The identity (everything but the failure domain) is snapshotted and hashed
//! once at construction. Port, security mechanism and compression can change
//! afterwards (e.g. a TLS upgrade) without moving the endpoint to a different
//! connection pool, so `identity_hash()`, `Eq` and `Hash` only ever see the snapshot.
//!
//! Descriptors are shared as `Arc<AccessPoint>`. The mutable attributes live in
//! atomics: readers never lock, and mutators take `&self`.

mod defaults;
mod identity;
mod parse;

pub use defaults::AccessPointDefaults;
pub use identity::EndpointIdentity;

use crate::protocol::security::{PLAIN_TOKEN, SSL_TOKEN};
use crate::protocol::{McProtocol, SecurityMech, SecurityTokenTable};
use crate::transports::{TransportType, UNIX_SOCKET_PREFIX};
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A cache server endpoint
pub struct AccessPoint {
    identity: EndpointIdentity,
    hash: u64,
    is_v6: bool,
    failure_domain: u32,
    port: AtomicU16,
    security_mech: AtomicU8,
    compressed: AtomicBool,
}

impl AccessPoint {
    /// Build an endpoint field by field
    ///
    /// `is_v6` is derived from `host`; unix domain sockets never are, and
    /// their port is always 0.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        protocol: McProtocol,
        security_mech: SecurityMech,
        compressed: bool,
        transport: TransportType,
        failure_domain: u32,
    ) -> Self {
        let host = host.into();
        let port = if transport.is_unix() { 0 } else { port };
        let is_v6 = !transport.is_unix() && host.parse::<Ipv6Addr>().is_ok();
        let identity = EndpointIdentity::new(
            host,
            port,
            protocol,
            security_mech,
            compressed,
            transport,
        );
        let hash = identity.stable_hash();

        Self {
            identity,
            hash,
            is_v6,
            failure_domain,
            port: AtomicU16::new(port),
            security_mech: AtomicU8::new(security_mech.code()),
            compressed: AtomicBool::new(compressed),
        }
    }

    /// Build a plain TCP endpoint for an IP address
    ///
    /// Protocol is unknown, security none, compression off.
    pub fn from_ip(addr: IpAddr, port: u16, failure_domain: u32) -> Self {
        Self::new(
            addr.to_string(),
            port,
            McProtocol::Unknown,
            SecurityMech::None,
            false,
            TransportType::Tcp,
            failure_domain,
        )
    }

    /// Build a plain TCP endpoint for a socket address
    pub fn from_socket_addr(addr: SocketAddr, failure_domain: u32) -> Self {
        Self::from_ip(addr.ip(), addr.port(), failure_domain)
    }

    /// Parse an endpoint string
    ///
    /// Accepts `host:port[:protocol[:(ssl|plain)[:(compressed|notcompressed)]]]`,
    /// bracketed IPv6 hosts and `unix:path[...]`. Missing segments take the
    /// given defaults; a nonzero `port_override` replaces the parsed port.
    /// `ssl` maps through the default [`SecurityTokenTable`].
    pub fn create(
        ap_string: &str,
        default_protocol: McProtocol,
        default_mech: SecurityMech,
        port_override: u16,
        default_compressed: bool,
        failure_domain: u32,
    ) -> Result<Arc<AccessPoint>> {
        let defaults = AccessPointDefaults::new(default_protocol)
            .with_security_mech(default_mech)
            .with_port_override(port_override)
            .with_compression(default_compressed)
            .with_failure_domain(failure_domain)
            .with_security_tokens(SecurityTokenTable::default());

        Self::create_with(ap_string, &defaults)
    }

    /// Parse an endpoint string with a full set of defaults
    pub fn create_with(ap_string: &str, defaults: &AccessPointDefaults) -> Result<Arc<AccessPoint>> {
        match parse::parse(ap_string, defaults) {
            Ok(ap) => Ok(Arc::new(ap)),
            Err(e) => {
                debug!(
                    input = ap_string,
                    category = e.category(),
                    "Rejected access point: {}",
                    e
                );
                Err(e)
            }
        }
    }

    pub fn host(&self) -> &str {
        self.identity.host()
    }

    pub fn port(&self) -> u16 {
        self.port.load(Ordering::Relaxed)
    }

    pub fn protocol(&self) -> McProtocol {
        self.identity.protocol()
    }

    pub fn security_mech(&self) -> SecurityMech {
        SecurityMech::from(self.security_mech.load(Ordering::Relaxed))
    }

    /// Check if the connection must be encrypted
    pub fn use_ssl(&self) -> bool {
        self.security_mech().is_secure()
    }

    pub fn compressed(&self) -> bool {
        self.compressed.load(Ordering::Relaxed)
    }

    pub fn transport(&self) -> TransportType {
        self.identity.transport()
    }

    pub fn is_unix_domain_socket(&self) -> bool {
        self.transport().is_unix()
    }

    pub fn is_v6(&self) -> bool {
        self.is_v6
    }

    pub fn failure_domain(&self) -> u32 {
        self.failure_domain
    }

    /// Connection pool key, fixed at construction
    pub fn identity_hash(&self) -> u64 {
        self.hash
    }

    /// Fields the pool key was derived from
    pub fn identity(&self) -> &EndpointIdentity {
        &self.identity
    }

    /// `host:port`, or `[host]:port` for IPv6
    ///
    /// Unix sockets have no port and render as `unix:path`, the form the
    /// parser reads back, rather than `path:0`.
    pub fn to_host_port_string(&self) -> String {
        if self.is_unix_domain_socket() {
            format!("{}{}", UNIX_SOCKET_PREFIX, self.host())
        } else if self.is_v6 {
            format!("[{}]:{}", self.host(), self.port())
        } else {
            format!("{}:{}", self.host(), self.port())
        }
    }

    pub fn set_port(&self, port: u16) {
        self.port.store(port, Ordering::Relaxed);
    }

    pub fn set_security_mech(&self, mech: SecurityMech) {
        let previous = SecurityMech::from(self.security_mech.swap(mech.code(), Ordering::Relaxed));
        if previous != mech {
            debug!(
                endpoint = %self.to_host_port_string(),
                "Security mechanism changed: {} -> {}",
                previous,
                mech
            );
        }
    }

    /// Turn compression off; no-op when already off
    pub fn disable_compression(&self) {
        self.compressed.store(false, Ordering::Relaxed);
    }

    /// Current state for structured diagnostics
    pub fn snapshot(&self) -> AccessPointSnapshot {
        AccessPointSnapshot {
            host: self.host().to_string(),
            port: self.port(),
            protocol: self.protocol(),
            security_mech: self.security_mech(),
            compressed: self.compressed(),
            transport: self.transport(),
            is_v6: self.is_v6,
            failure_domain: self.failure_domain,
            hash: self.hash,
        }
    }
}

/// `<host-port>:<protocol>:(ssl|plain)`
///
/// Compression and failure domain are left out.
impl fmt::Display for AccessPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let security = if self.use_ssl() { SSL_TOKEN } else { PLAIN_TOKEN };
        write!(
            f,
            "{}:{}:{}",
            self.to_host_port_string(),
            self.protocol(),
            security
        )
    }
}

impl fmt::Debug for AccessPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessPoint")
            .field("host", &self.host())
            .field("port", &self.port())
            .field("protocol", &self.protocol())
            .field("security_mech", &self.security_mech())
            .field("compressed", &self.compressed())
            .field("transport", &self.transport())
            .field("failure_domain", &self.failure_domain)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}

impl Clone for AccessPoint {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            hash: self.hash,
            is_v6: self.is_v6,
            failure_domain: self.failure_domain,
            port: AtomicU16::new(self.port()),
            security_mech: AtomicU8::new(self.security_mech().code()),
            compressed: AtomicBool::new(self.compressed()),
        }
    }
}

impl PartialEq for AccessPoint {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.identity == other.identity
    }
}

impl Eq for AccessPoint {}

impl Hash for AccessPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// Point-in-time view of an [`AccessPoint`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessPointSnapshot {
    pub host: String,
    pub port: u16,
    pub protocol: McProtocol,
    pub security_mech: SecurityMech,
    pub compressed: bool,
    pub transport: TransportType,
    pub is_v6: bool,
    pub failure_domain: u32,
    pub hash: u64,
}
