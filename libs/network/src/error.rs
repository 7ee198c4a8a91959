//! Access Point Error Types
//!
//! Every way an endpoint string can be rejected. A failed parse never yields a
//! descriptor, so callers get either a complete `AccessPoint` or one of these.

use thiserror::Error;

/// Access point parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessPointError {
    /// Nothing to parse
    #[error("Empty access point string")]
    Empty,

    /// Host (or unix socket path) segment is empty
    #[error("Empty host in access point '{input}'")]
    EmptyHost { input: String },

    /// No port segment after the host
    #[error("Missing port in access point '{input}'")]
    MissingPort { input: String },

    /// Port segment contains something other than digits
    #[error("Invalid port '{port}' in access point '{input}'")]
    InvalidPort { input: String, port: String },

    /// Port segment is numeric but does not fit in 16 bits
    #[error("Port '{port}' out of range in access point '{input}' (max 65535)")]
    PortOutOfRange { input: String, port: String },

    /// `[` without a matching `]`
    #[error("Unterminated IPv6 bracket in access point '{input}'")]
    UnterminatedBracket { input: String },

    /// Bracketed host is not an IPv6 literal
    #[error("Invalid IPv6 literal '{literal}' in access point '{input}'")]
    InvalidIpv6Literal { input: String, literal: String },

    /// Protocol token is not in the protocol name table
    #[error("Unknown protocol '{token}' in access point '{input}'")]
    UnknownProtocol { input: String, token: String },

    /// Security token is neither ssl, plain nor a registered mechanism
    #[error("Unknown security mechanism '{token}' in access point '{input}'")]
    UnknownSecurity { input: String, token: String },

    /// Compression token is neither compressed nor notcompressed
    #[error("Unknown compression option '{token}' in access point '{input}'")]
    UnknownCompression { input: String, token: String },

    /// More colon-separated segments than the grammar allows
    #[error("Too many segments ({count}) in access point '{input}'")]
    TooManySegments { input: String, count: usize },
}

/// Result type alias for access point operations
pub type Result<T> = std::result::Result<T, AccessPointError>;

impl AccessPointError {
    pub(crate) fn empty_host(input: &str) -> Self {
        Self::EmptyHost {
            input: input.to_string(),
        }
    }

    pub(crate) fn missing_port(input: &str) -> Self {
        Self::MissingPort {
            input: input.to_string(),
        }
    }

    pub(crate) fn invalid_port(input: &str, port: &str) -> Self {
        Self::InvalidPort {
            input: input.to_string(),
            port: port.to_string(),
        }
    }

    pub(crate) fn port_out_of_range(input: &str, port: &str) -> Self {
        Self::PortOutOfRange {
            input: input.to_string(),
            port: port.to_string(),
        }
    }

    pub(crate) fn unterminated_bracket(input: &str) -> Self {
        Self::UnterminatedBracket {
            input: input.to_string(),
        }
    }

    pub(crate) fn invalid_ipv6_literal(input: &str, literal: &str) -> Self {
        Self::InvalidIpv6Literal {
            input: input.to_string(),
            literal: literal.to_string(),
        }
    }

    pub(crate) fn unknown_protocol(input: &str, token: &str) -> Self {
        Self::UnknownProtocol {
            input: input.to_string(),
            token: token.to_string(),
        }
    }

    pub(crate) fn unknown_security(input: &str, token: &str) -> Self {
        Self::UnknownSecurity {
            input: input.to_string(),
            token: token.to_string(),
        }
    }

    pub(crate) fn unknown_compression(input: &str, token: &str) -> Self {
        Self::UnknownCompression {
            input: input.to_string(),
            token: token.to_string(),
        }
    }

    pub(crate) fn too_many_segments(input: &str, count: usize) -> Self {
        Self::TooManySegments {
            input: input.to_string(),
            count,
        }
    }

    /// Parsing is deterministic: the same string fails the same way every time
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get error category for logs and metrics
    pub fn category(&self) -> &'static str {
        match self {
            AccessPointError::Empty => "empty",
            AccessPointError::EmptyHost { .. }
            | AccessPointError::UnterminatedBracket { .. }
            | AccessPointError::InvalidIpv6Literal { .. } => "host",
            AccessPointError::MissingPort { .. }
            | AccessPointError::InvalidPort { .. }
            | AccessPointError::PortOutOfRange { .. } => "port",
            AccessPointError::UnknownProtocol { .. } => "protocol",
            AccessPointError::UnknownSecurity { .. } => "security",
            AccessPointError::UnknownCompression { .. } => "compression",
            AccessPointError::TooManySegments { .. } => "grammar",
        }
    }
}
