//! Endpoint string grammar
//!
//! ```text
//! host:port[:protocol[:security[:compression]]]
//! [ipv6]:port[:protocol[:security[:compression]]]
//! unix:path[:protocol[:security[:compression]]]
//! ```
//!
//! Unbracketed IPv6 hosts are split at the last colon before a numeric port:
//! the longest colon-joined prefix that is an IPv6 literal and is followed by
//! an all-digit segment wins, otherwise the first segment is the host.

use super::defaults::AccessPointDefaults;
use super::AccessPoint;
use crate::protocol::{CompressionPolicy, McProtocol};
use crate::transports::{TransportType, UNIX_SOCKET_PREFIX};
use crate::{AccessPointError, Result};
use std::net::Ipv6Addr;

/// Segments allowed after the port: protocol, security, compression
const MAX_OPTION_SEGMENTS: usize = 3;

/// Host/port split of an endpoint string
#[derive(Debug, PartialEq, Eq)]
struct HostPort<'a> {
    host: &'a str,
    port: u16,
    transport: TransportType,
    /// Everything after the port separator, if anything follows
    options: Option<&'a str>,
}

pub(super) fn parse(input: &str, defaults: &AccessPointDefaults) -> Result<AccessPoint> {
    if input.is_empty() {
        return Err(AccessPointError::Empty);
    }

    let host_port = split_host_port(input)?;

    let options: Vec<&str> = host_port
        .options
        .map(|rest| rest.split(':').collect())
        .unwrap_or_default();
    if options.len() > MAX_OPTION_SEGMENTS {
        let fixed = if host_port.transport.is_unix() { 1 } else { 2 };
        return Err(AccessPointError::too_many_segments(
            input,
            fixed + options.len(),
        ));
    }

    let mut protocol = defaults.protocol;
    let mut security_mech = defaults.security_mech;
    let mut compressed = defaults.compressed;

    if let Some(token) = present(&options, 0) {
        protocol = McProtocol::from_name(token)
            .filter(|p| *p != McProtocol::Unknown)
            .ok_or_else(|| AccessPointError::unknown_protocol(input, token))?;
    }
    if let Some(token) = present(&options, 1) {
        security_mech = defaults
            .security_tokens
            .resolve(token)
            .ok_or_else(|| AccessPointError::unknown_security(input, token))?;
    }
    if let Some(token) = present(&options, 2) {
        compressed = CompressionPolicy::from_token(token)
            .ok_or_else(|| AccessPointError::unknown_compression(input, token))?
            .is_enabled();
    }

    let port = match host_port.transport {
        TransportType::Unix => 0,
        TransportType::Tcp if defaults.port_override != 0 => defaults.port_override,
        TransportType::Tcp => host_port.port,
    };

    Ok(AccessPoint::new(
        host_port.host,
        port,
        protocol,
        security_mech,
        compressed,
        host_port.transport,
        defaults.failure_domain,
    ))
}

/// Optional segment at `index`, treating an empty segment as absent
fn present<'a>(options: &[&'a str], index: usize) -> Option<&'a str> {
    options.get(index).copied().filter(|token| !token.is_empty())
}

fn split_host_port(input: &str) -> Result<HostPort<'_>> {
    if let Some(body) = input.strip_prefix(UNIX_SOCKET_PREFIX) {
        return split_unix(input, body);
    }
    if input.starts_with('/') {
        return split_unix(input, input);
    }
    if let Some(bracketed) = input.strip_prefix('[') {
        return split_bracketed(input, bracketed);
    }

    let segments: Vec<&str> = input.split(':').collect();
    if segments.len() < 2 {
        if input.is_empty() {
            return Err(AccessPointError::empty_host(input));
        }
        return Err(AccessPointError::missing_port(input));
    }

    let boundary = ipv6_boundary(&segments).unwrap_or(1);
    // boundary segments joined by boundary - 1 colons
    let host_len = segments[..boundary].iter().map(|s| s.len()).sum::<usize>() + boundary - 1;
    let host = &input[..host_len];
    if host.is_empty() {
        return Err(AccessPointError::empty_host(input));
    }

    let (port, options) = split_port(input, &input[host_len + 1..])?;
    Ok(HostPort {
        host,
        port,
        transport: TransportType::Tcp,
        options,
    })
}

fn split_unix<'a>(input: &'a str, body: &'a str) -> Result<HostPort<'a>> {
    let (path, options) = match body.split_once(':') {
        Some((path, rest)) => (path, Some(rest)),
        None => (body, None),
    };
    if path.is_empty() {
        return Err(AccessPointError::empty_host(input));
    }

    Ok(HostPort {
        host: path,
        port: 0,
        transport: TransportType::Unix,
        options,
    })
}

fn split_bracketed<'a>(input: &'a str, bracketed: &'a str) -> Result<HostPort<'a>> {
    let close = bracketed
        .find(']')
        .ok_or_else(|| AccessPointError::unterminated_bracket(input))?;
    let literal = &bracketed[..close];
    if literal.is_empty() {
        return Err(AccessPointError::empty_host(input));
    }
    if literal.parse::<Ipv6Addr>().is_err() {
        return Err(AccessPointError::invalid_ipv6_literal(input, literal));
    }

    let after = bracketed[close + 1..]
        .strip_prefix(':')
        .ok_or_else(|| AccessPointError::missing_port(input))?;
    let (port, options) = split_port(input, after)?;

    Ok(HostPort {
        host: literal,
        port,
        transport: TransportType::Tcp,
        options,
    })
}

/// Number of leading segments forming an unbracketed IPv6 host, if any
fn ipv6_boundary(segments: &[&str]) -> Option<usize> {
    (2..segments.len()).rev().find(|&boundary| {
        is_all_digits(segments[boundary])
            && segments[..boundary].join(":").parse::<Ipv6Addr>().is_ok()
    })
}

fn split_port<'a>(input: &str, after_host: &'a str) -> Result<(u16, Option<&'a str>)> {
    let (port, options) = match after_host.split_once(':') {
        Some((port, rest)) => (port, Some(rest)),
        None => (after_host, None),
    };

    if port.is_empty() {
        return Err(AccessPointError::missing_port(input));
    }
    if !is_all_digits(port) {
        return Err(AccessPointError::invalid_port(input, port));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| AccessPointError::port_out_of_range(input, port))?;

    Ok((port, options))
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
