//! Host parsing: domains, IPv4 and IPv6 literals, opaque hosts.

pub mod ipv4;
pub mod ipv6;

use crate::ascii::{ascii_lowercase, is_forbidden_host_code_point};
use crate::compat::String;
use crate::error::HostParseError;
use crate::percent;

/// A parsed host. Constructed only by [`parse_host`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// ASCII-lowercased registrable domain
    Domain(String),
    /// 32-bit address stored big-endian
    Ipv4(u32),
    /// Eight 16-bit groups
    Ipv6([u16; 8]),
    /// Percent-encoded host of a non-special URL
    Opaque(String),
    /// Non-special schemes, and `file` after localhost normalization
    Empty,
}

impl Host {
    /// Append the canonical host serialization; IPv6 gets its brackets
    /// back here.
    pub fn write_into(&self, out: &mut String) {
        match self {
            Self::Domain(domain) => out.push_str(domain),
            Self::Ipv4(address) => out.push_str(&ipv4::serialize(*address)),
            Self::Ipv6(pieces) => {
                out.push('[');
                out.push_str(&ipv6::serialize(pieces));
                out.push(']');
            }
            Self::Opaque(host) => out.push_str(host),
            Self::Empty => {}
        }
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }
}

impl core::fmt::Display for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Domain(domain) | Self::Opaque(domain) => f.write_str(domain),
            Self::Ipv4(address) => f.write_str(&ipv4::serialize(*address)),
            Self::Ipv6(pieces) => write!(f, "[{}]", ipv6::serialize(pieces)),
            Self::Empty => Ok(()),
        }
    }
}

/// Parse host bytes as they appear between the authority separators.
///
/// `is_not_special` selects opaque-host handling; special schemes go
/// through percent-decoding, lowercasing and the IPv4 heuristic.
pub fn parse_host(input: &[u8], is_not_special: bool) -> Result<Host, HostParseError> {
    if let Some(rest) = input.strip_prefix(b"[") {
        let Some(interior) = rest.strip_suffix(b"]") else {
            return Err(HostParseError::UnclosedIpv6);
        };
        return Ok(Host::Ipv6(ipv6::parse(interior)?));
    }

    if is_not_special {
        return parse_opaque(input);
    }

    validate_escape_triples(input)?;
    let decoded = percent::decode(input);

    let mut domain = String::with_capacity(decoded.len());
    if decoded.is_ascii() {
        for &b in decoded.iter() {
            if is_forbidden_host_code_point(b) {
                return Err(HostParseError::ForbiddenCodePoint);
            }
            domain.push(ascii_lowercase(b) as char);
        }
    } else {
        let unicode =
            core::str::from_utf8(&decoded).map_err(|_| HostParseError::InvalidPercentEncoding)?;
        domain = idna::domain_to_ascii(unicode).map_err(|_| HostParseError::Idna)?;
        if domain.bytes().any(is_forbidden_host_code_point) {
            return Err(HostParseError::ForbiddenCodePoint);
        }
    }

    if domain.is_empty() {
        return Err(HostParseError::EmptyHost);
    }

    if ipv4::ends_in_numeric_label(domain.as_bytes()) {
        return Ok(Host::Ipv4(ipv4::parse(domain.as_bytes())?));
    }

    Ok(Host::Domain(domain))
}

fn parse_opaque(input: &[u8]) -> Result<Host, HostParseError> {
    if input.is_empty() {
        return Ok(Host::Empty);
    }
    if input
        .iter()
        .any(|&b| b != b'%' && is_forbidden_host_code_point(b))
    {
        return Err(HostParseError::ForbiddenCodePoint);
    }

    let mut encoded = String::with_capacity(input.len());
    percent::encode_bytes_into(&mut encoded, input, percent::C0_SET);
    Ok(Host::Opaque(encoded))
}

/// Every `%` in a to-be-decoded host must head a full hex triple
fn validate_escape_triples(input: &[u8]) -> Result<(), HostParseError> {
    let mut i = 0;
    while let Some(pos) = memchr::memchr(b'%', &input[i..]) {
        let at = i + pos;
        if at + 2 >= input.len()
            || !crate::ascii::is_hex_digit(input[at + 1])
            || !crate::ascii::is_hex_digit(input[at + 2])
        {
            return Err(HostParseError::InvalidPercentEncoding);
        }
        i = at + 3;
    }
    Ok(())
}
