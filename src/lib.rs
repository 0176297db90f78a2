#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod ascii;
mod error;
mod filter;
mod host;
mod parser;
mod scheme;
mod url;

/// Escape sets and streaming percent-encoders
pub mod percent;

// Public API
pub use error::{
    HostParseError, Ipv4ParseError, Ipv6ParseError, ParseError, ValidationError,
};
pub use host::{Host, parse_host};
pub use scheme::SchemeKind;
pub use url::{Component, Components, Url};

pub type Result<T> = core::result::Result<T, ParseError>;

/// Parse a URL from raw bytes against an optional base URL.
///
/// # Errors
///
/// Returns the first fatal [`ParseError`]. Use
/// [`Url::parse_with_errors`] to also collect non-fatal violations.
pub fn parse(input: &[u8], base: Option<&Url>) -> Result<Url> {
    Url::parse(input, base)
}
