/// Errors that abort a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input has no scheme and no base URL was supplied
    MissingSchemeNonRelativeUrl,
    /// First scheme byte is not ASCII alpha (setter mode only)
    InvalidSchemeStart,
    /// Port value exceeds 65535
    PortOutOfRange,
    /// Port contains non-digit bytes
    PortInvalid,
    /// Special scheme with an empty host
    EmptyHostSpecialScheme,
    /// Host is structurally invalid
    HostInvalid,
    /// The host sub-parser rejected the host
    HostParser(HostParseError),
    /// An `@` with no credential bytes before it
    MissingCredentials,
    /// Non-UTF-8 bytes in a unicode-accepting component
    InvalidUtf8,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingSchemeNonRelativeUrl => f.write_str("missing scheme in non-relative URL"),
            Self::InvalidSchemeStart => f.write_str("invalid first scheme byte"),
            Self::PortOutOfRange => f.write_str("port out of range"),
            Self::PortInvalid => f.write_str("invalid port"),
            Self::EmptyHostSpecialScheme => f.write_str("empty host in special scheme"),
            Self::HostInvalid => f.write_str("invalid host"),
            Self::HostParser(e) => write!(f, "host parser: {e}"),
            Self::MissingCredentials => f.write_str("missing credentials before '@'"),
            Self::InvalidUtf8 => f.write_str("invalid UTF-8"),
        }
    }
}

impl From<HostParseError> for ParseError {
    fn from(e: HostParseError) -> Self {
        Self::HostParser(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Violations that are reported but do not abort the parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    UnexpectedC0ControlOrSpace,
    UnexpectedAsciiTabOrNewline,
    FileSchemeMissingFollowingSolidus,
    InvalidScheme,
    RelativeUrlMissingBeginningSolidus,
    UnexpectedReverseSolidus,
    MissingSolidusBeforeAuthority,
    UnexpectedCommercialAt,
    UnexpectedPortWithoutHost,
    UnexpectedWindowsDriveLetter,
    UnexpectedWindowsDriveLetterHost,
    UnexpectedHostFileScheme,
    UnexpectedEmptyPath,
    InvalidUrlCodePoint,
    UnescapedPercentSign,
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::UnexpectedC0ControlOrSpace => "leading or trailing C0 control or space",
            Self::UnexpectedAsciiTabOrNewline => "ASCII tab or newline in input",
            Self::FileSchemeMissingFollowingSolidus => "file scheme not followed by '//'",
            Self::InvalidScheme => "scheme-like prefix is not a valid scheme",
            Self::RelativeUrlMissingBeginningSolidus => "relative URL without leading solidus",
            Self::UnexpectedReverseSolidus => "'\\' used as a separator",
            Self::MissingSolidusBeforeAuthority => "expected '//' before authority",
            Self::UnexpectedCommercialAt => "credentials embedded in URL",
            Self::UnexpectedPortWithoutHost => "port with no host",
            Self::UnexpectedWindowsDriveLetter => "Windows drive letter in relative file URL",
            Self::UnexpectedWindowsDriveLetterHost => "Windows drive letter in host position",
            Self::UnexpectedHostFileScheme => "file URL host dropped for drive letter",
            Self::UnexpectedEmptyPath => "extra empty path segment collapsed",
            Self::InvalidUrlCodePoint => "code point not allowed unescaped in URLs",
            Self::UnescapedPercentSign => "'%' not followed by two hex digits",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

/// Host-level failures, fatal when the scheme requires a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostParseError {
    /// `[` without a closing `]`
    UnclosedIpv6,
    Ipv6(Ipv6ParseError),
    Ipv4(Ipv4ParseError),
    /// A forbidden host code point in a domain or opaque host
    ForbiddenCodePoint,
    EmptyHost,
    /// Malformed percent escape, or a decode that produced non-UTF-8
    InvalidPercentEncoding,
    /// IDNA transcoding rejected the domain
    Idna,
}

impl core::fmt::Display for HostParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnclosedIpv6 => f.write_str("unclosed IPv6 literal"),
            Self::Ipv6(e) => write!(f, "invalid IPv6 address: {e}"),
            Self::Ipv4(e) => write!(f, "invalid IPv4 address: {e}"),
            Self::ForbiddenCodePoint => f.write_str("forbidden host code point"),
            Self::EmptyHost => f.write_str("empty host"),
            Self::InvalidPercentEncoding => f.write_str("invalid percent encoding in host"),
            Self::Idna => f.write_str("IDNA processing failed"),
        }
    }
}

impl From<Ipv6ParseError> for HostParseError {
    fn from(e: Ipv6ParseError) -> Self {
        Self::Ipv6(e)
    }
}

impl From<Ipv4ParseError> for HostParseError {
    fn from(e: Ipv4ParseError) -> Self {
        Self::Ipv4(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HostParseError {}

/// IPv6 literal violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv6ParseError {
    UnexpectedLeadingColon,
    UnexpectedTrailingColon,
    UnexpectedCharacter,
    MultipleCompressedPieces,
    InvalidPositionForIpv4Address,
    NotEnoughPieces,
    TooManyPieces,
    InvalidIpv4(Ipv4ParseError),
    EmptyInput,
}

impl core::fmt::Display for Ipv6ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::UnexpectedLeadingColon => "unexpected leading ':'",
            Self::UnexpectedTrailingColon => "unexpected trailing ':'",
            Self::UnexpectedCharacter => "unexpected character",
            Self::MultipleCompressedPieces => "more than one '::'",
            Self::InvalidPositionForIpv4Address => "IPv4 tail in invalid position",
            Self::NotEnoughPieces => "not enough pieces",
            Self::TooManyPieces => "too many pieces",
            Self::InvalidIpv4(e) => return write!(f, "embedded IPv4: {e}"),
            Self::EmptyInput => "empty IPv6 literal",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Ipv6ParseError {}

/// IPv4 literal violations, shared by the relaxed and strict parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4ParseError {
    PieceOverflows,
    TooManyPieces,
    PieceBeginsWithInvalidCharacter,
    UnsupportedRadix,
    InvalidCharacter,
    EmptyPiece,
}

impl core::fmt::Display for Ipv4ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::PieceOverflows => "piece overflows its width",
            Self::TooManyPieces => "too many pieces",
            Self::PieceBeginsWithInvalidCharacter => "piece begins with invalid character",
            Self::UnsupportedRadix => "unsupported radix",
            Self::InvalidCharacter => "invalid character",
            Self::EmptyPiece => "empty piece",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Ipv4ParseError {}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;
