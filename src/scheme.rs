use crate::ascii::ascii_lowercase;

/// URL scheme classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeKind {
    #[default]
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    Other,
}

impl SchemeKind {
    /// Check if this is a special scheme
    pub fn is_special(self) -> bool {
        self != Self::Other
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::File | Self::Other => None,
        }
    }
}

/// Classify raw (possibly mixed-case) scheme bytes.
/// Filters by length + first byte before the full comparison.
pub fn scheme_kind(scheme: &[u8]) -> SchemeKind {
    match (scheme.len(), scheme.first().map(|&b| ascii_lowercase(b))) {
        (2, Some(b'w')) if eq_lowercase(scheme, b"ws") => SchemeKind::Ws,
        (3, Some(b'w')) if eq_lowercase(scheme, b"wss") => SchemeKind::Wss,
        (3, Some(b'f')) if eq_lowercase(scheme, b"ftp") => SchemeKind::Ftp,
        (4, Some(b'h')) if eq_lowercase(scheme, b"http") => SchemeKind::Http,
        (4, Some(b'f')) if eq_lowercase(scheme, b"file") => SchemeKind::File,
        (5, Some(b'h')) if eq_lowercase(scheme, b"https") => SchemeKind::Https,
        _ => SchemeKind::Other,
    }
}

fn eq_lowercase(input: &[u8], lower: &[u8]) -> bool {
    input.len() == lower.len()
        && input
            .iter()
            .zip(lower)
            .all(|(&a, &b)| ascii_lowercase(a) == b)
}
