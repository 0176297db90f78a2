//! Per-component percent-encode sets and streaming encoders.
//!
//! Encoding is idempotent on already-encoded input: `%` is never escaped
//! by these sets, so a `%HH` triple passes through as three ASCII bytes.

use crate::compat::{Cow, String, Vec};
use crate::error::{ParseError, Result, ValidationError};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// C0 control percent-encode set
pub const C0_SET: &AsciiSet = CONTROLS;

/// Fragment percent-encode set: C0 + space, `"`, `<`, `>`, backtick
pub const FRAGMENT_SET: &AsciiSet = &C0_SET.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Path percent-encode set: fragment + `#`, `?`, `{`, `}`
pub const PATH_SET: &AsciiSet = &FRAGMENT_SET.add(b'#').add(b'?').add(b'{').add(b'}');

/// Userinfo percent-encode set: path + `/`, `:`, `;`, `=`, `@`, `[`, `\`, `]`, `^`, `|`
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Query percent-encode set for non-special schemes: C0 + space, `"`, `<`, `>`, `#`
pub const QUERY_SET: &AsciiSet = &C0_SET.add(b' ').add(b'"').add(b'<').add(b'>').add(b'#');

/// Query percent-encode set for special schemes: non-special + `'`
pub const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

/// Percent-encode `bytes` into `buffer` with the given set.
///
/// The bytes must be valid UTF-8; multi-byte sequences are escaped
/// byte-by-byte with uppercase `%HH`.
pub fn encode_into(buffer: &mut String, bytes: &[u8], set: &'static AsciiSet) -> Result<()> {
    let text = core::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
    buffer.reserve(text.len());
    for chunk in utf8_percent_encode(text, set) {
        buffer.push_str(chunk);
    }
    Ok(())
}

/// Walk `bytes` from the back, handing each encoded chunk (one scalar's
/// worth) to `emit`. Prepending every chunk reproduces the output of
/// [`encode_into`]; used when a path is assembled back-to-front.
pub fn encode_reverse<F: FnMut(&str)>(
    bytes: &[u8],
    set: &'static AsciiSet,
    mut emit: F,
) -> Result<()> {
    let text = core::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
    let mut utf8 = [0u8; 4];
    let mut escaped = String::new();
    for ch in text.chars().rev() {
        escaped.clear();
        for chunk in utf8_percent_encode(ch.encode_utf8(&mut utf8), set) {
            escaped.push_str(chunk);
        }
        emit(&escaped);
    }
    Ok(())
}

/// Percent-encode raw bytes without a UTF-8 requirement; used for opaque
/// hosts where the byte values are kept as-is
pub fn encode_bytes_into(buffer: &mut String, bytes: &[u8], set: &'static AsciiSet) {
    for chunk in percent_encoding::percent_encode(bytes, set) {
        buffer.push_str(chunk);
    }
}

/// Decode `%HH` triples; malformed escapes pass through untouched
pub fn decode(input: &[u8]) -> Cow<'_, [u8]> {
    percent_encoding::percent_decode(input).into()
}

/// Check that every `%` heads a hex triple and every decoded scalar is a
/// URL code point. Each violation kind is recorded at most once per span.
pub fn validate_escapes(bytes: &[u8], errors: &mut Vec<ValidationError>) {
    let mut i = 0;
    let mut bad_escape = false;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 < bytes.len()
                && crate::ascii::is_hex_digit(bytes[i + 1])
                && crate::ascii::is_hex_digit(bytes[i + 2])
            {
                i += 3;
                continue;
            }
            bad_escape = true;
        }
        i += 1;
    }
    if bad_escape {
        errors.push(ValidationError::UnescapedPercentSign);
    }
    if let Ok(text) = core::str::from_utf8(bytes)
        && text
            .chars()
            .any(|c| c != '%' && !crate::ascii::is_url_code_point(c))
    {
        errors.push(ValidationError::InvalidUrlCodePoint);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8], set: &'static AsciiSet) -> String {
        let mut out = String::new();
        encode_into(&mut out, bytes, set).unwrap();
        out
    }

    #[test]
    fn test_fragment_set() {
        assert_eq!(encode(b"a b", FRAGMENT_SET), "a%20b");
        assert_eq!(encode(b"<\">`", FRAGMENT_SET), "%3C%22%3E%60");
        // '#' passes through in fragments
        assert_eq!(encode(b"a#b", FRAGMENT_SET), "a#b");
    }

    #[test]
    fn test_path_set() {
        assert_eq!(encode(b"a#b?c", PATH_SET), "a%23b%3Fc");
        assert_eq!(encode(b"{x}", PATH_SET), "%7Bx%7D");
        assert_eq!(encode(b"a/b", PATH_SET), "a/b");
    }

    #[test]
    fn test_userinfo_set() {
        assert_eq!(encode(b"u:p@h", USERINFO_SET), "u%3Ap%40h");
        assert_eq!(encode(b"[\\]^|", USERINFO_SET), "%5B%5C%5D%5E%7C");
    }

    #[test]
    fn test_query_sets() {
        assert_eq!(encode(b"a'b", QUERY_SET), "a'b");
        assert_eq!(encode(b"a'b", SPECIAL_QUERY_SET), "a%27b");
        assert_eq!(encode(b"a#b", QUERY_SET), "a%23b");
    }

    #[test]
    fn test_utf8_and_idempotence() {
        assert_eq!(encode("é".as_bytes(), PATH_SET), "%C3%A9");
        // a second pass leaves the triple alone
        assert_eq!(encode(b"%C3%A9", PATH_SET), "%C3%A9");
        assert!(encode_into(&mut String::new(), b"\xFF", PATH_SET).is_err());
    }

    #[test]
    fn test_encode_reverse_matches_forward() {
        let input = "a b/é{x}".as_bytes();
        let forward = encode(input, PATH_SET);
        let mut backward = String::new();
        encode_reverse(input, PATH_SET, |chunk| {
            backward.insert_str(0, chunk);
        })
        .unwrap();
        assert_eq!(backward, forward);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(b"hello%20world").as_ref(), b"hello world");
        assert_eq!(decode(b"%2F").as_ref(), b"/");
        assert_eq!(decode(b"plain").as_ref(), b"plain");
        // malformed escapes survive
        assert_eq!(decode(b"%zz").as_ref(), b"%zz");
    }

    #[test]
    fn test_validate_escapes() {
        let mut errors = Vec::new();
        validate_escapes(b"ok%41", &mut errors);
        assert!(errors.is_empty());

        validate_escapes(b"%4", &mut errors);
        assert_eq!(errors, [ValidationError::UnescapedPercentSign]);

        errors.clear();
        validate_escapes(b"a\"b", &mut errors);
        assert_eq!(errors, [ValidationError::InvalidUrlCodePoint]);
    }
}
