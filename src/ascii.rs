//! Byte-level classification shared by the scanner, the host parser and
//! the path normalizer.

pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

pub fn is_alphanumeric(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// `A`-`Z` folded to lowercase, everything else unchanged
pub fn ascii_lowercase(b: u8) -> u8 {
    if b.is_ascii_uppercase() { b | 0x20 } else { b }
}

/// `.`, `%2e` or `%2E`
pub fn is_single_dot_segment(s: &[u8]) -> bool {
    match s {
        b"." => true,
        [b'%', b'2', b'e' | b'E'] => true,
        _ => false,
    }
}

/// Two dots, each either literal or percent-encoded
pub fn is_double_dot_segment(s: &[u8]) -> bool {
    match s.len() {
        2 => s == b"..",
        4 => {
            (s[0] == b'.' && is_single_dot_segment(&s[1..]))
                || (is_single_dot_segment(&s[..3]) && s[3] == b'.')
        }
        6 => is_single_dot_segment(&s[..3]) && is_single_dot_segment(&s[3..]),
        _ => false,
    }
}

/// Exactly two bytes: ASCII alpha then `:` or `|`
pub fn is_windows_drive_letter(s: &[u8]) -> bool {
    s.len() == 2 && is_alpha(s[0]) && matches!(s[1], b':' | b'|')
}

/// As [`is_windows_drive_letter`] but the separator must already be `:`
pub fn is_normalized_windows_drive_letter(s: &[u8]) -> bool {
    s.len() == 2 && is_alpha(s[0]) && s[1] == b':'
}

/// First two bytes form a drive letter and the segment ends there or at a
/// URL delimiter
pub fn has_windows_drive_letter_prefix(s: &[u8]) -> bool {
    if s.len() < 2 || !is_windows_drive_letter(&s[..2]) {
        return false;
    }
    s.len() == 2 || matches!(s[2], b'/' | b'\\' | b'?' | b'#')
}

/// Bytes that may not appear in any host representation
pub fn is_forbidden_host_code_point(b: u8) -> bool {
    matches!(
        b,
        0x00 | b'\t'
            | b'\n'
            | b'\r'
            | b' '
            | b'#'
            | b'%'
            | b'/'
            | b':'
            | b'?'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
    )
}

/// WHATWG URL code point test over a decoded scalar
pub fn is_url_code_point(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | '-'
                    | '.'
                    | '/'
                    | ':'
                    | ';'
                    | '='
                    | '?'
                    | '@'
                    | '_'
                    | '~'
            );
    }
    let cp = c as u32;
    // U+00A0..=U+10FFFD minus surrogates (unrepresentable in char) and
    // noncharacters
    if !(0xA0..=0x10_FFFD).contains(&cp) {
        return false;
    }
    if (0xFDD0..=0xFDEF).contains(&cp) {
        return false;
    }
    // U+xFFFE / U+xFFFF in every plane
    (cp & 0xFFFE) != 0xFFFE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        assert_eq!(ascii_lowercase(b'A'), b'a');
        assert_eq!(ascii_lowercase(b'Z'), b'z');
        assert_eq!(ascii_lowercase(b'a'), b'a');
        assert_eq!(ascii_lowercase(b'['), b'[');
        assert_eq!(ascii_lowercase(b'0'), b'0');
    }

    #[test]
    fn test_dot_segments() {
        assert!(is_single_dot_segment(b"."));
        assert!(is_single_dot_segment(b"%2e"));
        assert!(is_single_dot_segment(b"%2E"));
        assert!(!is_single_dot_segment(b".."));
        assert!(!is_single_dot_segment(b"%2f"));

        assert!(is_double_dot_segment(b".."));
        assert!(is_double_dot_segment(b".%2e"));
        assert!(is_double_dot_segment(b"%2E."));
        assert!(is_double_dot_segment(b"%2e%2E"));
        assert!(!is_double_dot_segment(b"."));
        assert!(!is_double_dot_segment(b"..."));
    }

    #[test]
    fn test_drive_letters() {
        assert!(is_windows_drive_letter(b"c:"));
        assert!(is_windows_drive_letter(b"C|"));
        assert!(!is_windows_drive_letter(b"c"));
        assert!(!is_windows_drive_letter(b"cc"));
        assert!(!is_windows_drive_letter(b"c:/"));

        assert!(is_normalized_windows_drive_letter(b"c:"));
        assert!(!is_normalized_windows_drive_letter(b"c|"));

        assert!(has_windows_drive_letter_prefix(b"c:"));
        assert!(has_windows_drive_letter_prefix(b"c:/x"));
        assert!(has_windows_drive_letter_prefix(b"c|\\x"));
        assert!(has_windows_drive_letter_prefix(b"c:?q"));
        assert!(!has_windows_drive_letter_prefix(b"c:x"));
        assert!(!has_windows_drive_letter_prefix(b"1:/"));
    }

    #[test]
    fn test_forbidden_host_code_points() {
        for b in [0u8, b'\t', b'\n', b'\r', b' ', b'#', b'%', b'/', b':'] {
            assert!(is_forbidden_host_code_point(b), "{b:#x}");
        }
        for b in [b'?', b'@', b'[', b'\\', b']', b'^'] {
            assert!(is_forbidden_host_code_point(b), "{b:#x}");
        }
        for b in [b'a', b'0', b'-', b'.', b'_', b'~', b'|', b'<'] {
            assert!(!is_forbidden_host_code_point(b), "{b:#x}");
        }
    }

    #[test]
    fn test_url_code_points() {
        assert!(is_url_code_point('a'));
        assert!(is_url_code_point('~'));
        assert!(is_url_code_point('é'));
        assert!(!is_url_code_point('"'));
        assert!(!is_url_code_point('<'));
        assert!(!is_url_code_point('`'));
        assert!(!is_url_code_point('{'));
        assert!(!is_url_code_point('\u{FDD0}'));
        assert!(!is_url_code_point('\u{FFFF}'));
    }
}
