//! Pre-scan input filtering: surrounding C0 controls and spaces are
//! trimmed, interior tab/LF/CR are stripped.
//!
//! The stripped form is produced by a single copy-compact when any of the
//! three bytes are present, so the scanner always works on contiguous
//! bytes with plain index arithmetic.

use crate::compat::{Cow, Vec};
use crate::error::ValidationError;

fn is_tab_or_newline(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r')
}

/// Fast check if input contains tabs or newlines
pub fn has_tab_or_newline(input: &[u8]) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input).is_some()
}

/// Trim and strip `input`, recording one validation error per rule that
/// fired.
pub fn filter<'a>(input: &'a [u8], errors: &mut Vec<ValidationError>) -> Cow<'a, [u8]> {
    let start = input
        .iter()
        .position(|&b| b > 0x20)
        .unwrap_or(input.len());
    let end = input.iter().rposition(|&b| b > 0x20).map_or(0, |p| p + 1);

    if start >= end {
        if !input.is_empty() {
            errors.push(ValidationError::UnexpectedC0ControlOrSpace);
        }
        return Cow::Borrowed(&[]);
    }

    if start > 0 || end < input.len() {
        errors.push(ValidationError::UnexpectedC0ControlOrSpace);
    }

    let trimmed = &input[start..end];
    if !has_tab_or_newline(trimmed) {
        return Cow::Borrowed(trimmed);
    }

    errors.push(ValidationError::UnexpectedAsciiTabOrNewline);
    Cow::Owned(
        trimmed
            .iter()
            .copied()
            .filter(|&b| !is_tab_or_newline(b))
            .collect(),
    )
}
