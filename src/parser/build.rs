//! Construction pass: replays a [`ScanMap`] once, emitting the canonical
//! serialization component by component and keeping the length header in
//! lockstep.

use super::scan::ScanMap;
use crate::ascii;
use crate::compat::{String, Vec};
use crate::error::{ParseError, Result, ValidationError};
use crate::host::parse_host;
use crate::percent;
use crate::scheme::SchemeKind;
use crate::url::{ComponentLengths, Components, Url};
use core::fmt::Write;

pub(crate) fn build(
    s: &[u8],
    map: &ScanMap,
    base: Option<&Url>,
    errors: &mut Vec<ValidationError>,
) -> Result<Url> {
    let mut out = String::with_capacity(s.len().saturating_mul(2).max(16));
    let mut lengths = ComponentLengths::default();
    let mut present = Components::empty();

    let needs_base = |c: Components| map.copy_from_base.contains(c);
    // The scanner never sets copy_from_base bits without a base URL
    let require_base = || base.ok_or(ParseError::MissingSchemeNonRelativeUrl);

    // Scheme, always first and always present
    let kind = map.kind;
    if map.found.contains(Components::SCHEME) {
        for &b in &s[..map.scheme_end] {
            out.push(ascii::ascii_lowercase(b) as char);
        }
    } else {
        out.push_str(require_base()?.scheme());
    }
    lengths.scheme = out.len() as u32;
    out.push(':');
    present.insert(Components::SCHEME);

    if map.cannot_be_a_base {
        build_opaque_path(s, map, base, &mut out, &mut lengths, &mut present, errors)?;
        build_query(s, map, base, kind, &mut out, &mut lengths, &mut present, errors)?;
        build_fragment(s, map, &mut out, &mut lengths, &mut present, errors)?;
        return Ok(Url {
            serialization: out,
            kind,
            cannot_be_a_base: true,
            present,
            lengths,
        });
    }

    // The path is resolved before the authority is emitted: whether a
    // file drive letter lands on an empty path and clears the host is
    // only known once dot segments have resolved, per segment, left to
    // right.
    let own_path_span = if map.found.contains(Components::PATH) {
        &s[map.path_start..map.path_end]
    } else {
        &[][..]
    };
    let mut path_buf = String::with_capacity(own_path_span.len() + 1);
    let mut drive_clears_host = false;
    if needs_base(Components::PATH) && !map.found.contains(Components::PATH) {
        path_buf.push_str(require_base()?.path());
    } else if map.found.contains(Components::PATH) || map.copy_base_windows_drive {
        percent::validate_escapes(own_path_span, errors);
        let base_path = if needs_base(Components::PATH) {
            Some(require_base()?.path())
        } else if map.copy_base_windows_drive {
            // seed only the drive segment, keeping its own leading '/'
            base.map(|b| &b.path()[..3])
        } else {
            None
        };
        drive_clears_host =
            normalize_path_into(&mut path_buf, kind, base_path, own_path_span, errors)?;
    }
    if kind.is_special() && path_buf.is_empty() {
        path_buf.push('/');
    }

    // Authority
    let copy_authority = needs_base(Components::AUTHORITY)
        && base.is_some_and(|b| b.present.contains(Components::AUTHORITY));
    let has_authority =
        map.found.contains(Components::AUTHORITY) || kind == SchemeKind::File || copy_authority;

    if has_authority {
        out.push_str("//");
        present.insert(Components::AUTHORITY);

        if copy_authority {
            let b = require_base()?;
            if drive_clears_host {
                if !b.hostname().is_empty() {
                    errors.push(ValidationError::UnexpectedHostFileScheme);
                }
            } else {
                out.push_str(b.authority());
                lengths.username = b.lengths.username;
                lengths.password = b.lengths.password;
                lengths.hostname = b.lengths.hostname;
                lengths.port = b.lengths.port;
            }
        } else if map.found.contains(Components::AUTHORITY) {
            if map.has_credentials {
                let user = &s[map.authority_start..map.username_end];
                percent::validate_escapes(user, errors);
                let user_start = out.len();
                percent::encode_into(&mut out, user, percent::USERINFO_SET)?;
                lengths.username = (out.len() - user_start) as u32;

                if map.password_end > map.username_end {
                    let pass = &s[map.username_end + 1..map.password_end];
                    if !pass.is_empty() {
                        percent::validate_escapes(pass, errors);
                        let pass_start = out.len();
                        out.push(':');
                        percent::encode_into(&mut out, pass, percent::USERINFO_SET)?;
                        lengths.password = (out.len() - pass_start) as u32;
                    }
                }
                if lengths.username + lengths.password > 0 {
                    out.push('@');
                }
            }

            let host_bytes = &s[map.host_start..map.host_end];
            let host_start = out.len();
            if !host_bytes.is_empty() {
                if drive_clears_host {
                    errors.push(ValidationError::UnexpectedHostFileScheme);
                } else {
                    let host = parse_host(host_bytes, !kind.is_special())?;
                    let serialized = host.serialize();
                    if !(kind == SchemeKind::File && serialized == "localhost") {
                        out.push_str(&serialized);
                    }
                }
            }
            lengths.hostname = (out.len() - host_start) as u32;

            if map.has_port {
                let mut value = 0u16;
                for &d in &s[map.port_start..map.port_end] {
                    value = value * 10 + u16::from(d - b'0');
                }
                if kind.default_port() != Some(value) {
                    let port_start = out.len();
                    out.push(':');
                    let _ = write!(&mut out, "{value}");
                    lengths.port = (out.len() - port_start) as u32;
                }
            }
        }
    }

    // Path
    let path_start = out.len();
    // A rootless-looking path after an absent authority would reparse as
    // one; an inert dot segment keeps the serialization unambiguous
    if !kind.is_special()
        && !present.contains(Components::AUTHORITY)
        && path_buf.starts_with("//")
    {
        out.push_str("/.");
    }
    out.push_str(&path_buf);
    lengths.path = (out.len() - path_start) as u32;
    if lengths.path > 0 {
        present.insert(Components::PATH);
    }

    build_query(s, map, base, kind, &mut out, &mut lengths, &mut present, errors)?;
    build_fragment(s, map, &mut out, &mut lengths, &mut present, errors)?;

    Ok(Url {
        serialization: out,
        kind,
        cannot_be_a_base: false,
        present,
        lengths,
    })
}

#[allow(clippy::too_many_arguments)]
fn build_query(
    s: &[u8],
    map: &ScanMap,
    base: Option<&Url>,
    kind: SchemeKind,
    out: &mut String,
    lengths: &mut ComponentLengths,
    present: &mut Components,
    errors: &mut Vec<ValidationError>,
) -> Result<()> {
    if map.found.contains(Components::QUERY) {
        let span = &s[map.query_start..map.query_end];
        percent::validate_escapes(span, errors);
        let start = out.len();
        out.push('?');
        let set = if kind.is_special() {
            percent::SPECIAL_QUERY_SET
        } else {
            percent::QUERY_SET
        };
        percent::encode_into(out, span, set)?;
        lengths.query = (out.len() - start) as u32;
        present.insert(Components::QUERY);
    } else if map.copy_from_base.contains(Components::QUERY)
        && let Some(b) = base
        && b.present.contains(Components::QUERY)
    {
        out.push_str(b.query());
        lengths.query = b.lengths.query;
        present.insert(Components::QUERY);
    }
    Ok(())
}

fn build_fragment(
    s: &[u8],
    map: &ScanMap,
    out: &mut String,
    lengths: &mut ComponentLengths,
    present: &mut Components,
    errors: &mut Vec<ValidationError>,
) -> Result<()> {
    if map.found.contains(Components::FRAGMENT) {
        let span = &s[map.fragment_start..map.fragment_end];
        percent::validate_escapes(span, errors);
        let start = out.len();
        out.push('#');
        percent::encode_into(out, span, percent::FRAGMENT_SET)?;
        lengths.fragment = (out.len() - start) as u32;
        present.insert(Components::FRAGMENT);
    }
    Ok(())
}

/// The single opaque segment of a cannot-be-a-base URL, own or copied
fn build_opaque_path(
    s: &[u8],
    map: &ScanMap,
    base: Option<&Url>,
    out: &mut String,
    lengths: &mut ComponentLengths,
    present: &mut Components,
    errors: &mut Vec<ValidationError>,
) -> Result<()> {
    let start = out.len();
    if map.copy_from_base.contains(Components::PATH) {
        if let Some(b) = base {
            out.push_str(b.path());
        }
    } else {
        let span = &s[map.path_start..map.path_end];
        percent::validate_escapes(span, errors);
        percent::encode_into(out, span, percent::C0_SET)?;
    }
    lengths.path = (out.len() - start) as u32;
    if lengths.path > 0 {
        present.insert(Components::PATH);
    }
    Ok(())
}

/// Resolve dot segments and emit each surviving segment percent-encoded,
/// per the path grammar: `/` separates everywhere, `\` additionally for
/// special schemes.
///
/// `base_path` seeds the working buffer for relative resolution; its last
/// segment is dropped first unless it is just the drive seed.
///
/// Returns whether a file drive letter was normalized onto an empty
/// path, which clears any host of the URL under construction.
fn normalize_path_into(
    out: &mut String,
    kind: SchemeKind,
    base_path: Option<&str>,
    input: &[u8],
    errors: &mut Vec<ValidationError>,
) -> Result<bool> {
    let special = kind.is_special();
    let mut drive_at_empty_path = false;
    let mut path = String::with_capacity(input.len() + 1);

    if let Some(base_path) = base_path {
        // the "/." disambiguation marker is not a real segment
        let base_path = base_path
            .strip_prefix("/.")
            .filter(|rest| rest.starts_with("//"))
            .unwrap_or(base_path);
        let bytes = base_path.as_bytes();
        if kind == SchemeKind::File
            && bytes.len() == 3
            && bytes[0] == b'/'
            && ascii::is_normalized_windows_drive_letter(&bytes[1..3])
        {
            // a lone drive is never shortened away
            path.push_str(base_path);
        } else if let Some(last_slash) = base_path.rfind('/') {
            path.push_str(&base_path[..last_slash]);
        }
    }

    let mut remaining = input;
    if let Some(&b) = remaining.first()
        && (b == b'/' || (special && b == b'\\'))
    {
        if b == b'\\' {
            errors.push(ValidationError::UnexpectedReverseSolidus);
        }
        remaining = &remaining[1..];
    }

    loop {
        let sep = remaining
            .iter()
            .position(|&b| b == b'/' || (special && b == b'\\'));
        let (segment, is_last) = match sep {
            Some(i) => {
                if remaining[i] == b'\\' {
                    errors.push(ValidationError::UnexpectedReverseSolidus);
                }
                (&remaining[..i], false)
            }
            None => (remaining, true),
        };

        if ascii::is_double_dot_segment(segment) {
            shorten(&mut path, kind);
            if is_last && !path.ends_with('/') {
                path.push('/');
            }
        } else if ascii::is_single_dot_segment(segment) {
            if is_last && !path.ends_with('/') {
                path.push('/');
            }
        } else if kind == SchemeKind::File
            && path.is_empty()
            && ascii::is_windows_drive_letter(segment)
        {
            drive_at_empty_path = true;
            path.push('/');
            path.push(segment[0] as char);
            path.push(':');
        } else {
            path.push('/');
            percent::encode_into(&mut path, segment, percent::PATH_SET)?;
        }

        match sep {
            Some(i) => remaining = &remaining[i + 1..],
            None => break,
        }
    }

    if kind == SchemeKind::File {
        while path.starts_with("//") {
            errors.push(ValidationError::UnexpectedEmptyPath);
            path.remove(0);
        }
    }

    out.push_str(&path);
    Ok(drive_at_empty_path)
}

/// Drop the last emitted segment, except a file drive letter
fn shorten(path: &mut String, kind: SchemeKind) {
    let bytes = path.as_bytes();
    if kind == SchemeKind::File
        && bytes.len() == 3
        && bytes[0] == b'/'
        && ascii::is_normalized_windows_drive_letter(&bytes[1..3])
    {
        return;
    }
    if let Some(i) = path.rfind('/') {
        path.truncate(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(kind: SchemeKind, base: Option<&str>, input: &[u8]) -> String {
        let mut out = String::new();
        let mut errors = Vec::new();
        let _ = normalize_path_into(&mut out, kind, base, input, &mut errors)
            .unwrap_or_else(|e| panic!("{e:?}"));
        out
    }

    #[test]
    fn test_plain_segments() {
        assert_eq!(normalize(SchemeKind::Http, None, b"/a/b/c"), "/a/b/c");
        assert_eq!(normalize(SchemeKind::Http, None, b"/"), "/");
        assert_eq!(normalize(SchemeKind::Http, None, b"/a//b"), "/a//b");
    }

    #[test]
    fn test_dot_resolution() {
        assert_eq!(normalize(SchemeKind::Http, None, b"/a/./b"), "/a/b");
        assert_eq!(normalize(SchemeKind::Http, None, b"/a/../b"), "/b");
        assert_eq!(normalize(SchemeKind::Http, None, b"/a/b/.."), "/a/");
        assert_eq!(normalize(SchemeKind::Http, None, b"/a/b/."), "/a/b/");
        assert_eq!(normalize(SchemeKind::Http, None, b"/.."), "/");
        assert_eq!(normalize(SchemeKind::Http, None, b"/%2e%2E/a"), "/a");
        assert_eq!(normalize(SchemeKind::Http, None, b"/a/%2e"), "/a/");
    }

    #[test]
    fn test_backslash_separators() {
        let mut out = String::new();
        let mut errors = Vec::new();
        normalize_path_into(&mut out, SchemeKind::Http, None, b"\\a\\b", &mut errors).unwrap();
        assert_eq!(out, "/a/b");
        assert!(errors.contains(&ValidationError::UnexpectedReverseSolidus));

        // not a separator for non-special schemes
        assert_eq!(normalize(SchemeKind::Other, None, b"/a\\b"), "/a%5Cb");
    }

    #[test]
    fn test_base_merge() {
        assert_eq!(
            normalize(SchemeKind::Http, Some("/x/y/z"), b"../baz"),
            "/x/baz"
        );
        assert_eq!(normalize(SchemeKind::Http, Some("/x/y"), b"baz"), "/x/baz");
        assert_eq!(normalize(SchemeKind::Http, Some("/x"), b"baz"), "/baz");
    }

    #[test]
    fn test_file_drive_letters() {
        assert_eq!(normalize(SchemeKind::File, None, b"c:/x"), "/c:/x");
        assert_eq!(normalize(SchemeKind::File, None, b"/c|/x"), "/c:/x");
        // the drive is never popped
        assert_eq!(normalize(SchemeKind::File, None, b"/c:/../.."), "/c:/");
        // drive seed from the base
        assert_eq!(normalize(SchemeKind::File, Some("/d:"), b"/x"), "/d:/x");
    }

    #[test]
    fn test_drive_letter_on_empty_path_is_reported() {
        let mut errors = Vec::new();

        // dot segments resolve before the drive letter is judged
        let mut out = String::new();
        let cleared =
            normalize_path_into(&mut out, SchemeKind::File, None, b"/./c:/x", &mut errors)
                .unwrap_or_else(|e| panic!("{e:?}"));
        assert!(cleared);
        assert_eq!(out, "/c:/x");

        let mut out = String::new();
        let cleared =
            normalize_path_into(&mut out, SchemeKind::File, None, b"/a/../c:/x", &mut errors)
                .unwrap_or_else(|e| panic!("{e:?}"));
        assert!(cleared);
        assert_eq!(out, "/c:/x");

        // a drive letter deeper in the path is an ordinary segment
        let mut out = String::new();
        let cleared =
            normalize_path_into(&mut out, SchemeKind::File, None, b"/a/c:/x", &mut errors)
                .unwrap_or_else(|e| panic!("{e:?}"));
        assert!(!cleared);
        assert_eq!(out, "/a/c:/x");
    }

    #[test]
    fn test_file_leading_empty_collapse() {
        let mut out = String::new();
        let mut errors = Vec::new();
        normalize_path_into(&mut out, SchemeKind::File, None, b"//x", &mut errors).unwrap();
        assert_eq!(out, "/x");
        assert_eq!(errors, [ValidationError::UnexpectedEmptyPath]);
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(normalize(SchemeKind::Http, None, b"/a b/{c}"), "/a%20b/%7Bc%7D");
        assert_eq!(normalize(SchemeKind::Http, None, b"/%41"), "/%41");
    }
}
