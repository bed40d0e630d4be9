//! Release title resolution from a leading body header.

use super::{HEADER_RE, normalize_title};

/// A markdown header found at the top of a release body.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub level: usize,
    pub title: String,
}

/// Parse a single line as an ATX heading (`#` to `######`).
pub(crate) fn parse_header(line: &str) -> Option<Header> {
    let caps = HEADER_RE.captures(line)?;
    Some(Header {
        level: caps[1].len(),
        title: caps[2].trim().to_string(),
    })
}

/// Find a header on the first non-blank line of `body`.
///
/// Returns the header and the body without it. One blank line directly after
/// the header goes with it. When the first non-blank line is not a header the
/// body comes back untouched.
pub fn split_leading_header(body: &str) -> (Option<Header>, String) {
    if body.is_empty() {
        return (None, body.to_string());
    }

    let lines: Vec<&str> = body.lines().collect();
    let Some(index) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return (None, body.to_string());
    };

    let Some(header) = parse_header(lines[index]) else {
        return (None, body.to_string());
    };

    let mut remaining: Vec<&str> = lines;
    remaining.remove(index);
    if index < remaining.len() && remaining[index].trim().is_empty() {
        remaining.remove(index);
    }

    (Some(header), remaining.join("\n"))
}

/// Pick the displayed title for a release and drop a duplicated header.
///
/// A level-1 header always wins. A deeper header is only removed when it
/// restates the declared title or the version.
pub fn resolve_release_title(title: &str, version: &str, body: &str) -> (String, String) {
    let (header, body_without_header) = split_leading_header(body);
    let Some(header) = header else {
        return (title.to_string(), body.to_string());
    };

    if header.level == 1 {
        return (header.title, body_without_header);
    }

    let header_norm = normalize_title(&header.title);
    let title_norm = normalize_title(title);
    let version_norm = normalize_title(version);
    let header_matches = header_norm == title_norm
        || header_norm == version_norm
        || (!title_norm.is_empty() && header_norm.contains(&title_norm))
        || (!version_norm.is_empty() && header_norm.contains(&version_norm));

    if header_matches {
        (title.to_string(), body_without_header)
    } else {
        (title.to_string(), body.to_string())
    }
}
