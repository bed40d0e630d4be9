//! Release body cleanup passes.
//!
//! Each pass is a function `&str -> String` and the passes compose freely.

use std::sync::LazyLock;

use regex::Regex;

use super::title::parse_header;

const BOILERPLATE_SECTION: &str = "contributors to this release";
const BOILERPLATE_LINES: [&str; 3] = [
    "full changelog",
    "contributors page for this release",
    "definition of contributors",
];

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\s(,\[])@(\w+)").expect("valid regex"));

/// Drop generated contributor sections and changelog footer lines.
///
/// A section starts at a heading containing "contributors to this release"
/// and runs until the next heading of the same or a shallower level, which is
/// kept.
pub fn clean_release_body(body: &str) -> String {
    if body.is_empty() {
        return body.to_string();
    }

    let mut cleaned = Vec::new();
    let mut skip_level: Option<usize> = None;

    for line in body.lines() {
        if let Some(header) = parse_header(line) {
            if skip_level.is_some_and(|level| header.level <= level) {
                skip_level = None;
            }
            if skip_level.is_none() && header.title.to_lowercase().contains(BOILERPLATE_SECTION) {
                skip_level = Some(header.level);
                continue;
            }
        }

        if skip_level.is_some() {
            continue;
        }

        let lowered = line.to_lowercase();
        if BOILERPLATE_LINES.iter().any(|phrase| lowered.contains(phrase)) {
            continue;
        }

        cleaned.push(line);
    }

    cleaned.join("\n")
}

/// Turn headings into bold lines, leaving fenced code blocks alone.
pub fn bold_headers(body: &str) -> String {
    if body.is_empty() {
        return body.to_string();
    }

    let mut in_fence = false;
    let lines: Vec<String> = body
        .lines()
        .map(|line| {
            let stripped = line.trim();
            if stripped.starts_with("```") || stripped.starts_with("~~~") {
                in_fence = !in_fence;
                return line.to_string();
            }
            if in_fence {
                return line.to_string();
            }
            match parse_header(line) {
                Some(header) => format!("**{}**", header.title),
                None => line.to_string(),
            }
        })
        .collect();

    lines.join("\n")
}

/// Wrap `@name` mentions in backticks so they don't render as user links.
///
/// Only mentions preceded by whitespace, `(`, `,` or `[` are touched, and a
/// mention already followed by a backtick is left as is.
pub fn quote_mentions(body: &str) -> String {
    MENTION_RE
        .replace_all(body, |caps: &regex::Captures| {
            let quoted = caps
                .get(0)
                .is_some_and(|m| body[m.end()..].starts_with('`'));
            if quoted {
                caps[0].to_string()
            } else {
                format!("{}`@{}`", &caps[1], &caps[2])
            }
        })
        .into_owned()
}
