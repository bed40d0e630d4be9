//! Text normalization for GitHub release notes.
//!
//! # Structure
//!
//! - `slug` - Loose title comparison, slugs, version extraction
//! - `title` - Displayed title resolution from a leading header
//! - `clean` - Boilerplate removal, header demotion, mention quoting

mod clean;
mod slug;
mod title;

use std::sync::LazyLock;

use regex::Regex;

pub use clean::{bold_headers, clean_release_body, quote_mentions};
pub use slug::{extract_version, normalize_repo_title, normalize_title, slugify};
pub use title::{Header, resolve_release_title, split_leading_header};

pub(crate) static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));

/// Run every body pass in order and trim the result.
///
/// Returns the displayed title and the cleaned body.
pub fn prepare_release_body(title: &str, version: &str, body: &str) -> (String, String) {
    let (title, body) = resolve_release_title(title, version, body);
    let body = quote_mentions(&body);
    let body = clean_release_body(&body);
    let body = bold_headers(&body);
    (title, body.trim().to_string())
}

/// Escape a value for a pipe table cell.
pub fn format_table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ").trim().to_string()
}
