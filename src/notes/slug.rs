//! Loose comparisons, slugs and version extraction.

use std::sync::LazyLock;

use regex::Regex;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.-]+)?").expect("valid regex")
});

/// Lowercase, drop leading `v`s and keep only `[0-9a-z]`.
///
/// Used for loose equality and containment checks between titles, tags and
/// versions: `normalize_title("v1.2.0") == normalize_title("1.2.0")`.
pub fn normalize_title(text: &str) -> String {
    text.to_lowercase()
        .trim_start_matches('v')
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        .collect()
}

/// Filesystem and URL safe identifier: lowercase, every character outside
/// `[a-zA-Z0-9-.]` becomes `-`.
pub fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// First semantic-version-looking substring of `tag_name`, or the tag itself.
pub fn extract_version(tag_name: &str) -> String {
    VERSION_RE
        .find(tag_name)
        .map_or_else(|| tag_name.to_string(), |m| m.as_str().to_string())
}

/// Prefix `title` with the repository name unless it already mentions it.
pub fn normalize_repo_title(repo_name: &str, title: &str) -> String {
    let normalized_repo = normalize_title(repo_name);
    let normalized_title = normalize_title(title);

    if normalized_title.contains(&normalized_repo) {
        title.to_string()
    } else {
        format!("{} {}", repo_name, title)
    }
}
