//! Release entries and the summary rows built from them.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::github;
use crate::notes::{extract_version, normalize_repo_title, prepare_release_body, slugify};

/// A published release of one repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseEntry {
    pub repo_name: String,
    pub tag_name: String,
    pub name: Option<String>,
    pub published_at: DateTime<Utc>,
    pub body: String,
    pub html_url: String,
}

impl ReleaseEntry {
    /// Build an entry from the API release. Unpublished releases (drafts)
    /// have no `published_at` and yield `Ok(None)`.
    pub fn from_api(repo_name: &str, release: github::Release) -> Result<Option<Self>> {
        let Some(published_at) = release.published_at.as_deref() else {
            debug!("Skipping unpublished release {} of {}", release.tag_name, repo_name);
            return Ok(None);
        };

        let published_at = DateTime::parse_from_rfc3339(published_at)
            .with_context(|| {
                format!(
                    "Invalid published_at '{}' for {} {}",
                    published_at, repo_name, release.tag_name
                )
            })?
            .with_timezone(&Utc);

        Ok(Some(Self {
            repo_name: repo_name.to_string(),
            tag_name: release.tag_name,
            name: release.name,
            published_at,
            body: release.body.unwrap_or_default(),
            html_url: release.html_url,
        }))
    }

    /// Declared title: the release name, or the tag when the name is empty.
    pub fn declared_title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }

    pub fn version(&self) -> String {
        extract_version(&self.tag_name)
    }

    pub fn date(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }

    /// Stable cross-reference label for this release's section.
    pub fn label(&self) -> String {
        format!(
            "release-{}-{}",
            slugify(&self.repo_name),
            slugify(&self.tag_name)
        )
    }

    /// Name of the verbatim body snapshot file.
    pub fn raw_file_name(&self) -> String {
        format!("{}-{}.md", self.repo_name, slugify(&self.tag_name))
    }

    /// Raw body, newline terminated when non-empty.
    pub fn raw_snapshot(&self) -> String {
        let mut body = self.body.clone();
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        body
    }
}

/// A release with its title resolved and body cleaned, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSection {
    pub entry: ReleaseEntry,
    pub title: String,
    pub version: String,
    pub label: String,
    pub body: String,
}

impl ReleaseSection {
    pub fn prepare(entry: ReleaseEntry) -> Self {
        let version = entry.version();
        let (title, body) = prepare_release_body(entry.declared_title(), &version, &entry.body);
        let label = entry.label();
        Self {
            entry,
            title,
            version,
            label,
            body,
        }
    }

    pub fn table_row(&self) -> ReleaseTableRow {
        ReleaseTableRow {
            title: normalize_repo_title(&self.entry.repo_name, &self.title),
            version: self.version.clone(),
            date: self.entry.date(),
            github_url: self.entry.html_url.clone(),
            section: format!("{{ref}}`Release section <{}>`", self.label),
            published_at: self.entry.published_at,
        }
    }
}

/// One line of the release index table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseTableRow {
    pub title: String,
    pub version: String,
    pub date: String,
    pub github_url: String,
    pub section: String,
    pub published_at: DateTime<Utc>,
}

/// Keep entries published at or after `now - window`. `None`, or a cutoff
/// before the earliest representable date, keeps everything.
pub fn filter_recent(
    entries: Vec<ReleaseEntry>,
    now: DateTime<Utc>,
    window: Option<Duration>,
) -> Vec<ReleaseEntry> {
    match window.and_then(|window| now.checked_sub_signed(window)) {
        Some(cutoff) => {
            entries
                .into_iter()
                .filter(|entry| entry.published_at >= cutoff)
                .collect()
        }
        None => entries,
    }
}

/// Group entries by repository in first-seen order.
pub fn group_by_repository(entries: Vec<ReleaseEntry>) -> Vec<(String, Vec<ReleaseEntry>)> {
    let mut groups: Vec<(String, Vec<ReleaseEntry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(name, _)| *name == entry.repo_name) {
            Some((_, group)) => group.push(entry),
            None => groups.push((entry.repo_name.clone(), vec![entry])),
        }
    }
    groups
}

/// Newest first. Ties keep their input order.
pub fn sort_newest_first(entries: &mut [ReleaseEntry]) {
    entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

pub fn sort_rows_newest_first(rows: &mut [ReleaseTableRow]) {
    rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
