use std::path::{Path, PathBuf};

use chrono::Duration;
use log::debug;

use crate::{
    github::DEFAULT_GH,
    nav::DEFAULT_BASE_URL,
    posts::{DEFAULT_LIMIT, DEFAULT_PATTERN},
    runtime::Runtime,
};

pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_NAV_SOURCE: &str =
    "https://raw.githubusercontent.com/jupyter-book/jupyter-book/refs/heads/main/docs/_site/site.yml";
pub const DEFAULT_ORG: &str = "jupyter-book";
pub const DEFAULT_WINDOW_DAYS: i64 = 365;
pub const MAX_WINDOW_DAYS: i64 = 36_500;
/// Noisy repositories left out so the marquee projects stand out.
pub const DEFAULT_EXCLUDES: [&str; 2] = ["myst-plugins", "workshop-template"];
pub const GH_ENV: &str = "BOOKDOCS_GH";

/// How generated release notes are split into files.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One page per repository plus the index table
    #[default]
    PerRepository,
    /// One numbered page per release plus the index table
    PerRelease,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    pub source_url: String,
    pub base_url: String,
    pub output: PathBuf,
}

impl NavConfig {
    pub fn new(
        docs_dir: &Path,
        source_url: Option<String>,
        base_url: Option<String>,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            source_url: source_url.unwrap_or_else(|| DEFAULT_NAV_SOURCE.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            output: output.unwrap_or_else(|| docs_dir.join("site.yml")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleasesConfig {
    pub org: String,
    pub releases_dir: PathBuf,
    pub raw_dir: PathBuf,
    /// Trailing window in days; `None` keeps every release.
    pub window_days: Option<i64>,
    pub layout: Layout,
    pub excludes: Vec<String>,
    pub gh: String,
}

impl ReleasesConfig {
    /// Defaults rooted at `docs_dir`. The `gh` executable comes from
    /// `BOOKDOCS_GH` when set.
    pub fn new<R: Runtime>(runtime: &R, docs_dir: &Path) -> Self {
        let gh = runtime
            .env_var(GH_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_GH.to_string());
        debug!("Using GitHub CLI at {}", gh);

        Self {
            org: DEFAULT_ORG.to_string(),
            releases_dir: docs_dir.join("releases"),
            raw_dir: docs_dir.join("_build").join("releases"),
            window_days: Some(DEFAULT_WINDOW_DAYS),
            layout: Layout::default(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            gh,
        }
    }

    /// Window as a duration. Day counts chrono can't represent keep everything.
    pub fn window(&self) -> Option<Duration> {
        self.window_days.and_then(Duration::try_days)
    }

    pub fn is_excluded(&self, repo_name: &str) -> bool {
        self.excludes.iter().any(|name| name == repo_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostsConfig {
    pub pattern: String,
    pub limit: usize,
    pub output: PathBuf,
}

impl PostsConfig {
    pub fn new(
        docs_dir: &Path,
        pattern: Option<String>,
        limit: Option<usize>,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            pattern: pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            output: output.unwrap_or_else(|| docs_dir.join("_build").join("posts.json")),
        }
    }
}
