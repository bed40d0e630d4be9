use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::{
    github::{GhCli, ReleaseSource},
    notes::slugify,
    release::{
        ReleaseEntry, ReleaseSection, ReleaseTableRow, filter_recent, group_by_repository,
        sort_newest_first, sort_rows_newest_first,
    },
    render::{self, TABLE_FILE_NAME},
    runtime::{Runtime, reset_dir},
};

use super::config::{Layout, ReleasesConfig};

/// What a release notes run produced.
#[derive(Debug, Default, PartialEq)]
pub struct ReleasesSummary {
    pub releases: usize,
    pub pages: Vec<PathBuf>,
    pub table: PathBuf,
}

/// Generate release notes through the `gh` executable named in `config`.
#[tracing::instrument(skip(runtime, config))]
pub fn releases<R: Runtime>(runtime: &R, config: &ReleasesConfig) -> Result<()> {
    let gh = GhCli::new(runtime, config.gh.clone());
    generate(runtime, &gh, config)?;
    println!("Release posts generated successfully!");
    Ok(())
}

#[tracing::instrument(skip(runtime, source, config))]
pub fn generate<R: Runtime, S: ReleaseSource>(
    runtime: &R,
    source: &S,
    config: &ReleasesConfig,
) -> Result<ReleasesSummary> {
    source.check_available()?;

    for dir in [&config.releases_dir, &config.raw_dir] {
        reset_dir(runtime, dir)
            .with_context(|| format!("Failed to reset {}", dir.display()))?;
    }

    println!("Fetching all repositories from {} organization...", config.org);
    let repos = source
        .list_repositories(&config.org)
        .context("Error fetching repositories")?;
    let repos: Vec<_> = repos
        .into_iter()
        .filter(|repo| !config.is_excluded(&repo.name))
        .collect();
    debug!("{} repositories after exclusions", repos.len());

    println!("Fetching releases from all repositories...");
    let mut entries = Vec::new();
    for repo in &repos {
        println!("Fetching releases from {}...", repo.name);
        let releases = match source.list_releases(&config.org, &repo.name) {
            Ok(releases) => releases,
            Err(e) => {
                warn!("No releases found for {}: {:#}", repo.name, e);
                continue;
            }
        };
        for release in releases {
            match ReleaseEntry::from_api(&repo.name, release) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => warn!("Skipping release of {}: {:#}", repo.name, e),
            }
        }
    }

    let entries = filter_recent(entries, runtime.now(), config.window());
    match config.window_days {
        Some(days) => println!("Found {} releases from the last {} days", entries.len(), days),
        None => println!("Found {} releases", entries.len()),
    }

    println!("Writing raw release notes...");
    for entry in &entries {
        let path = config.raw_dir.join(entry.raw_file_name());
        runtime.write(&path, entry.raw_snapshot().as_bytes())?;
    }

    let total = entries.len();
    let (pages, mut rows) = match config.layout {
        Layout::PerRepository => write_repository_pages(runtime, config, entries)?,
        Layout::PerRelease => write_release_pages(runtime, config, entries)?,
    };

    sort_rows_newest_first(&mut rows);
    let table = config.releases_dir.join(TABLE_FILE_NAME);
    runtime.write(&table, render::release_table(&rows).as_bytes())?;
    debug!("Wrote {} table rows to {}", rows.len(), table.display());

    Ok(ReleasesSummary {
        releases: total,
        pages,
        table,
    })
}

fn write_repository_pages<R: Runtime>(
    runtime: &R,
    config: &ReleasesConfig,
    entries: Vec<ReleaseEntry>,
) -> Result<(Vec<PathBuf>, Vec<ReleaseTableRow>)> {
    let mut pages = Vec::new();
    let mut rows = Vec::new();

    for (repo_name, mut group) in group_by_repository(entries) {
        sort_newest_first(&mut group);
        let sections: Vec<_> = group.into_iter().map(ReleaseSection::prepare).collect();
        rows.extend(sections.iter().map(ReleaseSection::table_row));

        let page = render::repository_page(&config.org, &repo_name, config.window_days, &sections)?;
        let path = config.releases_dir.join(format!("{}.md", slugify(&repo_name)));
        runtime.write(&path, page.as_bytes())?;
        println!("Generated: {}", path.display());
        pages.push(path);
    }

    Ok((pages, rows))
}

fn write_release_pages<R: Runtime>(
    runtime: &R,
    config: &ReleasesConfig,
    mut entries: Vec<ReleaseEntry>,
) -> Result<(Vec<PathBuf>, Vec<ReleaseTableRow>)> {
    sort_newest_first(&mut entries);

    let mut pages = Vec::new();
    let mut rows = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let position = index + 1;
        let section = ReleaseSection::prepare(entry);
        rows.push(section.table_row());

        let page = render::release_page(position, &section)?;
        let path = config
            .releases_dir
            .join(format!("{}.md", render::release_page_stem(position, &section)));
        runtime.write(&path, page.as_bytes())?;
        println!("Generated: {}", path.display());
        pages.push(path);
    }

    Ok((pages, rows))
}
