//! Markdown rendering for release pages and the index table.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::notes::{format_table_cell, normalize_repo_title, slugify};
use crate::release::{ReleaseSection, ReleaseTableRow};

pub const TABLE_FILE_NAME: &str = "release-table.txt";

#[derive(Serialize, Debug)]
struct FrontMatter<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
    url: &'a str,
    repository: &'a str,
    tags: [&'a str; 1],
}

fn front_matter(matter: &FrontMatter) -> Result<String> {
    let yaml = serde_yaml::to_string(matter).context("Failed to serialize front matter")?;
    Ok(format!("---\n{}---\n\n", yaml))
}

/// "over the past 12 months" style phrase for a window in days.
pub fn window_phrase(window_days: Option<i64>) -> String {
    match window_days {
        Some(days) if days > 0 && days % 365 == 0 => {
            format!(" over the past {} months", days / 365 * 12)
        }
        Some(1) => " over the past day".to_string(),
        Some(days) => format!(" over the past {} days", days),
        None => String::new(),
    }
}

fn render_section(section: &ReleaseSection) -> String {
    format!(
        "({label})=\n## {title}\n\nDate: {date} | [Release source]({url})\n\n{body}\n\n",
        label = section.label,
        title = section.title,
        date = section.entry.date(),
        url = section.entry.html_url,
        body = section.body,
    )
}

/// One page holding every release of a repository, newest first.
pub fn repository_page(
    org: &str,
    repo_name: &str,
    window_days: Option<i64>,
    sections: &[ReleaseSection],
) -> Result<String> {
    let url = format!("/releases/{}", slugify(repo_name));
    let releases_url = format!("https://github.com/{}/{}/releases", org, repo_name);

    let mut page = front_matter(&FrontMatter {
        title: repo_name,
        date: None,
        url: &url,
        repository: repo_name,
        tags: ["release"],
    })?;
    page.push_str(&format!(
        "These are the latest releases for {}{}. See [the GitHub releases page]({}) \
         for the full list of all releases.\n\n",
        repo_name,
        window_phrase(window_days),
        releases_url
    ));

    for s in sections {
        page.push_str(&render_section(s));
    }
    Ok(page)
}

/// File stem of a numbered single-release page.
pub fn release_page_stem(position: usize, section: &ReleaseSection) -> String {
    format!(
        "{:03}-{}-{}",
        position,
        slugify(&section.entry.repo_name),
        slugify(&section.entry.tag_name)
    )
}

/// A page for a single release.
pub fn release_page(position: usize, section: &ReleaseSection) -> Result<String> {
    let url = format!("/releases/{}", release_page_stem(position, section));
    let title = normalize_repo_title(&section.entry.repo_name, &section.title);
    let date = section.entry.date();

    let mut page = front_matter(&FrontMatter {
        title: &title,
        date: Some(&date),
        url: &url,
        repository: &section.entry.repo_name,
        tags: ["release"],
    })?;
    page.push_str(&render_section(section));
    Ok(page)
}

/// Pipe table of every release. Rows are written in the given order.
pub fn release_table(rows: &[ReleaseTableRow]) -> String {
    let mut table = String::from(
        "| Title | Version | Date | Release source | Section |\n| --- | --- | --- | --- | --- |\n",
    );
    for row in rows {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            format_table_cell(&row.title),
            format_table_cell(&row.version),
            format_table_cell(&row.date),
            format_table_cell(&format!("[GitHub]({})", row.github_url)),
            format_table_cell(&row.section),
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::tests::entry;

    fn parse_front_matter(page: &str) -> serde_yaml::Value {
        let rest = page.strip_prefix("---\n").unwrap();
        let end = rest.find("\n---\n").unwrap();
        serde_yaml::from_str(&rest[..end]).unwrap()
    }

    #[test]
    fn test_window_phrase() {
        assert_eq!(window_phrase(Some(365)), " over the past 12 months");
        assert_eq!(window_phrase(Some(730)), " over the past 24 months");
        assert_eq!(window_phrase(Some(90)), " over the past 90 days");
        assert_eq!(window_phrase(None), "");
    }

    #[test]
    fn test_repository_page() {
        let mut e = entry("mystmd", "v1.2.0", "2024-02-10T08:00:00Z");
        e.name = Some("mystmd v1.2.0".to_string());
        e.body = "- fix".to_string();
        let sections = vec![ReleaseSection::prepare(e)];

        let page = repository_page("jupyter-book", "mystmd", Some(365), &sections).unwrap();

        let matter = parse_front_matter(&page);
        assert_eq!(matter["title"].as_str(), Some("mystmd"));
        assert_eq!(matter["url"].as_str(), Some("/releases/mystmd"));
        assert_eq!(matter["repository"].as_str(), Some("mystmd"));
        assert_eq!(matter["tags"][0].as_str(), Some("release"));
        assert!(matter.get("date").is_none());

        assert!(page.contains(
            "These are the latest releases for mystmd over the past 12 months. \
             See [the GitHub releases page](https://github.com/jupyter-book/mystmd/releases)"
        ));
        assert!(page.ends_with(
            "(release-mystmd-v1.2.0)=\n## mystmd v1.2.0\n\n\
             Date: 2024-02-10 | [Release source](https://github.com/jupyter-book/mystmd/releases/tag/v1.2.0)\n\n\
             - fix\n\n"
        ));
    }

    #[test]
    fn test_release_page() {
        let e = entry("myst-theme", "v0.9.0", "2024-04-01T00:00:00Z");
        let section = ReleaseSection::prepare(e);

        assert_eq!(release_page_stem(7, &section), "007-myst-theme-v0.9.0");

        let page = release_page(7, &section).unwrap();
        let matter = parse_front_matter(&page);
        assert_eq!(matter["title"].as_str(), Some("myst-theme v0.9.0"));
        assert_eq!(matter["date"].as_str(), Some("2024-04-01"));
        assert_eq!(matter["url"].as_str(), Some("/releases/007-myst-theme-v0.9.0"));
        assert!(page.contains("(release-myst-theme-v0.9.0)=\n## v0.9.0\n"));
    }

    #[test]
    fn test_front_matter_quotes_special_titles() {
        let mut e = entry("mystmd", "v1.0.0", "2024-04-01T00:00:00Z");
        e.name = Some("mystmd: the: release".to_string());
        let page = release_page(1, &ReleaseSection::prepare(e)).unwrap();

        let matter = parse_front_matter(&page);
        assert_eq!(matter["title"].as_str(), Some("mystmd: the: release"));
    }

    #[test]
    fn test_release_table() {
        let mut e = entry("mystmd", "v1.2.0", "2024-02-10T08:00:00Z");
        e.name = Some("A | B".to_string());
        let row = ReleaseSection::prepare(e).table_row();

        let table = release_table(&[row]);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "| Title | Version | Date | Release source | Section |");
        assert_eq!(lines[1], "| --- | --- | --- | --- | --- |");
        assert_eq!(
            lines[2],
            "| mystmd A \\| B | v1.2.0 | 2024-02-10 | \
             [GitHub](https://github.com/jupyter-book/mystmd/releases/tag/v1.2.0) | \
             {ref}`Release section <release-mystmd-v1.2.0>` |"
        );
    }
}
