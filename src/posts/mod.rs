//! Blog post preview cards built from post front matter.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::runtime::Runtime;

pub const DEFAULT_PATTERN: &str = "posts/*.md";
pub const DEFAULT_LIMIT: usize = 3;

#[derive(Deserialize, Debug, Default, PartialEq)]
struct PostFrontMatter {
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    date: Option<String>,
}

/// Preview card for one post.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PostCard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub url: String,
}

/// The YAML block between a leading `---` line and the next `---` line.
pub fn front_matter_block(content: &str) -> Option<&str> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Site URL of a post: `/` + path without its extension.
pub fn post_url(path: &Path) -> String {
    let stem = path.with_extension("");
    format!("/{}", stem.to_string_lossy().replace('\\', "/"))
}

/// Build the card for one post file.
pub fn card_from_content(path: &Path, content: &str) -> Result<PostCard> {
    let block = front_matter_block(content).ok_or_else(|| anyhow!("No front matter"))?;
    let matter: PostFrontMatter = if block.trim().is_empty() {
        PostFrontMatter::default()
    } else {
        serde_yaml::from_str(block).context("Invalid front matter")?
    };

    let title = matter.title.ok_or_else(|| anyhow!("Front matter has no title"))?;
    Ok(PostCard {
        title,
        subtitle: matter.subtitle,
        description: matter.description,
        date: matter.date,
        url: post_url(path),
    })
}

/// Cards for the first `limit` posts matching `pattern`, in path order.
/// Posts that can't be read or lack a title are skipped.
#[tracing::instrument(skip(runtime))]
pub fn collect_cards<R: Runtime>(runtime: &R, pattern: &str, limit: usize) -> Result<Vec<PostCard>> {
    let paths = runtime.glob(pattern)?;
    debug!("Found {} post(s) for {}", paths.len(), pattern);

    let mut cards = Vec::new();
    for path in paths {
        if cards.len() >= limit {
            break;
        }
        let card = runtime
            .read_to_string(&path)
            .and_then(|content| card_from_content(&path, &content));
        match card {
            Ok(card) => cards.push(card),
            Err(e) => warn!("Skipping post {}: {:#}", path.display(), e),
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test]
    fn test_front_matter_block() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\n---\n\nBody\n";
        assert_eq!(
            front_matter_block(content),
            Some("title: Hello\ndate: 2024-01-01\n")
        );
        assert_eq!(front_matter_block("no front matter"), None);
        assert_eq!(front_matter_block("---\ntitle: unterminated\n"), None);
    }

    #[test]
    fn test_post_url() {
        assert_eq!(post_url(Path::new("posts/2024-release.md")), "/posts/2024-release");
    }

    #[test]
    fn test_card_from_content() {
        let content = "---\ntitle: MyST 1.0\nsubtitle: It's here\ndate: 2024-06-01\n---\nBody";
        let card = card_from_content(Path::new("posts/myst-1.md"), content).unwrap();

        assert_eq!(
            card,
            PostCard {
                title: "MyST 1.0".to_string(),
                subtitle: Some("It's here".to_string()),
                description: None,
                date: Some("2024-06-01".to_string()),
                url: "/posts/myst-1".to_string(),
            }
        );
    }

    #[test]
    fn test_card_requires_title() {
        let result = card_from_content(Path::new("posts/x.md"), "---\ndate: 2024-01-01\n---\n");
        assert!(result.is_err());
        let result = card_from_content(Path::new("posts/x.md"), "---\n---\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_cards_limit_and_skip() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_glob()
            .with(eq("posts/*.md"))
            .returning(|_| {
                Ok(vec![
                    PathBuf::from("posts/a.md"),
                    PathBuf::from("posts/b.md"),
                    PathBuf::from("posts/c.md"),
                    PathBuf::from("posts/d.md"),
                ])
            });
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("posts/a.md")))
            .returning(|_| Ok("---\ntitle: A\n---\n".to_string()));
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("posts/b.md")))
            .returning(|_| Ok("no front matter".to_string()));
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("posts/c.md")))
            .returning(|_| Ok("---\ntitle: C\n---\n".to_string()));
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("posts/d.md")))
            .never();

        let cards = collect_cards(&runtime, "posts/*.md", 2).unwrap();
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
