use anyhow::Result;
use bookdocs::commands::{
    self,
    config::{DEFAULT_DOCS_DIR, Layout, MAX_WINDOW_DAYS, NavConfig, PostsConfig, ReleasesConfig},
};
use bookdocs::http::HttpClient;
use clap::Parser;
use std::path::PathBuf;

/// bookdocs - documentation site helpers
///
/// Build pieces of a documentation site from remote sources: the navigation
/// manifest, release notes for every repository of a GitHub organization, and
/// blog post preview cards.
///
/// Release notes are read through the GitHub CLI (`gh`), which handles
/// authentication.
///
/// Examples:
///   bookdocs nav                      # Refresh docs/site.yml
///   bookdocs releases                 # Regenerate docs/releases
///   bookdocs releases --all --layout per-release
#[derive(Parser, Debug)]
#[command(author, version = env!("BOOKDOCS_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Documentation directory that default paths are rooted at
    #[arg(
        long = "docs-dir",
        short = 'd',
        env = "BOOKDOCS_DOCS_DIR",
        value_name = "PATH",
        default_value = DEFAULT_DOCS_DIR,
        global = true
    )]
    pub docs_dir: PathBuf,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Download the site navigation and make its URLs absolute
    Nav(NavArgs),

    /// Generate release notes pages and the release index table
    Releases(ReleasesArgs),

    /// Write blog post preview cards as JSON
    Posts(PostsArgs),
}

#[derive(clap::Args, Debug)]
pub struct NavArgs {
    /// URL of the navigation manifest (YAML)
    #[arg(long = "source-url", value_name = "URL")]
    pub source_url: Option<String>,

    /// Prefix for site-relative URLs
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Output file (defaults to <docs-dir>/site.yml)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ReleasesArgs {
    /// GitHub organization to read repositories from
    #[arg(long, value_name = "ORG")]
    pub org: Option<String>,

    /// Directory for generated pages (defaults to <docs-dir>/releases)
    #[arg(long = "releases-dir", value_name = "PATH")]
    pub releases_dir: Option<PathBuf>,

    /// Directory for raw release bodies (defaults to <docs-dir>/_build/releases)
    #[arg(long = "raw-dir", value_name = "PATH")]
    pub raw_dir: Option<PathBuf>,

    /// Only keep releases published in the last N days
    #[arg(
        long = "window-days",
        value_name = "DAYS",
        value_parser = clap::value_parser!(i64).range(1..=MAX_WINDOW_DAYS),
        conflicts_with = "all"
    )]
    pub window_days: Option<i64>,

    /// Keep every release regardless of age
    #[arg(long)]
    pub all: bool,

    /// How pages are split into files
    #[arg(long, value_enum, default_value_t = Layout::PerRepository)]
    pub layout: Layout,

    /// Repository to leave out (repeatable; replaces the default list)
    #[arg(long = "exclude", value_name = "REPO")]
    pub exclude: Vec<String>,

    /// GitHub CLI executable (also via BOOKDOCS_GH)
    #[arg(long = "gh", value_name = "PATH")]
    pub gh: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct PostsArgs {
    /// Glob matching post files
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Number of cards to keep
    #[arg(long, short = 'n', value_name = "N")]
    pub limit: Option<usize>,

    /// Output file (defaults to <docs-dir>/_build/posts.json)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

fn releases_config<R: bookdocs::runtime::Runtime>(
    runtime: &R,
    docs_dir: &std::path::Path,
    args: ReleasesArgs,
) -> ReleasesConfig {
    let mut config = ReleasesConfig::new(runtime, docs_dir);
    if let Some(org) = args.org {
        config.org = org;
    }
    if let Some(dir) = args.releases_dir {
        config.releases_dir = dir;
    }
    if let Some(dir) = args.raw_dir {
        config.raw_dir = dir;
    }
    if args.all {
        config.window_days = None;
    } else if let Some(days) = args.window_days {
        config.window_days = Some(days);
    }
    config.layout = args.layout;
    if !args.exclude.is_empty() {
        config.excludes = args.exclude;
    }
    if let Some(gh) = args.gh {
        config.gh = gh;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = bookdocs::runtime::RealRuntime;

    match cli.command {
        Commands::Nav(args) => {
            let config = NavConfig::new(&cli.docs_dir, args.source_url, args.base_url, args.output);
            let client = HttpClient::build()?;
            commands::nav(&runtime, &client, &config).await?
        }
        Commands::Releases(args) => {
            let config = releases_config(&runtime, &cli.docs_dir, args);
            commands::releases(&runtime, &config)?
        }
        Commands::Posts(args) => {
            let config = PostsConfig::new(&cli.docs_dir, args.pattern, args.limit, args.output);
            commands::posts(&runtime, &config)?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn releases_args(argv: &[&str]) -> ReleasesArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Releases(args) => args,
            _ => panic!("Expected Releases command"),
        }
    }

    #[test]
    fn test_cli_nav_parsing() {
        let cli = Cli::try_parse_from(["bookdocs", "nav", "--base-url", "https://x"]).unwrap();
        match cli.command {
            Commands::Nav(args) => {
                assert_eq!(args.base_url.as_deref(), Some("https://x"));
                assert_eq!(args.output, None);
            }
            _ => panic!("Expected Nav command"),
        }
        assert_eq!(cli.docs_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_cli_global_docs_dir() {
        let cli = Cli::try_parse_from(["bookdocs", "--docs-dir", "/tmp/site", "posts"]).unwrap();
        assert_eq!(cli.docs_dir, PathBuf::from("/tmp/site"));
    }

    #[test]
    fn test_cli_releases_defaults() {
        let args = releases_args(&["bookdocs", "releases"]);
        assert_eq!(args.window_days, None);
        assert!(!args.all);
        assert_eq!(args.layout, Layout::PerRepository);
        assert!(args.exclude.is_empty());
    }

    #[test]
    fn test_cli_releases_options() {
        let args = releases_args(&[
            "bookdocs",
            "releases",
            "--layout",
            "per-release",
            "--window-days",
            "30",
            "--exclude",
            "a",
            "--exclude",
            "b",
        ]);
        assert_eq!(args.layout, Layout::PerRelease);
        assert_eq!(args.window_days, Some(30));
        assert_eq!(args.exclude, vec!["a", "b"]);
    }

    #[test]
    fn test_cli_all_conflicts_with_window() {
        let result = Cli::try_parse_from(["bookdocs", "releases", "--all", "--window-days", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_zero_window() {
        let result = Cli::try_parse_from(["bookdocs", "releases", "--window-days", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_window_past_limit() {
        let result = Cli::try_parse_from(["bookdocs", "releases", "--window-days", "36501"]);
        assert!(result.is_err());

        let args = releases_args(&["bookdocs", "releases", "--window-days", "36500"]);
        assert_eq!(args.window_days, Some(36_500));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["bookdocs"]);
        assert!(result.is_err());
    }
}
