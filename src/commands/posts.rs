use anyhow::{Context, Result};

use crate::{posts::collect_cards, runtime::Runtime};

use super::config::PostsConfig;

/// Write preview cards for the first posts in path order as JSON.
#[tracing::instrument(skip(runtime, config))]
pub fn posts<R: Runtime>(runtime: &R, config: &PostsConfig) -> Result<()> {
    let cards = collect_cards(runtime, &config.pattern, config.limit)?;
    let json = serde_json::to_string_pretty(&cards).context("Failed to serialize post cards")?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        runtime.create_dir_all(parent)?;
    }
    runtime.write(&config.output, json.as_bytes())?;

    println!("Wrote {} post card(s) to {}", cards.len(), config.output.display());
    Ok(())
}
