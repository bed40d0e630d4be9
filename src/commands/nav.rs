use anyhow::{Context, Result};
use log::debug;

use crate::{http::FetchText, nav::rewrite_urls, runtime::Runtime};

use super::config::NavConfig;

/// Download the navigation manifest, absolutize its URLs and save it.
#[tracing::instrument(skip(runtime, fetcher, config))]
pub async fn nav<R: Runtime, F: FetchText>(
    runtime: &R,
    fetcher: &F,
    config: &NavConfig,
) -> Result<()> {
    let text = fetcher
        .get_text(&config.source_url)
        .await
        .context("Failed to download navigation manifest")?;

    let manifest: serde_yaml::Value =
        serde_yaml::from_str(&text).context("Failed to parse navigation manifest")?;
    let manifest = rewrite_urls(manifest, &config.base_url);
    let yaml = serde_yaml::to_string(&manifest).context("Failed to serialize navigation manifest")?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        runtime.create_dir_all(parent)?;
    }
    runtime.write(&config.output, yaml.as_bytes())?;

    debug!("Wrote {} bytes to {}", yaml.len(), config.output.display());
    println!("Wrote navigation to {}", config.output.display());
    Ok(())
}
