//! Organization and release listings read through the GitHub CLI (`gh api`).

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use serde::de::DeserializeOwned;

use crate::runtime::Runtime;

mod types;

pub use types::{Release, Repository};

pub const DEFAULT_GH: &str = "gh";
pub const GH_INSTALL_URL: &str = "https://cli.github.com/";

#[cfg_attr(test, mockall::automock)]
pub trait ReleaseSource {
    /// Fails when the CLI cannot be run at all.
    fn check_available(&self) -> Result<()>;
    fn list_repositories(&self, org: &str) -> Result<Vec<Repository>>;
    fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>>;
}

/// [`ReleaseSource`] backed by the `gh` executable.
pub struct GhCli<'a, R: Runtime> {
    runtime: &'a R,
    program: String,
}

impl<'a, R: Runtime> GhCli<'a, R> {
    pub fn new(runtime: &'a R, program: impl Into<String>) -> Self {
        Self {
            runtime,
            program: program.into(),
        }
    }

    /// Run `gh api <endpoint> --paginate` and flatten the pages.
    #[tracing::instrument(skip(self))]
    fn api_paginated<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let args = vec![
            "api".to_string(),
            endpoint.to_string(),
            "--paginate".to_string(),
        ];
        let output = self.runtime.run_command(&self.program, &args)?;

        if !output.success {
            let code = output
                .code
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            bail!(
                "'{} api {}' exited with status {}: {}",
                self.program,
                endpoint,
                code,
                output.stderr.trim()
            );
        }

        parse_paginated(&output.stdout)
            .with_context(|| format!("Failed to parse JSON from '{}'", endpoint))
    }
}

impl<R: Runtime> ReleaseSource for GhCli<'_, R> {
    #[tracing::instrument(skip(self))]
    fn check_available(&self) -> Result<()> {
        let args = vec!["--version".to_string()];
        let available = matches!(
            self.runtime.run_command(&self.program, &args),
            Ok(output) if output.success
        );

        if !available {
            return Err(anyhow!(
                "GitHub CLI ({}) is not installed or not available in PATH\n\
                 Please install it from: {}",
                self.program,
                GH_INSTALL_URL
            ));
        }
        Ok(())
    }

    fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        self.api_paginated(&format!("orgs/{}/repos", org))
    }

    fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>> {
        self.api_paginated(&format!("repos/{}/{}/releases", org, repo))
    }
}

/// `gh --paginate` prints one JSON array per page back to back (`[..][..]`).
pub fn parse_paginated<T: DeserializeOwned>(stdout: &str) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for page in serde_json::Deserializer::from_str(stdout).into_iter::<Vec<T>>() {
        items.extend(page?);
    }
    debug!("Parsed {} item(s)", items.len());
    Ok(items)
}
