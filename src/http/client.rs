//! HTTP client for fetching text documents.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// Something that can fetch a document body by URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchText: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// Thin wrapper over a reqwest `Client`. Each request is attempted once.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the crate's user agent.
    pub fn build() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bookdocs/", env!("BOOKDOCS_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl FetchText for HttpClient {
    #[tracing::instrument(skip(self))]
    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let body = response
            .error_for_status()
            .with_context(|| format!("Request to {} failed", url))?
            .text()
            .await
            .context("Failed to read response body")?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
