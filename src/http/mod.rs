//! HTTP access for remote documents.

mod client;

#[cfg(test)]
pub use client::MockFetchText;
pub use client::{FetchText, HttpClient};
