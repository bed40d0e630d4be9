//! Command entry points.
//!
//! Each command turns its config into work against a [`Runtime`](crate::runtime::Runtime).

pub mod config;
mod nav;
mod posts;
mod releases;

pub use nav::nav;
pub use posts::posts;
pub use releases::{ReleasesSummary, generate, releases};
