// GitHub API module.
// Provides the client and event types for the public user events feed.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::ActivityEvent;
