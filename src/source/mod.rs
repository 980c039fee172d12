// src/source/mod.rs
// =============================================================================
// This module contains the four section sources that feed the README.
//
// Submodules:
// - activity: Recent public GitHub events
// - blog: Latest posts from an RSS/Atom feed
// - projects: Pinned repositories (GraphQL)
// - releases: Latest releases across public repositories (GraphQL)
//
// Every source returns Result<Block, FetchError>. Sources never produce the
// "*Unable to fetch ...*" style placeholders themselves; the updater maps
// Block::Empty, Block::NotConfigured and errors to the right text per section.
// =============================================================================

mod activity;
mod blog;
mod projects;
mod releases;

pub use activity::ActivitySource;
pub use blog::BlogSource;
pub use projects::ProjectsSource;
pub use releases::ReleasesSource;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::Config;
use crate::update::Section;

// What a source produced when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Rendered Markdown, ready to splice into the README
    Content(String),
    /// The source answered but had nothing to show
    Empty,
    /// The source was skipped because a setting (token, feed URL) is missing
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("could not parse feed: {0}")]
    Feed(String),

    #[error("response is missing field `{0}`")]
    MissingField(&'static str),
}

#[async_trait]
pub trait SectionSource: Send + Sync {
    fn section(&self) -> Section;
    async fn fetch(&self) -> Result<Block, FetchError>;
}

// One HTTP client per run: fixed timeout, and a User-Agent because the
// GitHub API rejects requests without one
pub fn http_client(config: &Config) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

// Joins rendered lines, or reports Empty when there are none
fn lines_to_block(lines: Vec<String>, separator: &str) -> Block {
    if lines.is_empty() {
        Block::Empty
    } else {
        Block::Content(lines.join(separator))
    }
}
