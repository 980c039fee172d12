// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag has a sensible default, so a plain `readme-refresh` inside the
// profile repository does the right thing. Secrets come from the environment
// (or a .env file) rather than the command line.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: flags that may legitimately be absent
// =============================================================================

use std::path::PathBuf;

use clap::Parser;
use url::Url;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "readme-refresh",
    version,
    about = "Refresh the dynamic sections of a GitHub profile README",
    long_about = "readme-refresh pulls recent GitHub activity, blog posts, pinned repositories \
                  and releases, then rewrites the matching <!-- name starts --> / \
                  <!-- name ends --> regions of the README in place."
)]
pub struct Cli {
    /// Path to the README to update
    #[arg(long, default_value = "README.md")]
    pub readme: PathBuf,

    /// GitHub account whose activity, pins and releases are shown
    #[arg(long, default_value = "micahwalter")]
    pub username: String,

    /// GitHub token; required for featured projects and releases
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// RSS or Atom feed of the blog
    #[arg(long, env = "BLOG_FEED_URL")]
    pub feed_url: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: Url,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = "https://api.github.com/graphql")]
    pub graphql_url: Url,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Print the updated README to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}
