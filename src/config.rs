// src/config.rs
// =============================================================================
// Run configuration.
//
// Built once from the parsed command line and handed to the fetchers and the
// updater explicitly. Nothing reads environment variables after this point.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct Config {
    pub readme_path: PathBuf,
    pub username: String,
    pub token: Option<String>,
    pub feed_url: Option<String>,
    pub api_url: Url,
    pub graphql_url: Url,
    pub timeout: Duration,
    pub dry_run: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            readme_path: cli.readme,
            username: cli.username,
            token: non_empty(cli.token),
            feed_url: non_empty(cli.feed_url),
            api_url: cli.api_url,
            graphql_url: cli.graphql_url,
            timeout: Duration::from_secs(cli.timeout),
            dry_run: cli.dry_run,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

// GITHUB_TOKEN= in a workflow file yields Some(""), which means "no token"
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_empty_secrets_are_absent() {
        let cli = Cli::try_parse_from([
            "readme-refresh",
            "--token",
            "",
            "--feed-url",
            "  ",
        ])
        .unwrap();
        let config = Config::from_cli(cli);
        assert!(!config.has_token());
        assert!(config.feed_url.is_none());
    }

    #[test]
    fn test_values_are_carried_over() {
        let cli = Cli::try_parse_from([
            "readme-refresh",
            "--readme",
            "profile/README.md",
            "--username",
            "octocat",
            "--token",
            "ghp_abc",
            "--timeout",
            "3",
        ])
        .unwrap();
        let config = Config::from_cli(cli);
        assert_eq!(config.readme_path, PathBuf::from("profile/README.md"));
        assert_eq!(config.username, "octocat");
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
