// src/source/releases.rs
// =============================================================================
// This module lists the newest releases across the account's repositories.
//
// How it works:
// 1. One GraphQL query: up to 100 public repositories, each with its single
//    most recent release
// 2. Flatten every release into a ReleaseRecord that remembers its repository
// 3. Sort newest first (stable, so equal timestamps keep query order)
// 4. Keep the top 10
//
// Releases without a publishedAt (drafts) have no date to sort by and are
// left out.
// =============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{lines_to_block, Block, FetchError, SectionSource};
use crate::format::short_date;
use crate::github::{Connection, GitHubClient};
use crate::update::Section;

const RELEASES_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 100, privacy: PUBLIC, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        name
        url
        releases(first: 1, orderBy: {field: CREATED_AT, direction: DESC}) {
          nodes {
            name
            publishedAt
            url
          }
        }
      }
    }
  }
}
"#;

const RELEASE_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct ReleasesData {
    user: Option<ReleasesUser>,
}

#[derive(Debug, Deserialize)]
struct ReleasesUser {
    repositories: Connection<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryNode {
    pub name: String,
    pub url: String,
    pub releases: Option<Connection<ReleaseNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNode {
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    pub name: String,
    pub repo_name: String,
    pub repo_url: String,
    pub published_at: DateTime<Utc>,
    pub url: String,
}

impl ReleaseRecord {
    pub fn render(&self) -> String {
        format!(
            "- [{}]({}) in [{}]({}) - *{}*",
            self.name,
            self.url,
            self.repo_name,
            self.repo_url,
            short_date(&self.published_at)
        )
    }
}

// Flattens, sorts newest first, and caps the release list
pub fn collect_releases(repositories: &[RepositoryNode]) -> Vec<ReleaseRecord> {
    let mut records: Vec<ReleaseRecord> = repositories
        .iter()
        .flat_map(|repo| {
            repo.releases
                .iter()
                .flat_map(|connection| connection.nodes.iter())
                .filter_map(move |release| {
                    Some(ReleaseRecord {
                        name: release
                            .name
                            .clone()
                            .filter(|n| !n.trim().is_empty())
                            .unwrap_or_else(|| "Unnamed Release".to_string()),
                        repo_name: repo.name.clone(),
                        repo_url: repo.url.clone(),
                        published_at: release.published_at?,
                        url: release.url.clone(),
                    })
                })
        })
        .collect();

    // sort_by is stable: ties keep their query order
    records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    records.truncate(RELEASE_LIMIT);
    records
}

pub fn render_releases(records: &[ReleaseRecord]) -> Block {
    lines_to_block(records.iter().map(ReleaseRecord::render).collect(), "\n")
}

pub struct ReleasesSource {
    client: GitHubClient,
    username: String,
}

impl ReleasesSource {
    pub fn new(client: GitHubClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }
}

#[async_trait]
impl SectionSource for ReleasesSource {
    fn section(&self) -> Section {
        Section::RecentReleases
    }

    async fn fetch(&self) -> Result<Block, FetchError> {
        if !self.client.has_token() {
            return Ok(Block::NotConfigured);
        }

        let data: ReleasesData = self
            .client
            .graphql(RELEASES_QUERY, json!({ "login": self.username }))
            .await?;
        let user = data.user.ok_or(FetchError::MissingField("user"))?;

        let records = collect_releases(&user.repositories.nodes);
        Ok(render_releases(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_support::config_for;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo(name: &str, releases: &[(&str, &str)]) -> RepositoryNode {
        let nodes = releases
            .iter()
            .map(|(tag, date)| ReleaseNode {
                name: Some(tag.to_string()),
                published_at: Some(date.parse().unwrap()),
                url: format!("https://github.com/o/{}/releases/tag/{}", name, tag),
            })
            .collect();
        RepositoryNode {
            name: name.to_string(),
            url: format!("https://github.com/o/{}", name),
            releases: Some(Connection { nodes }),
        }
    }

    #[test]
    fn test_sorted_newest_first_across_repos() {
        let repos = vec![
            repo("a", &[("v1", "2024-01-01T00:00:00Z")]),
            repo("b", &[("v2", "2024-03-01T00:00:00Z")]),
            repo("c", &[("v3", "2023-12-01T00:00:00Z")]),
        ];
        let dates: Vec<String> = collect_releases(&repos)
            .iter()
            .map(|r| r.published_at.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-01", "2023-12-01"]);
    }

    #[test]
    fn test_ties_keep_query_order() {
        let repos = vec![
            repo("first", &[("v1", "2024-01-01T00:00:00Z")]),
            repo("second", &[("v1", "2024-01-01T00:00:00Z")]),
        ];
        let names: Vec<String> = collect_releases(&repos).into_iter().map(|r| r.repo_name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_capped_at_ten() {
        let repos: Vec<RepositoryNode> = (1..=15)
            .map(|day| {
                let date = format!("2024-01-{:02}T00:00:00Z", day);
                repo(&format!("r{}", day), &[("v1", date.as_str())])
            })
            .collect();
        let records = collect_releases(&repos);
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].repo_name, "r15");
        assert_eq!(records[9].repo_name, "r6");
    }

    #[test]
    fn test_unnamed_and_unpublished() {
        let repos = vec![RepositoryNode {
            name: "tool".into(),
            url: "https://github.com/o/tool".into(),
            releases: Some(Connection {
                nodes: vec![
                    ReleaseNode {
                        name: None,
                        published_at: Some("2024-02-03T00:00:00Z".parse().unwrap()),
                        url: "https://github.com/o/tool/releases/tag/v0.1".into(),
                    },
                    ReleaseNode {
                        name: Some("draft".into()),
                        published_at: None,
                        url: "https://github.com/o/tool/releases/tag/untagged".into(),
                    },
                ],
            }),
        }];
        assert_eq!(
            render_releases(&collect_releases(&repos)),
            Block::Content(
                "- [Unnamed Release](https://github.com/o/tool/releases/tag/v0.1) in \
                 [tool](https://github.com/o/tool) - *Feb 03, 2024*"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_without_token_no_request_is_made() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = config_for(&server.uri(), None);
        let client = GitHubClient::new(reqwest::Client::new(), &config);
        let block = ReleasesSource::new(client, "octocat").fetch().await.unwrap();
        assert_eq!(block, Block::NotConfigured);
    }

    #[tokio::test]
    async fn test_fetch_with_no_releases_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "user": { "repositories": { "nodes": [
                    { "name": "a", "url": "https://github.com/o/a", "releases": { "nodes": [] } },
                    { "name": "b", "url": "https://github.com/o/b", "releases": { "nodes": [] } }
                ] } } }
            })))
            .mount(&server)
            .await;

        let config = config_for(&server.uri(), Some("t"));
        let client = GitHubClient::new(reqwest::Client::new(), &config);
        let block = ReleasesSource::new(client, "octocat").fetch().await.unwrap();
        assert_eq!(block, Block::Empty);
    }
}
