// src/source/projects.rs
// =============================================================================
// This module renders the account's pinned repositories.
//
// Pinned items are only exposed through GraphQL, which needs a token. Without
// one the source reports NotConfigured and makes no request at all.
// =============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{lines_to_block, Block, FetchError, SectionSource};
use crate::github::{Connection, GitHubClient};
use crate::update::Section;

const PINNED_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    pinnedItems(first: 6, types: REPOSITORY) {
      nodes {
        ... on Repository {
          name
          description
          url
          stargazerCount
          primaryLanguage {
            name
          }
        }
      }
    }
  }
}
"#;

const PROJECT_LIMIT: usize = 6;

#[derive(Debug, Deserialize)]
struct PinnedData {
    user: Option<PinnedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PinnedUser {
    pinned_items: Connection<FeaturedProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedProject {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub stargazer_count: u64,
    pub primary_language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    pub name: String,
}

impl FeaturedProject {
    pub fn render(&self) -> String {
        let description = self
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided");
        let language = self
            .primary_language
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("Unknown");

        format!(
            "### [{}]({})\n{}\n\n**Language**: {} | **Stars**: {}",
            self.name, self.url, description, language, self.stargazer_count
        )
    }
}

pub fn render_projects(projects: &[FeaturedProject]) -> Block {
    let blocks = projects.iter().take(PROJECT_LIMIT).map(FeaturedProject::render).collect();
    lines_to_block(blocks, "\n\n")
}

pub struct ProjectsSource {
    client: GitHubClient,
    username: String,
}

impl ProjectsSource {
    pub fn new(client: GitHubClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }
}

#[async_trait]
impl SectionSource for ProjectsSource {
    fn section(&self) -> Section {
        Section::FeaturedProjects
    }

    async fn fetch(&self) -> Result<Block, FetchError> {
        if !self.client.has_token() {
            return Ok(Block::NotConfigured);
        }

        let data: PinnedData = self
            .client
            .graphql(PINNED_QUERY, json!({ "login": self.username }))
            .await?;
        let user = data.user.ok_or(FetchError::MissingField("user"))?;

        Ok(render_projects(&user.pinned_items.nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_support::config_for;
    use serde_json::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer, token: Option<&str>) -> ProjectsSource {
        let config = config_for(&server.uri(), token);
        let client = GitHubClient::new(reqwest::Client::new(), &config);
        ProjectsSource::new(client, "octocat")
    }

    async fn respond_with(server: &MockServer, body: Value) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_render_project() {
        let project = FeaturedProject {
            name: "hello".into(),
            url: "https://github.com/octocat/hello".into(),
            description: None,
            stargazer_count: 42,
            primary_language: None,
        };
        assert_eq!(
            project.render(),
            "### [hello](https://github.com/octocat/hello)\nNo description provided\n\n\
             **Language**: Unknown | **Stars**: 42"
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

        let block = source(&server, None).fetch().await.unwrap();
        assert_eq!(block, Block::NotConfigured);
    }

    #[tokio::test]
    async fn test_projects_keep_pin_order() {
        let server = MockServer::start().await;
        respond_with(
            &server,
            json!({ "data": { "user": { "pinnedItems": { "nodes": [
                { "name": "zeta", "description": "Last letter", "url": "https://github.com/o/zeta",
                  "stargazerCount": 1, "primaryLanguage": { "name": "Rust" } },
                { "name": "alpha", "description": null, "url": "https://github.com/o/alpha",
                  "stargazerCount": 900, "primaryLanguage": null }
            ] } } } }),
        )
        .await;

        let block = source(&server, Some("t")).fetch().await.unwrap();
        assert_eq!(
            block,
            Block::Content(
                "### [zeta](https://github.com/o/zeta)\nLast letter\n\n**Language**: Rust | **Stars**: 1\n\n\
                 ### [alpha](https://github.com/o/alpha)\nNo description provided\n\n**Language**: Unknown | **Stars**: 900"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_no_pins_is_empty() {
        let server = MockServer::start().await;
        respond_with(&server, json!({ "data": { "user": { "pinnedItems": { "nodes": [] } } } })).await;

        let block = source(&server, Some("t")).fetch().await.unwrap();
        assert_eq!(block, Block::Empty);
    }

    #[tokio::test]
    async fn test_query_errors_are_failures() {
        let server = MockServer::start().await;
        respond_with(&server, json!({ "errors": [{ "message": "Bad credentials" }] })).await;

        let err = source(&server, Some("t")).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::GraphQl(_)));
    }
}
