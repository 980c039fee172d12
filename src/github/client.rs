// src/github/client.rs
// =============================================================================
// This module talks to the GitHub APIs.
//
// Two transports:
// - REST: GET /users/{login}/events/public for the activity feed
// - GraphQL: POST {query, variables} for pinned items and releases
//
// Authentication is optional for REST (it only raises the rate limit) and
// mandatory for GraphQL. Callers check for a token before using graphql().
//
// Rust concepts:
// - Generics with trait bounds: graphql<T: DeserializeOwned>
// - serde: mapping JSON responses onto structs
// =============================================================================

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::events::RawEvent;
use crate::config::Config;
use crate::source::FetchError;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    graphql_url: Url,
    token: Option<String>,
}

// The standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

// A GraphQL list field, read through its `nodes`
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl GitHubClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            graphql_url: config.graphql_url.clone(),
            token: config.token.clone(),
        }
    }

    // Fetches the most recent public events of an account, newest first
    //
    // Parameters:
    //   login: GitHub username
    //   limit: how many events to ask for (GitHub's per_page)
    pub async fn public_events(&self, login: &str, limit: usize) -> Result<Vec<RawEvent>, FetchError> {
        let url = format!(
            "{}/users/{}/events/public",
            self.api_url.as_str().trim_end_matches('/'),
            login
        );
        debug!(%url, "fetching public events");

        let request = self
            .http
            .get(&url)
            .query(&[("per_page", limit)])
            .header("Accept", "application/vnd.github+json");
        let response = check_status(&url, self.authorize(request).send().await?)?;

        let mut events: Vec<RawEvent> = response.json().await?;
        events.truncate(limit);
        Ok(events)
    }

    // Runs a GraphQL query and returns its `data` payload
    //
    // A response with a non-empty `errors` array is a failure even when
    // partial data came back with it.
    pub async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, FetchError> {
        let url = self.graphql_url.as_str();
        debug!(%url, "running GraphQL query");

        let body = json!({ "query": query, "variables": variables });
        let request = self.http.post(url).json(&body);
        let response = check_status(url, self.authorize(request).send().await?)?;

        let envelope: GraphQlResponse<T> = response.json().await?;
        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            warn!(?messages, "GraphQL query returned errors");
            return Err(FetchError::GraphQl(messages));
        }

        envelope.data.ok_or(FetchError::MissingField("data"))
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn check_status(url: &str, response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            url: url.to_string(),
            status,
        })
    }
}
