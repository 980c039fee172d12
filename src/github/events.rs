// src/github/events.rs
// =============================================================================
// Wire types for the GitHub events API.
//
// Only the fields we render are modelled. The payload differs per event type,
// so every payload field is optional here and the activity source decides
// which ones are required for which kind.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pub action: Option<String>,
    pub commits: Option<Vec<Value>>,
    pub size: Option<usize>,
    pub pull_request: Option<Numbered>,
    pub issue: Option<Numbered>,
    pub ref_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Numbered {
    pub number: u64,
}

impl EventPayload {
    // Number of commits in a push. GitHub trims or drops the `commits` list
    // on large pushes, while `size` always holds the full count, so it stands
    // in whenever the list is missing.
    pub fn commit_count(&self) -> usize {
        match (&self.commits, self.size) {
            (Some(commits), _) => commits.len(),
            (None, Some(size)) => size,
            (None, None) => 0,
        }
    }
}
