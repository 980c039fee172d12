// src/source/activity.rs
// =============================================================================
// This module turns the public GitHub event stream into a short activity list.
//
// How it works:
// 1. Ask GitHub for the 10 most recent public events
// 2. Convert each supported event into an ActivityItem
//    (push, pull request, issue, star, create; everything else is skipped)
// 3. Render each item as one Markdown bullet
// 4. Keep the first 8 lines, in the order GitHub returned them
//
// Rust concepts:
// - Enums with data: each event kind carries only the fields it needs
// - Result<Option<T>>: "failed" vs "nothing to show" vs "here is an item"
// =============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{lines_to_block, Block, FetchError, SectionSource};
use crate::format::{capitalize, github_repo_url, plural, short_date};
use crate::github::{GitHubClient, RawEvent};
use crate::update::Section;

const EVENT_LIMIT: usize = 10;
const LINE_LIMIT: usize = 8;

// One line of recent activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub repo: String,
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    Push { commits: usize },
    PullRequest { action: String, number: u64 },
    Issue { action: String, number: u64 },
    Star,
    Create { ref_type: String },
}

impl ActivityItem {
    // Converts a raw event into an item
    //
    // Returns:
    //   Ok(Some(item)) for supported kinds
    //   Ok(None) for kinds we don't show (forks, comments, ...)
    //   Err(MissingField) when a supported kind lacks a field it needs
    pub fn from_event(event: &RawEvent) -> Result<Option<Self>, FetchError> {
        let payload = &event.payload;
        let kind = match event.kind.as_str() {
            "PushEvent" => ActivityKind::Push {
                commits: payload.commit_count(),
            },
            "PullRequestEvent" => ActivityKind::PullRequest {
                action: payload.action.clone().ok_or(FetchError::MissingField("action"))?,
                number: payload
                    .pull_request
                    .as_ref()
                    .map(|pr| pr.number)
                    .ok_or(FetchError::MissingField("pull_request.number"))?,
            },
            "IssuesEvent" => ActivityKind::Issue {
                action: payload.action.clone().ok_or(FetchError::MissingField("action"))?,
                number: payload
                    .issue
                    .as_ref()
                    .map(|issue| issue.number)
                    .ok_or(FetchError::MissingField("issue.number"))?,
            },
            "WatchEvent" => ActivityKind::Star,
            "CreateEvent" => ActivityKind::Create {
                ref_type: payload
                    .ref_type
                    .clone()
                    .unwrap_or_else(|| "repository".to_string()),
            },
            _ => return Ok(None),
        };

        Ok(Some(Self {
            repo: event.repo.name.clone(),
            at: event.created_at,
            kind,
        }))
    }

    pub fn render(&self) -> String {
        let repo = &self.repo;
        let repo_url = github_repo_url(repo);
        let date = short_date(&self.at);

        match &self.kind {
            ActivityKind::Push { commits: 0 } => {
                format!("- Pushed to [{}]({}) - *{}*", repo, repo_url, date)
            }
            ActivityKind::Push { commits } => format!(
                "- Pushed {} to [{}]({}) - *{}*",
                plural(*commits, "commit"),
                repo,
                repo_url,
                date
            ),
            ActivityKind::PullRequest { action, number } => format!(
                "- {} pull request [#{}]({}/pull/{}) in {} - *{}*",
                capitalize(action),
                number,
                repo_url,
                number,
                repo,
                date
            ),
            ActivityKind::Issue { action, number } => format!(
                "- {} issue [#{}]({}/issues/{}) in {} - *{}*",
                capitalize(action),
                number,
                repo_url,
                number,
                repo,
                date
            ),
            ActivityKind::Star => format!("- Starred [{}]({}) - *{}*", repo, repo_url, date),
            ActivityKind::Create { ref_type } => {
                format!("- Created {} in [{}]({}) - *{}*", ref_type, repo, repo_url, date)
            }
        }
    }
}

// Renders the activity block from raw events, newest first as given
pub fn render_activity(events: &[RawEvent]) -> Result<Block, FetchError> {
    let mut lines = Vec::new();
    for event in events {
        if let Some(item) = ActivityItem::from_event(event)? {
            lines.push(item.render());
        }
    }
    lines.truncate(LINE_LIMIT);
    Ok(lines_to_block(lines, "\n"))
}

pub struct ActivitySource {
    client: GitHubClient,
    username: String,
}

impl ActivitySource {
    pub fn new(client: GitHubClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }
}

#[async_trait]
impl SectionSource for ActivitySource {
    fn section(&self) -> Section {
        Section::RecentActivity
    }

    async fn fetch(&self) -> Result<Block, FetchError> {
        let events = self.client.public_events(&self.username, EVENT_LIMIT).await?;
        render_activity(&events)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Result<Option<ActivityItem>, FetchError>?
//    - Err: the event claims to be a pull request but has no number
//    - Ok(None): a kind we deliberately don't show
//    - Ok(Some(item)): something to render
//
// 2. What is `ActivityKind::Push { commits: 0 }` in a match?
//    - A pattern can match an exact field value
//    - Arms are tried top to bottom, so zero commits hits the first arm
//      and every other count falls through to the next one
// -----------------------------------------------------------------------------
