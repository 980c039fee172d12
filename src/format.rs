// src/format.rs
// =============================================================================
// Small text helpers shared by the section renderers.
// =============================================================================

use chrono::{DateTime, Utc};

// Formats a timestamp the way the README shows dates: "Jan 05, 2024"
pub fn short_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %d, %Y").to_string()
}

// Upper-cases the first character and lower-cases the rest
//
// Example: "reopened" -> "Reopened", "CLOSED" -> "Closed"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// "1 commit", "3 commits"
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn github_repo_url(repo: &str) -> String {
    format!("https://github.com/{}", repo)
}
