// src/github/mod.rs
// =============================================================================
// This module handles talking to GitHub.
//
// Currently implements:
// - A small REST + GraphQL client (client.rs)
// - Wire types for the public events feed (events.rs)
//
// The shared GraphQL `Connection` wrapper lives in client.rs; the query-specific
// response shapes live next to the sources that query them.
// =============================================================================

mod client;
mod events;

pub use client::{Connection, GitHubClient};
pub use events::RawEvent;
