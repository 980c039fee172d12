// src/update.rs
// =============================================================================
// This module drives a full README refresh.
//
// What happens here:
// 1. Each source is fetched in turn (never concurrently)
// 2. Its result is turned into Markdown, or into that section's placeholder
// 3. The Markdown is patched into the README before the next source runs
//
// A failing source only affects its own section. Nothing here returns an
// error: the worst case is a README full of placeholders.
// =============================================================================

use std::io::Write;

use tracing::{error, info};

use crate::config::Config;
use crate::github::GitHubClient;
use crate::readme::patch;
use crate::source::{
    ActivitySource, BlogSource, Block, FetchError, ProjectsSource, ReleasesSource, SectionSource,
};

// The four dynamic regions of the README
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    RecentActivity,
    RecentPosts,
    FeaturedProjects,
    RecentReleases,
}

impl Section {
    // Name used in <!-- name starts --> / <!-- name ends -->
    pub fn marker(self) -> &'static str {
        match self {
            Section::RecentActivity => "recent_activity",
            Section::RecentPosts => "recent_posts",
            Section::FeaturedProjects => "featured_projects",
            Section::RecentReleases => "recent_releases",
        }
    }

    // Shown in the "Fetching ..." progress line
    pub fn label(self) -> &'static str {
        match self {
            Section::RecentActivity => "GitHub activity",
            Section::RecentPosts => "blog posts",
            Section::FeaturedProjects => "featured projects",
            Section::RecentReleases => "recent releases",
        }
    }

    fn empty_text(self) -> &'static str {
        match self {
            Section::RecentActivity => "*No recent activity*",
            Section::RecentPosts => "*No recent blog posts*",
            Section::FeaturedProjects => "*No pinned repositories*",
            Section::RecentReleases => "*No recent releases*",
        }
    }

    fn not_configured_text(self) -> &'static str {
        match self {
            // Activity works anonymously, so it never reports NotConfigured
            Section::RecentActivity => self.failure_text(),
            Section::RecentPosts => "*Blog feed URL not configured*",
            Section::FeaturedProjects => "*GitHub token required for featured projects*",
            Section::RecentReleases => "*GitHub token required for releases*",
        }
    }

    fn failure_text(self) -> &'static str {
        match self {
            Section::RecentActivity => "*Unable to fetch recent activity*",
            Section::RecentPosts => "*Unable to fetch blog posts*",
            Section::FeaturedProjects => "*Unable to fetch featured projects*",
            Section::RecentReleases => "*Unable to fetch releases*",
        }
    }

    // Turns a source result into the text that goes between the markers
    pub fn render(self, result: Result<Block, FetchError>) -> String {
        match result {
            Ok(Block::Content(text)) => text,
            Ok(Block::Empty) => self.empty_text().to_string(),
            Ok(Block::NotConfigured) => self.not_configured_text().to_string(),
            Err(e) => {
                error!(section = self.marker(), error = %e, "error fetching {}", self.label());
                self.failure_text().to_string()
            }
        }
    }
}

pub struct Updater {
    sources: Vec<Box<dyn SectionSource>>,
}

impl Updater {
    pub fn new(sources: Vec<Box<dyn SectionSource>>) -> Self {
        Self { sources }
    }

    // The standard lineup: activity, posts, projects, releases
    pub fn default_sources(config: &Config, http: reqwest::Client) -> Self {
        let github = GitHubClient::new(http.clone(), config);

        Self::new(vec![
            Box::new(ActivitySource::new(github.clone(), &config.username)),
            Box::new(BlogSource::new(http, config.feed_url.clone())),
            Box::new(ProjectsSource::new(github.clone(), &config.username)),
            Box::new(ReleasesSource::new(github, &config.username)),
        ])
    }

    // Fetches every section and returns the patched document
    //
    // Progress lines ("Fetching ...") go to `progress`. A broken progress
    // stream never stops the refresh.
    pub async fn refresh(&self, document: &str, progress: &mut dyn Write) -> String {
        let mut document = document.to_string();

        for source in &self.sources {
            let section = source.section();
            let _ = writeln!(progress, "Fetching {}...", section.label());

            let body = section.render(source.fetch().await);
            let patched = patch(&document, section.marker(), &body);
            if patched != document {
                info!(section = section.marker(), "section updated");
            }
            document = patched;
        }

        document
    }
}
