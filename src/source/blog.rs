// src/source/blog.rs
// =============================================================================
// This module lists the latest blog posts from an RSS or Atom feed.
//
// Strategy:
// - Download the feed with the shared (timed) HTTP client
// - Try RSS 2.0 first with the `rss` crate
// - If that fails, try Atom with `atom_syndication`
// - Keep the first 5 entries in feed order
// =============================================================================

use async_trait::async_trait;
use tracing::debug;

use super::{lines_to_block, Block, FetchError, SectionSource};
use crate::update::Section;

const POST_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl BlogPost {
    fn new(title: Option<&str>, link: Option<&str>) -> Self {
        Self {
            title: present(title),
            link: present(link),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "- [{}]({})",
            self.title.as_deref().unwrap_or("Untitled"),
            self.link.as_deref().unwrap_or("#")
        )
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Parses a feed body as RSS, then as Atom
pub fn parse_feed(body: &[u8]) -> Result<Vec<BlogPost>, FetchError> {
    let rss_error = match rss::Channel::read_from(body) {
        Ok(channel) => {
            return Ok(channel
                .items()
                .iter()
                .map(|item| BlogPost::new(item.title(), item.link()))
                .collect());
        }
        Err(e) => e,
    };

    match atom_syndication::Feed::read_from(body) {
        Ok(feed) => Ok(feed
            .entries()
            .iter()
            .map(|entry| {
                // Atom entries often carry self/replies links too; the
                // alternate link is the post itself
                let links = entry.links();
                let link = links
                    .iter()
                    .find(|l| l.rel() == "alternate")
                    .or_else(|| links.first())
                    .map(|l| l.href());
                BlogPost::new(Some(entry.title().value.as_str()), link)
            })
            .collect()),
        Err(atom_error) => Err(FetchError::Feed(format!(
            "not RSS ({}) and not Atom ({})",
            rss_error, atom_error
        ))),
    }
}

pub fn render_posts(posts: &[BlogPost]) -> Block {
    let lines = posts.iter().take(POST_LIMIT).map(BlogPost::render).collect();
    lines_to_block(lines, "\n")
}

pub struct BlogSource {
    http: reqwest::Client,
    feed_url: Option<String>,
}

impl BlogSource {
    pub fn new(http: reqwest::Client, feed_url: Option<String>) -> Self {
        Self { http, feed_url }
    }
}

#[async_trait]
impl SectionSource for BlogSource {
    fn section(&self) -> Section {
        Section::RecentPosts
    }

    async fn fetch(&self) -> Result<Block, FetchError> {
        let Some(url) = &self.feed_url else {
            return Ok(Block::NotConfigured);
        };
        debug!(%url, "fetching blog feed");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response.bytes().await?;
        let posts = parse_feed(&body)?;
        Ok(render_posts(&posts))
    }
}
