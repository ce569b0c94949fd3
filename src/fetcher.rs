use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use tracing::{info, warn};

use crate::context::Context;
use crate::error::FetchError;

const UNTITLED: &str = "No Title";

/// One item from a feed, as read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    /// Empty when the entry carries no link
    pub link: String,
    /// Possibly HTML, possibly empty
    pub raw_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFeed {
    pub title: String,
    pub entries: Vec<FeedEntry>,
}

impl FetchedFeed {
    /// What an unreachable or unparseable feed yields: the URL as its title
    /// and nothing to summarize.
    pub fn empty(url: &str) -> Self {
        Self {
            title: url.to_string(),
            entries: Vec::new(),
        }
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Never fails; problems are logged and produce [`FetchedFeed::empty`].
    async fn fetch(&self, url: &str) -> FetchedFeed;
}

pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(ctx: &Context) -> Self {
        Self {
            client: ctx.http().clone(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn try_fetch(&self, url: &str) -> Result<FetchedFeed, FetchError> {
        info!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = response.bytes().await?;

        let feed = parse_feed(&bytes, url)?;
        info!("Found {} entries in '{}'", feed.entries.len(), feed.title);
        Ok(feed)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> FetchedFeed {
        match self.try_fetch(url).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!("Failed to fetch feed '{}': {}", url, e);
                FetchedFeed::empty(url)
            }
        }
    }
}

/// Parse an RSS, Atom or JSON feed document, keeping entries in feed order.
pub fn parse_feed(bytes: &[u8], url: &str) -> Result<FetchedFeed, FetchError> {
    let parsed = parser::parse(bytes)?;

    let title = parsed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.to_string());

    let entries = parsed.entries.into_iter().map(convert_entry).collect();

    Ok(FetchedFeed { title, entries })
}

fn convert_entry(entry: feed_rs::model::Entry) -> FeedEntry {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    // Atom releases often only carry <content>
    let raw_summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();

    FeedEntry {
        title,
        link,
        raw_summary,
    }
}
