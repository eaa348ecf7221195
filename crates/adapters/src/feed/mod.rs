//! Subreddit feed adapters

mod atom;

pub use atom::parse_atom_entries;

use async_trait::async_trait;
use reqwest::Client;
use trendpost_domain::{FeedEntry, FeedError, FeedSource};

pub const DEFAULT_FEED_URL: &str = "https://www.reddit.com/r/artificial/.rss";
pub const DEFAULT_USER_AGENT: &str = concat!("trendpost/", env!("CARGO_PKG_VERSION"));

/// Feed source that GETs an Atom document over HTTP
pub struct HttpFeedSource {
    client: Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: String, user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, FeedError> {
        tracing::debug!(url = %self.url, "Fetching feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let entries = parse_atom_entries(&body)?;

        tracing::info!(url = %self.url, entries = entries.len(), "Fetched feed");
        Ok(entries)
    }
}
