use crate::config::HttpSettings;
use crate::error::{Error, Result};
use crate::feed::parser::FeedParser;
use crate::feed::Feed;
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Single-shot feed downloader. No retries: one request per call.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    timeout_duration: Duration,
    user_agent: String,
}

impl FeedFetcher {
    pub fn new() -> Result<Self> {
        Self::from_settings(&HttpSettings::default())
    }

    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        let timeout_duration = Duration::from_secs(settings.timeout);
        let client = Client::builder()
            .timeout(timeout_duration)
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .gzip(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_duration,
            user_agent: settings.user_agent.clone(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_duration = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub async fn fetch_feed(&self, url: &str) -> Result<Feed> {
        debug!("Fetching feed from: {}", url);

        let parser = FeedParser::new();
        parser.validate_feed_url(url)?;

        let response = timeout(self.timeout_duration, self.fetch_response(url))
            .await
            .map_err(|_| Error::FetchFailed(format!("Request to {} timed out", url)))??;

        if !response.status().is_success() {
            return Err(Error::FetchFailed(format!(
                "Bad response status code {} for {}: {}",
                response.status().as_u16(),
                url,
                response.status().canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| Error::FetchFailed(format!("Failed to read response body: {}", e)))?;

        debug!("Downloaded {} bytes from {}", content.len(), url);

        let feed = parser.parse_feed(std::io::Cursor::new(content), url)?;
        info!("Fetched '{}' with {} items", feed.name, feed.total_items());
        Ok(feed)
    }

    async fn fetch_response(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header(
                "Accept",
                "application/rss+xml, application/atom+xml, application/xml, text/xml, */*",
            )
            .send()
            .await
            .map_err(|e| Error::FetchFailed(format!("Request to {} failed: {}", url, e)))
    }
}
