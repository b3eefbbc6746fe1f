use crate::config::Config;
use crate::content::ItemExtractor;
use crate::error::Result;
use crate::feed::fetcher::FeedFetcher;
use crate::feed::validator::resolve_limit;
use crate::feed::{Feed, NormalizedRecord};
use crate::render::{OutputMode, Renderer};
use tracing::info;

/// One run of the reader: fetch a feed, bound it, extract records, render them.
///
/// All parser and template state is owned here and handed to each step.
pub struct NewsReader {
    fetcher: FeedFetcher,
    extractor: ItemExtractor,
    renderer: Renderer,
}

impl NewsReader {
    pub fn new(fetcher: FeedFetcher, extractor: ItemExtractor, renderer: Renderer) -> Self {
        Self {
            fetcher,
            extractor,
            renderer,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            FeedFetcher::from_settings(&config.http)?,
            ItemExtractor::new(),
            Renderer::from_settings(&config.output)?,
        ))
    }

    pub async fn fetch(&self, url: &str) -> Result<Feed> {
        self.fetcher.fetch_feed(url).await
    }

    /// Resolve `limit` against the feed size, then extract that many records.
    pub fn extract(&self, feed: &Feed, limit: Option<usize>) -> Result<Vec<NormalizedRecord>> {
        let limit = resolve_limit(limit, feed.total_items())?;
        info!("Extracting {} of {} items from '{}'", limit, feed.total_items(), feed.name);
        self.extractor.extract(&feed.raw_items, limit)
    }

    pub fn render(&self, feed: &Feed, records: &[NormalizedRecord], mode: OutputMode) -> Result<String> {
        self.renderer.render(&feed.name, records, mode)
    }

    pub async fn run(&self, url: &str, limit: Option<usize>, mode: OutputMode) -> Result<String> {
        let feed = self.fetch(url).await?;
        let records = self.extract(&feed, limit)?;
        self.render(&feed, &records, mode)
    }
}
