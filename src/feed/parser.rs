use crate::content::decode_entities;
use crate::error::{Error, Result};
use crate::feed::{Feed, RawItem};
use feed_rs::model::Link;
use feed_rs::parser as feed_parser;
use std::io::BufRead;
use tracing::debug;

pub struct FeedParser;

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse an RSS or Atom document. `url` is recorded on the returned feed.
    pub fn parse_feed<R: BufRead>(&self, reader: R, url: &str) -> Result<Feed> {
        let feed = feed_parser::parse(reader)
            .map_err(|e| Error::InvalidSource(format!("{} is not a valid feed: {}", url, e)))?;

        let name = feed
            .title
            .map(|t| decode_entities(&t.content))
            .unwrap_or_else(|| "Untitled Feed".to_string());

        let raw_items: Vec<RawItem> = feed
            .entries
            .into_iter()
            .map(|entry| RawItem {
                title: entry.title.map(|t| t.content),
                link: article_link(&entry.links),
                published: entry.published.or(entry.updated),
                description: entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body)),
            })
            .collect();

        debug!("Parsed feed '{}' with {} items", name, raw_items.len());

        Ok(Feed {
            name,
            url: url.to_string(),
            raw_items,
        })
    }

    pub fn validate_feed_url(&self, url: &str) -> Result<()> {
        let parsed_url = url::Url::parse(url)
            .map_err(|e| Error::InvalidSource(format!("Invalid URL {:?}: {}", url, e)))?;

        match parsed_url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::InvalidSource(format!("Unsupported scheme: {}", scheme))),
        }
    }
}

/// The entry's article URL: the first `alternate` (or untyped) link, else the first link.
fn article_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
}
