pub mod fetcher;
pub mod parser;
pub mod validator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fetched feed. Built once per run and not modified afterwards.
#[derive(Debug, Clone)]
pub struct Feed {
    /// Feed title with HTML entities decoded.
    pub name: String,
    pub url: String,
    pub raw_items: Vec<RawItem>,
}

/// One entry as it came out of the feed, before any cleanup.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// HTML-bearing description (RSS `<description>`, Atom summary or content).
    pub description: Option<String>,
}

/// The cleaned, flattened form of a feed entry used for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub link: String,
    pub date: String,
    pub text: String,
    pub image_link: Option<String>,
    pub image_title: Option<String>,
}

impl Feed {
    pub fn total_items(&self) -> usize {
        self.raw_items.len()
    }
}
