use crate::content::decode_entities;
use crate::error::{Error, Result};
use crate::feed::{NormalizedRecord, RawItem};
use select::document::Document;
use select::predicate::Name;
use tracing::debug;

/// Turns raw feed entries into [`NormalizedRecord`]s.
///
/// Each item is handled on its own: image fields found in one description
/// never leak into the record of a later item.
#[derive(Debug, Clone, Default)]
pub struct ItemExtractor;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageInfo {
    link: String,
    title: Option<String>,
}

impl ItemExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the first `limit` items in feed order. Any malformed item
    /// aborts the whole extraction.
    pub fn extract(&self, items: &[RawItem], limit: usize) -> Result<Vec<NormalizedRecord>> {
        debug!("Extracting {} of {} items", limit.min(items.len()), items.len());

        items
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, item)| self.extract_item(item, index))
            .collect()
    }

    /// `index` is the item's position in the feed, used for error messages.
    pub fn extract_item(&self, item: &RawItem, index: usize) -> Result<NormalizedRecord> {
        let title = item
            .title
            .as_deref()
            .map(decode_entities)
            .ok_or_else(|| Error::MalformedItem(format!("item {} has no title", index)))?;

        let link = item
            .link
            .clone()
            .ok_or_else(|| Error::MalformedItem(format!("item {} ({}) has no link", index, title)))?;

        let date = item
            .published
            .map(|d| d.to_rfc2822())
            .ok_or_else(|| Error::MalformedItem(format!("item {} ({}) has no date", index, title)))?;

        let (text, image) = match item.description.as_deref() {
            Some(html) => {
                let document = Document::from(html);
                let image = Self::find_image(&document)
                    .map_err(|msg| Error::MalformedItem(format!("item {} ({}): {}", index, title, msg)))?;
                (Self::flatten_text(&document), image)
            }
            None => (String::new(), None),
        };

        let (image_link, image_title) = match image {
            Some(img) => (Some(img.link), img.title),
            None => (None, None),
        };

        Ok(NormalizedRecord {
            title,
            link,
            date,
            text,
            image_link,
            image_title,
        })
    }

    /// First `<img>` in the description, if any. An image without `src` is an error.
    fn find_image(document: &Document) -> std::result::Result<Option<ImageInfo>, String> {
        let Some(img) = document.find(Name("img")).next() else {
            return Ok(None);
        };

        let link = img
            .attr("src")
            .ok_or_else(|| "image has no src attribute".to_string())?;

        Ok(Some(ImageInfo {
            link: link.to_string(),
            title: img.attr("title").map(decode_entities),
        }))
    }

    /// Text content of the whole description with markup removed.
    fn flatten_text(document: &Document) -> String {
        let text = document
            .find(Name("body"))
            .next()
            .map(|body| body.text())
            .unwrap_or_default();

        decode_entities(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn raw_item(title: &str, description: &str) -> RawItem {
        RawItem {
            title: Some(title.to_string()),
            link: Some(format!("https://example.com/{}", title.len())),
            published: Some(Utc.with_ymd_and_hms(2024, 3, 16, 10, 0, 0).unwrap()),
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn test_image_and_caption() {
        let extractor = ItemExtractor::new();
        let item = raw_item("Pictured", r#"<img src="x.png" title="Y">caption</img>"#);

        let record = extractor.extract_item(&item, 0).unwrap();

        assert_eq!(record.image_link.as_deref(), Some("x.png"));
        assert_eq!(record.image_title.as_deref(), Some("Y"));
        assert_eq!(record.text, "caption");
    }

    #[test]
    fn test_entities_decoded_in_title_and_text() {
        let extractor = ItemExtractor::new();
        let item = raw_item("A &amp; B", "<p>A &amp; B</p>");

        let record = extractor.extract_item(&item, 0).unwrap();

        assert_eq!(record.title, "A & B");
        assert_eq!(record.text, "A & B");
    }

    #[test]
    fn test_image_title_is_decoded_and_optional() {
        let extractor = ItemExtractor::new();

        let with_title = raw_item("one", r#"<img src="a.jpg" title="Tom &amp; Jerry">"#);
        let record = extractor.extract_item(&with_title, 0).unwrap();
        assert_eq!(record.image_title.as_deref(), Some("Tom & Jerry"));

        let without_title = raw_item("two", r#"<img src="b.jpg"> text"#);
        let record = extractor.extract_item(&without_title, 1).unwrap();
        assert_eq!(record.image_link.as_deref(), Some("b.jpg"));
        assert_eq!(record.image_title, None);
        assert_eq!(record.text, "text");
    }

    #[test]
    fn test_image_fields_do_not_carry_over() {
        let extractor = ItemExtractor::new();
        let items = vec![
            raw_item("first", r#"<img src="first.png" title="First">one"#),
            raw_item("second", "<p>no picture here</p>"),
        ];

        let records = extractor.extract(&items, 2).unwrap();

        assert_eq!(records[0].image_link.as_deref(), Some("first.png"));
        assert!(records[1].image_link.is_none());
        assert!(records[1].image_title.is_none());
    }

    #[test]
    fn test_nested_markup_is_flattened() {
        let extractor = ItemExtractor::new();
        let item = raw_item(
            "nested",
            "<div><p>Scientists have achieved a <strong>new</strong> milestone.</p></div>",
        );

        let record = extractor.extract_item(&item, 0).unwrap();
        assert_eq!(record.text, "Scientists have achieved a new milestone.");
    }

    #[test]
    fn test_date_is_rfc2822() {
        let extractor = ItemExtractor::new();
        let record = extractor.extract_item(&raw_item("dated", "x"), 0).unwrap();
        assert_eq!(record.date, "Sat, 16 Mar 2024 10:00:00 +0000");
    }

    #[test]
    fn test_date_is_normalized_to_utc() {
        let extractor = ItemExtractor::new();
        let mut item = raw_item("offset", "x");
        item.published = Some(
            DateTime::parse_from_rfc3339("2024-03-15T09:00:00+03:00")
                .unwrap()
                .with_timezone(&Utc),
        );

        let record = extractor.extract_item(&item, 0).unwrap();
        assert_eq!(record.date, "Fri, 15 Mar 2024 06:00:00 +0000");
    }

    #[test]
    fn test_missing_description_gives_empty_text() {
        let extractor = ItemExtractor::new();
        let mut item = raw_item("bare", "");
        item.description = None;

        let record = extractor.extract_item(&item, 0).unwrap();
        assert_eq!(record.text, "");
        assert!(record.image_link.is_none());
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let extractor = ItemExtractor::new();

        let mut no_title = raw_item("t", "x");
        no_title.title = None;
        assert!(matches!(extractor.extract_item(&no_title, 0), Err(Error::MalformedItem(_))));

        let mut no_link = raw_item("t", "x");
        no_link.link = None;
        assert!(matches!(extractor.extract_item(&no_link, 0), Err(Error::MalformedItem(_))));

        let mut no_date = raw_item("t", "x");
        no_date.published = None;
        assert!(matches!(extractor.extract_item(&no_date, 0), Err(Error::MalformedItem(_))));
    }

    #[test]
    fn test_image_without_src_aborts_extraction() {
        let extractor = ItemExtractor::new();
        let items = vec![
            raw_item("good", "fine"),
            raw_item("bad", r#"<img title="no source">"#),
            raw_item("never reached", "fine"),
        ];

        match extractor.extract(&items, 3) {
            Err(Error::MalformedItem(msg)) => assert!(msg.contains("item 1")),
            other => panic!("Expected MalformedItem, got {:?}", other),
        }
    }

    #[test]
    fn test_limit_bounds_and_order() {
        let extractor = ItemExtractor::new();
        let items: Vec<RawItem> = (0..5)
            .map(|i| raw_item(&format!("Article {}", i), "body"))
            .collect();

        let records = extractor.extract(&items, 3).unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Article 0", "Article 1", "Article 2"]);
    }
}
