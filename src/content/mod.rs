pub mod extractor;

pub use extractor::ItemExtractor;

/// Decode HTML character references (`&amp;`, `&#39;`, `&eacute;`...) into text.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_and_numeric() {
        assert_eq!(decode_entities("A &amp; B"), "A & B");
        assert_eq!(decode_entities("&quot;quoted&quot; &#39;x&#39;"), "\"quoted\" 'x'");
        assert_eq!(decode_entities("caf&eacute;"), "café");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode_entities("Nothing to see"), "Nothing to see");
    }
}
