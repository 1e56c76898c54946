//! Reads the client-side credential a host page may carry in
//! `<meta name="nasa-api-key" content="…">`.

use std::path::Path;

use scraper::{Html, Selector};
use tracing::warn;

/// Name of the meta tag that carries the API key.
pub const META_KEY_NAME: &str = "nasa-api-key";

/// Extract the meta-tag key from an HTML document.
///
/// Returns `None` when the tag is missing or its `content` is empty.
pub fn meta_api_key(html: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{META_KEY_NAME}"]"#)).ok()?;
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(String::from)
}

/// Read `path` and extract its meta-tag key.
///
/// An unreadable page is an absent source, not an error: it is logged and
/// the chain moves on to the next key.
pub fn meta_api_key_from_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(html) => meta_api_key(&html),
        Err(e) => {
            warn!(page = %path.display(), error = %e, "page unreadable; skipping meta tag key");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_meta_key_in_head() {
        let html = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="nasa-api-key" content="from-meta">
  </head>
  <body><div id="apod-area"></div></body>
</html>"#;
        assert_eq!(meta_api_key(html).as_deref(), Some("from-meta"));
    }

    #[test]
    fn ignores_empty_content() {
        let html = r#"<html><head><meta name="nasa-api-key" content=""></head></html>"#;
        assert!(meta_api_key(html).is_none());
    }

    #[test]
    fn ignores_other_meta_tags() {
        let html = r#"<html><head><meta name="description" content="stars"></head></html>"#;
        assert!(meta_api_key(html).is_none());
    }

    #[test]
    fn missing_file_is_absent() {
        let path = std::env::temp_dir().join("apod-lens-no-such-page.html");
        assert!(meta_api_key_from_file(&path).is_none());
    }
}
