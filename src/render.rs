//! HTML rendering of an APOD record.
//!
//! [`render`] is pure: no network, no storage.  Every value taken from the
//! record goes through [`escape_html`] before it is interpolated.

use crate::source::{ApodRecord, MediaType};

/// Heading used when the record has no title.
pub const TITLE_PLACEHOLDER: &str = "NASA APOD";

/// Maximum number of explanation characters kept.
pub const EXPLANATION_LIMIT: usize = 200;

/// Appended after the (possibly truncated) explanation.
pub const ELLIPSIS: &str = "...";

/// Text of the placeholder shown when nothing could be loaded.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to load NASA APOD.";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First `limit` characters of `s`, cut on a char boundary.
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Render a record as an HTML fragment.
///
/// Images become `<img>`, videos an external link, anything else neither.
/// A media record without a URL renders no media element.
pub fn render(record: &ApodRecord) -> String {
    let title = escape_html(record.title.as_deref().unwrap_or(TITLE_PLACEHOLDER));
    let mut html = format!("<h4>{title}</h4>");

    if let Some(url) = record.url.as_deref() {
        let url = escape_html(url);
        match record.media() {
            MediaType::Image => {
                html.push_str(&format!(r#"<img src="{url}" alt="{title}">"#));
            }
            MediaType::Video => {
                html.push_str(&format!(
                    r#"<a href="{url}" target="_blank" rel="noopener">View video</a>"#
                ));
            }
            MediaType::Other => {}
        }
    }

    if let Some(explanation) = record.explanation.as_deref() {
        let excerpt = escape_html(truncate_chars(explanation, EXPLANATION_LIMIT));
        html.push_str(&format!(r#"<p class="muted">{excerpt}{ELLIPSIS}</p>"#));
    }

    html
}

/// Muted, non-interactive placeholder for an exhausted chain.
pub fn placeholder() -> String {
    format!(r#"<p class="muted">{UNAVAILABLE_MESSAGE}</p>"#)
}
