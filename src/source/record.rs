//! The APOD payload shared by every source.
//!
//! Proxies forward the upstream JSON verbatim and key-based sources call the
//! upstream directly, so all of them decode into the same [`ApodRecord`].
//! Every field is optional: the renderer substitutes defaults rather than
//! rejecting a sparse payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of media an APOD entry points at.
///
/// Anything other than `image` or `video` (including a missing field)
/// collapses to [`MediaType::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[default]
    #[serde(other)]
    Other,
}

/// One day's Astronomy Picture of the Day entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub title: Option<String>,

    pub explanation: Option<String>,

    /// Stored as an option so that an explicit `null` decodes like a
    /// missing field; read it through [`ApodRecord::media`].
    pub media_type: Option<MediaType>,

    /// Image source or video page.
    pub url: Option<String>,

    /// Publication day as sent by the API (`YYYY-MM-DD`).
    pub date: Option<String>,

    pub copyright: Option<String>,

    /// Full-resolution image, when the API provides one.
    pub hdurl: Option<String>,
}

impl ApodRecord {
    /// Decode a record from a raw JSON body.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    pub fn media(&self) -> MediaType {
        self.media_type.unwrap_or_default()
    }

    /// Publication day, or `None` when absent or unparseable.
    pub fn published(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }
}
