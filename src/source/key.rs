//! Key-based source: a direct upstream call with a client-side API key.
//!
//! The three key tiers (client config, meta tag, demo key) form one combined
//! attempt.  The key is chosen once by priority and a single request is made
//! with it; if that request fails, no lower-priority key is tried, so at most
//! one credential leaves the client per run.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{upstream, ApodRecord, ApodSource, SourceKind};
use crate::config::non_empty;
use crate::error::AcquireError;

/// NASA's public, rate-limited demo credential.
///
/// It ships inside the binary, so anyone can read it. It stays because the
/// chain must always have a final source.
pub const DEMO_KEY: &str = "DEMO_KEY";

/// Pick the key for the combined attempt: client config, then meta tag,
/// then [`DEMO_KEY`].  Empty or whitespace-only values count as absent.
pub fn select_key(client_key: Option<&str>, meta_key: Option<&str>) -> (SourceKind, String) {
    if let Some(key) = non_empty(client_key) {
        (SourceKind::ClientConfigKey, key)
    } else if let Some(key) = non_empty(meta_key) {
        (SourceKind::MetaTagKey, key)
    } else {
        (SourceKind::DemoKey, DEMO_KEY.to_string())
    }
}

/// The combined key-based tier.
pub struct KeySource {
    kind: SourceKind,
    key: String,
    endpoint: Url,
    client: Client,
}

impl KeySource {
    /// Select a key with [`select_key`] and bind it to `endpoint`.
    pub fn select(
        client_key: Option<&str>,
        meta_key: Option<&str>,
        endpoint: Url,
        client: Client,
    ) -> Self {
        let (kind, key) = select_key(client_key, meta_key);
        Self {
            kind,
            key,
            endpoint,
            client,
        }
    }
}

#[async_trait]
impl ApodSource for KeySource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self) -> Result<ApodRecord, AcquireError> {
        let url = upstream::keyed_url(&self.endpoint, &self.key);
        let body = upstream::get_ok_body(&self.client, url).await?;
        Ok(ApodRecord::from_slice(&body)?)
    }
}
