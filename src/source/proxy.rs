//! Proxy-backed source.
//!
//! A proxy holds the credential server-side and forwards the upstream JSON
//! untouched, so this source only issues a bare GET and decodes the body.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{upstream, ApodRecord, ApodSource, SourceKind};
use crate::error::AcquireError;

/// One deployment of the proxy contract.
pub struct ProxySource {
    kind: SourceKind,
    endpoint: Url,
    client: Client,
}

impl ProxySource {
    /// Create a proxy source.
    ///
    /// `kind` is normally [`SourceKind::ManagedProxy`] or
    /// [`SourceKind::LocalProxy`]; both use the same contract.
    pub fn new(kind: SourceKind, endpoint: Url, client: Client) -> Self {
        Self {
            kind,
            endpoint,
            client,
        }
    }
}

#[async_trait]
impl ApodSource for ProxySource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self) -> Result<ApodRecord, AcquireError> {
        let body = upstream::get_ok_body(&self.client, self.endpoint.clone()).await?;
        Ok(ApodRecord::from_slice(&body)?)
    }
}
