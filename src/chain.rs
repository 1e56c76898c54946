//! The acquisition chain.
//!
//! An ordered list of [`ApodSource`]s is tried left to right, one request at
//! a time.  The first source to return a record wins and nothing after it is
//! contacted.  A failing source is logged at debug level and skipped; the
//! last failure seen is kept as the cause if every source fails.
//!
//! The standard order built by [`Chain::from_config`] is:
//!
//! 1. managed proxy
//! 2. local proxy
//! 3. one key-based upstream call (client key, else meta tag key, else the
//!    demo key)
//!
//! Because the key-based call is always last, its failure is the cause an
//! exhausted chain reports.

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::AcquireError;
use crate::source::{self, ApodRecord, ApodSource, KeySource, ProxySource, SourceKind};

/// Terminal value of one run of the chain.
#[derive(Debug)]
pub enum Acquisition {
    /// `source` produced `record`; later sources were not tried.
    Success {
        record: ApodRecord,
        source: SourceKind,
    },
    /// Every source failed.  `cause` is the last failure, or `None` when the
    /// chain had no sources at all.
    Exhausted { cause: Option<AcquireError> },
}

/// Ordered, immutable list of sources.
pub struct Chain {
    sources: Vec<Box<dyn ApodSource>>,
}

impl Chain {
    pub fn new(sources: Vec<Box<dyn ApodSource>>) -> Self {
        Self { sources }
    }

    /// Build the standard three-step chain from resolved configuration.
    pub fn from_config(config: &ClientConfig) -> reqwest::Result<Self> {
        let client = source::http_client(config.timeout)?;

        let sources: Vec<Box<dyn ApodSource>> = vec![
            Box::new(ProxySource::new(
                SourceKind::ManagedProxy,
                config.managed_proxy.clone(),
                client.clone(),
            )),
            Box::new(ProxySource::new(
                SourceKind::LocalProxy,
                config.local_proxy.clone(),
                client.clone(),
            )),
            Box::new(KeySource::select(
                config.client_key.as_deref(),
                config.meta_key.as_deref(),
                config.upstream.clone(),
                client,
            )),
        ];

        Ok(Self::new(sources))
    }

    /// Tier labels in the order they will be tried.
    pub fn kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Run the chain once.
    ///
    /// Never fails and never panics on a source error: every outcome is an
    /// [`Acquisition`].
    pub async fn acquire(&self) -> Acquisition {
        let mut cause = None;

        for source in &self.sources {
            let kind = source.kind();
            match source.fetch().await {
                Ok(record) => {
                    info!(source = %kind, "APOD acquired");
                    return Acquisition::Success {
                        record,
                        source: kind,
                    };
                }
                Err(e) => {
                    debug!(source = %kind, error = %e, "source unavailable; trying next");
                    cause = Some(e);
                }
            }
        }

        Acquisition::Exhausted { cause }
    }
}
