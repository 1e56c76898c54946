//! APOD source abstraction.
//!
//! This module defines the [`ApodSource`] trait, the [`SourceKind`] tier
//! labels and the shared [`ApodRecord`] type.  Concrete sources live in
//! sub-modules:
//!
//! * [`proxy`] — a server-side proxy that already holds a credential.
//! * [`key`] — a direct upstream call with a client-side API key.
//! * [`upstream`] — URL building and the status check both of them share.
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory and implement [`ApodSource`].
//! 2. Add a [`SourceKind`] variant for it.
//! 3. Insert it into the ordered list in [`crate::chain::Chain::from_config`].
//!    Position is behaviour: the first source to succeed wins.

pub mod key;
mod proxy;
mod record;
pub mod upstream;

pub use key::KeySource;
pub use proxy::ProxySource;
pub use record::{ApodRecord, MediaType};

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AcquireError;

/// Which tier of the acquisition chain produced (or failed to produce) a
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Managed serverless function endpoint.
    ManagedProxy,
    /// Operator-supplied local API endpoint.
    LocalProxy,
    /// Key from the client configuration (`--client-key`).
    ClientConfigKey,
    /// Key from the page's `nasa-api-key` meta tag.
    MetaTagKey,
    /// Built-in public demo key.
    DemoKey,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ManagedProxy => "managed proxy",
            Self::LocalProxy => "local proxy",
            Self::ClientConfigKey => "client config key",
            Self::MetaTagKey => "meta tag key",
            Self::DemoKey => "demo key",
        };
        f.write_str(label)
    }
}

/// Trait that every tier of the acquisition chain implements.
///
/// The chain awaits [`fetch()`](ApodSource::fetch) on a background task, so
/// implementations must be [`Send`] and [`Sync`].
#[async_trait]
pub trait ApodSource: Send + Sync {
    /// Tier label used in logs and in the status bar.
    fn kind(&self) -> SourceKind;

    /// Obtain today's record.
    ///
    /// Implementations perform their own HTTP work and never panic; every
    /// failure is an [`AcquireError`] for the chain to interpret.
    async fn fetch(&self) -> Result<ApodRecord, AcquireError>;
}

/// Build the HTTP client every source and the proxy share.
///
/// `timeout` bounds each request end to end; an expired request surfaces
/// as [`AcquireError::Transport`].
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("apod-lens/", env!("CARGO_PKG_VERSION")))
        .build()
}
