//! The APOD proxy service.
//!
//! Holds the server-side API key and forwards one upstream request per
//! call, so the key never reaches a client.  Both proxy paths the client
//! chain knows about are served by the same handler.
//!
//! | outcome                         | status | body                                   |
//! |---------------------------------|--------|----------------------------------------|
//! | upstream 2xx with JSON          | 200    | upstream body, verbatim                |
//! | no key configured               | 500    | `{"error":"NASA_API_KEY not configured"}` |
//! | upstream non-2xx                | 502    | `{"error":"NASA fetch failed","details":…}` |
//! | transport failure / bad JSON    | 502    | `{"error":"APOD proxy error"}`         |
//!
//! The proxy never retries.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::config::{non_empty, ProxyArgs, LOCAL_PROXY_PATH, MANAGED_PROXY_PATH};
use crate::error::{AcquireError, ErrorBody};
use crate::source::{self, upstream};

/// Shared state of the proxy handler.
pub struct ProxyState {
    client: Client,
    upstream: Url,
    api_key: Option<String>,
}

impl ProxyState {
    pub fn new(client: Client, upstream: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            upstream,
            api_key,
        }
    }

    pub fn from_args(args: &ProxyArgs) -> Result<Self> {
        let client = source::http_client(std::time::Duration::from_secs(args.timeout_secs))
            .context("failed to build HTTP client")?;
        Ok(Self::new(
            client,
            args.upstream.clone(),
            non_empty(args.api_key.as_deref()),
        ))
    }

    /// Fetch today's payload from upstream.
    ///
    /// Fails fast with [`AcquireError::CredentialMissing`] when no key is
    /// configured; upstream is not contacted in that case.
    pub async fn forward(&self) -> Result<Vec<u8>, AcquireError> {
        let key = self.api_key.as_deref().ok_or(AcquireError::CredentialMissing)?;
        let url = upstream::keyed_url(&self.upstream, key);
        let body = upstream::get_ok_body(&self.client, url).await?;
        serde_json::from_slice::<serde_json::Value>(&body)?;
        Ok(body)
    }
}

/// Status and JSON body the proxy answers with for a failed forward.
pub fn error_response(err: AcquireError) -> (StatusCode, ErrorBody) {
    match err {
        AcquireError::CredentialMissing => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("NASA_API_KEY not configured"),
        ),
        AcquireError::UpstreamRejected { details, .. } => (
            StatusCode::BAD_GATEWAY,
            ErrorBody::new("NASA fetch failed").with_details(details),
        ),
        AcquireError::Transport(_) | AcquireError::MalformedResponse(_) => {
            (StatusCode::BAD_GATEWAY, ErrorBody::new("APOD proxy error"))
        }
    }
}

async fn apod(State(state): State<Arc<ProxyState>>) -> Response {
    match state.forward().await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "apod proxy error");
            let (status, body) = error_response(e);
            (status, Json(body)).into_response()
        }
    }
}

/// Build the router serving both proxy paths.
pub fn router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route(MANAGED_PROXY_PATH, get(apod))
        .route(LOCAL_PROXY_PATH, get(apod))
        .with_state(state)
}

/// Serve the proxy until the process is stopped.
pub async fn serve(addr: SocketAddr, state: ProxyState) -> Result<()> {
    if state.api_key.is_none() {
        info!("NASA_API_KEY not set; every request will answer 500");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("APOD proxy listening on http://{addr}");

    axum::serve(listener, router(Arc::new(state))).await?;
    Ok(())
}
