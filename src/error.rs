//! Failure taxonomy shared by the acquisition chain and the proxy.
//!
//! Every source in the chain reports its failure as an [`AcquireError`].
//! The chain decides whether a failure is recovered (proxy tiers) or
//! reported (the key tier); the proxy maps the same errors onto HTTP
//! statuses.

use serde::{Deserialize, Serialize};

/// Why a single attempt to obtain an APOD payload failed.
#[derive(thiserror::Error, Debug)]
pub enum AcquireError {
    /// Connection, DNS, TLS or timeout failure below the HTTP layer.
    ///
    /// The request URL is stripped on conversion: keyed upstream URLs carry
    /// the API key in the query string.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("APOD fetch failed: {status}")]
    UpstreamRejected { status: u16, details: Option<String> },

    /// A 2xx body that is not the expected JSON shape.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// No credential is available for the upstream call.
    #[error("NASA_API_KEY not configured")]
    CredentialMissing,
}

impl AcquireError {
    /// Build an [`AcquireError::UpstreamRejected`] from a status and the
    /// raw response body.
    ///
    /// Proxy error bodies (`{"error": …, "details": …}`) are unpacked so the
    /// log line carries the useful part; anything else is kept as-is.
    pub fn rejected(status: u16, body: &str) -> Self {
        let details = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Some(parsed.details.unwrap_or(parsed.error)),
            Err(_) => Some(body.trim().to_string()).filter(|s| !s.is_empty()),
        };
        Self::UpstreamRejected { status, details }
    }
}

impl From<reqwest::Error> for AcquireError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// JSON error body returned by a proxy endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_unpacks_proxy_details() {
        let body = r#"{"error":"NASA fetch failed","details":"rate limited"}"#;
        match AcquireError::rejected(502, body) {
            AcquireError::UpstreamRejected { status, details } => {
                assert_eq!(status, 502);
                assert_eq!(details.as_deref(), Some("rate limited"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejected_falls_back_to_error_field() {
        let body = r#"{"error":"NASA_API_KEY not configured"}"#;
        let err = AcquireError::rejected(500, body);
        assert!(matches!(
            err,
            AcquireError::UpstreamRejected {
                status: 500,
                details: Some(ref d)
            } if d == "NASA_API_KEY not configured"
        ));
    }

    #[test]
    fn rejected_keeps_plain_text_and_drops_empty() {
        let err = AcquireError::rejected(404, "  Not Found \n");
        assert!(matches!(
            err,
            AcquireError::UpstreamRejected { details: Some(ref d), .. } if d == "Not Found"
        ));

        let err = AcquireError::rejected(404, "");
        assert!(matches!(err, AcquireError::UpstreamRejected { details: None, .. }));
    }

    #[test]
    fn display_includes_status() {
        let err = AcquireError::rejected(403, "");
        assert_eq!(err.to_string(), "APOD fetch failed: 403");
    }

    #[test]
    fn error_body_omits_missing_details() {
        let json = serde_json::to_string(&ErrorBody::new("APOD proxy error")).unwrap();
        assert_eq!(json, r#"{"error":"APOD proxy error"}"#);
    }
}
