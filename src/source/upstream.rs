//! The third-party APOD endpoint and the request policy shared by every
//! HTTP source.

use reqwest::Client;
use url::Url;

use crate::error::AcquireError;

/// NASA's APOD endpoint.
pub const UPSTREAM_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// Append `key` to `endpoint` as the URL-escaped `api_key` query parameter.
///
/// The result contains the credential, so it must never be logged.
pub fn keyed_url(endpoint: &Url, key: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("api_key", key);
    url
}

/// Issue a GET and return the body of a 2xx response.
///
/// A non-2xx status becomes [`AcquireError::UpstreamRejected`] carrying the
/// status and whatever details the body offered.
pub async fn get_ok_body(client: &Client, url: Url) -> Result<Vec<u8>, AcquireError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AcquireError::rejected(status.as_u16(), &body));
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_url_escapes_the_key() {
        let endpoint = Url::parse(UPSTREAM_ENDPOINT).unwrap();
        let url = keyed_url(&endpoint, "a b&c=d");

        assert_eq!(url.path(), "/planetary/apod");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("api_key".to_string(), "a b&c=d".to_string())]);
        assert!(!url.as_str().contains("b&c"), "ampersand must be escaped");
    }

    #[test]
    fn keyed_url_keeps_existing_query() {
        let endpoint = Url::parse("http://localhost/apod?thumbs=true").unwrap();
        let url = keyed_url(&endpoint, "k");
        assert_eq!(url.query(), Some("thumbs=true&api_key=k"));
    }
}
