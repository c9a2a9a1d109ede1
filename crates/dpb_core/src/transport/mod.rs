//! HTTP client for the paste store with typed error classification.

mod classify;

pub use classify::classify;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::models::{AddRequest, AddResponse, QueryResponse};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Request methods the store contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Append percent-encoded path segments to `base`.
///
/// Each segment is pushed as one path component, so a key containing `/` or
/// `?` stays a single segment. An existing base path is preserved.
pub fn api_url(base: &str, segments: &[&str]) -> Result<reqwest::Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidUrl {
        url: base.to_string(),
        reason,
    };
    let mut url = reqwest::Url::parse(base).map_err(|err| invalid(err.to_string()))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| invalid("cannot be used as a base".to_string()))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Client for the paste store. Holds no state besides its configuration.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl TransportClient {
    /// Build a client for the store described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Send one request and classify the outcome.
    ///
    /// A present `body` is sent as JSON with `Content-Type: application/json`.
    /// The response body is parsed as JSON whatever the status.
    ///
    /// # Returns
    /// The parsed body for 2xx responses.
    ///
    /// # Errors
    /// [`TransportError::Classified`] for every non-2xx response (a body that
    /// is not JSON still classifies, as `Unknown`), [`TransportError::Network`]
    /// when no response arrives, and [`TransportError::Decode`] when a 2xx
    /// body is not JSON.
    pub async fn request<B>(
        &self,
        method: HttpMethod,
        url: reqwest::Url,
        body: Option<&B>,
    ) -> Result<Value, TransportError>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = ?method, url = %url, "sending store request");
        let mut builder = self.http.request(method.into(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice::<Value>(&bytes);

        if status.is_success() {
            return Ok(parsed?);
        }

        let body = parsed.unwrap_or(Value::Null);
        match classify(status.as_u16(), &body) {
            Some(classified) => {
                warn!(
                    status = status.as_u16(),
                    kind = classified.kind(),
                    reason = classified.reason(),
                    url = %url,
                    "store request failed: {}",
                    classified.message()
                );
                Err(classified.into())
            }
            None => Ok(body),
        }
    }

    /// `POST {base}/add`.
    pub async fn create_paste(&self, request: &AddRequest) -> Result<AddResponse, TransportError> {
        let url = api_url(&self.config.base_url, &["add"])?;
        let value = self.request(HttpMethod::Post, url, Some(request)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `GET {base}/query/{key}`.
    pub async fn query_paste(&self, key: &str) -> Result<QueryResponse, TransportError> {
        let url = api_url(&self.config.base_url, &["query", key])?;
        let value = self.request::<()>(HttpMethod::Get, url, None).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_encodes_path_segments() {
        let url = api_url("http://127.0.0.1:12345", &["query", "id/with?reserved#chars"])
            .expect("api_url should build");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:12345/query/id%2Fwith%3Freserved%23chars"
        );
    }

    #[test]
    fn api_url_appends_to_existing_base_path() {
        let url = api_url("http://127.0.0.1:12345/api/", &["add"]).expect("api_url should build");
        assert_eq!(url.as_str(), "http://127.0.0.1:12345/api/add");
    }

    #[test]
    fn api_url_rejects_unusable_bases() {
        for base in ["not a url", "mailto:someone@example.com"] {
            match api_url(base, &["add"]) {
                Err(TransportError::InvalidUrl { url, .. }) => assert_eq!(url, base),
                other => panic!("expected invalid url for {:?}, got {:?}", base, other),
            }
        }
    }

    #[test]
    fn http_methods_map_to_reqwest_methods() {
        let cases = [
            (HttpMethod::Get, reqwest::Method::GET),
            (HttpMethod::Post, reqwest::Method::POST),
            (HttpMethod::Put, reqwest::Method::PUT),
            (HttpMethod::Delete, reqwest::Method::DELETE),
        ];
        for (method, expected) in cases {
            assert_eq!(reqwest::Method::from(method), expected);
        }
    }
}
