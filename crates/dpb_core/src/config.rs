//! Client configuration loaded from environment variables and CLI overrides.

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_SHARE_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::TransportError;
use crate::transport::api_url;
use std::env;
use std::time::Duration;

/// Environment variable naming the paste store base URL.
pub const SERVER_ENV: &str = "DPB_SERVER";
/// Environment variable naming the base URL used for share links.
pub const SHARE_URL_ENV: &str = "DPB_SHARE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DPB_TIMEOUT";

/// Connection settings handed to [`crate::transport::TransportClient`] at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Store API base, e.g. `http://127.0.0.1:12345`. Never ends with `/`.
    pub base_url: String,
    /// Public site base that share links and the creation page hang off.
    pub share_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            share_url: DEFAULT_SHARE_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Trim whitespace and trailing slashes from a base URL.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Treat a blank override as if it were not given.
pub fn explicit_override(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl ClientConfig {
    /// Load configuration from `DPB_SERVER`, `DPB_SHARE_URL` and `DPB_TIMEOUT`.
    ///
    /// # Returns
    /// A populated [`ClientConfig`], using defaults for missing or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: explicit_override(env::var(SERVER_ENV).ok())
                .map(|value| normalize_base_url(&value))
                .unwrap_or(defaults.base_url),
            share_url: explicit_override(env::var(SHARE_URL_ENV).ok())
                .map(|value| normalize_base_url(&value))
                .unwrap_or(defaults.share_url),
            timeout: env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Apply explicit overrides on top of this configuration.
    ///
    /// Blank strings are ignored so an empty flag never wipes a configured URL.
    pub fn with_overrides(
        mut self,
        server: Option<String>,
        share_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(server) = explicit_override(server) {
            self.base_url = normalize_base_url(&server);
        }
        if let Some(share_url) = explicit_override(share_url) {
            self.share_url = normalize_base_url(&share_url);
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Public link for a published paste key.
    pub fn share_link(&self, key: &str) -> Result<String, TransportError> {
        api_url(&self.share_url, &[key]).map(String::from)
    }

    /// Public location of the paste creation page.
    pub fn create_page(&self) -> Result<String, TransportError> {
        api_url(&self.share_url, &[""]).map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ConfigEnv;

    #[test]
    fn normalize_base_url_matrix() {
        let cases = [
            ("http://127.0.0.1:12345", "http://127.0.0.1:12345"),
            ("http://127.0.0.1:12345/", "http://127.0.0.1:12345"),
            ("  https://paste.example/api//  ", "https://paste.example/api"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_base_url(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn from_env_uses_defaults_when_unset() {
        let _env = ConfigEnv::cleared();
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn from_env_reads_and_normalizes_values() {
        let _env = ConfigEnv::cleared()
            .with(SERVER_ENV, "http://store.local:9000/")
            .with(SHARE_URL_ENV, "https://dpb.example/")
            .with(TIMEOUT_ENV, "5");
        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://store.local:9000");
        assert_eq!(config.share_url, "https://dpb.example");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn from_env_ignores_blank_and_garbage_values() {
        let _env = ConfigEnv::cleared()
            .with(SERVER_ENV, "   ")
            .with(TIMEOUT_ENV, "soon");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn overrides_beat_loaded_values_but_blank_is_absent() {
        let config = ClientConfig::default().with_overrides(
            Some("http://10.0.0.2:8080/".to_string()),
            Some("  ".to_string()),
            Some(3),
        );
        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.share_url, DEFAULT_SHARE_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn share_link_encodes_key_as_single_segment() {
        let config = ClientConfig {
            share_url: "https://dpb.example/p".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.share_link("ab/c?d").expect("share link"),
            "https://dpb.example/p/ab%2Fc%3Fd"
        );
        assert_eq!(
            config.create_page().expect("create page"),
            "https://dpb.example/p/"
        );
    }
}
