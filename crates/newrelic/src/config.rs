//! Configuration for the NewRelic adapter.

use crate::error::NewRelicResult;
use std::time::Duration;
use url::Url;

/// REST API key, presented as the `X-Api-Key` header.
pub const API_KEY_ENV: &str = "NEWRELIC_API_KEY";

/// Optional base URL override, used to point the client at a test server.
pub const API_URL_ENV: &str = "NEWRELIC_API_URL";

const DEFAULT_API_URL: &str = "https://api.newrelic.com/v2/";

/// Configuration for [`crate::NewRelicClient`].
#[derive(Debug, Clone)]
pub struct NewRelicConfig {
    /// Base URL of the NewRelic REST API.
    pub base_url: Url,
    /// API key. `None` means the server runs with limited functionality
    /// and every tool call fails before any network I/O.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl NewRelicConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> NewRelicResult<Self> {
        let base_url = match std::env::var(API_URL_ENV) {
            Ok(raw) => Url::parse(&raw)?,
            Err(_) => Url::parse(DEFAULT_API_URL)?,
        };

        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());

        Ok(Self {
            api_key,
            ..Self::new(base_url)
        })
    }
}
