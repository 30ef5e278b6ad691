//! Configuration for the Slack adapter.

use crate::error::SlackResult;
use std::time::Duration;
use url::Url;

/// Bot User OAuth token (`xoxb-...`).
pub const TOKEN_ENV: &str = "SLACK_BOT_TOKEN";

/// Optional base URL override, used to point the client at a test server.
pub const API_URL_ENV: &str = "SLACK_API_URL";

const DEFAULT_API_URL: &str = "https://slack.com/api/";

/// Configuration for [`crate::SlackClient`].
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Base URL of the Slack Web API.
    pub base_url: Url,
    /// Bot token. `None` means the server runs with limited functionality
    /// and every tool call fails before any network I/O.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl SlackConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> SlackResult<Self> {
        let base_url = match std::env::var(API_URL_ENV) {
            Ok(raw) => Url::parse(&raw)?,
            Err(_) => Url::parse(DEFAULT_API_URL)?,
        };

        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());

        Ok(Self {
            token,
            ..Self::new(base_url)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SlackConfig::new(Url::parse(DEFAULT_API_URL).unwrap());
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_url.as_str(), "https://slack.com/api/");
    }

    #[test]
    fn with_token() {
        let config =
            SlackConfig::new(Url::parse(DEFAULT_API_URL).unwrap()).with_token("xoxb-test");
        assert_eq!(config.token.as_deref(), Some("xoxb-test"));
    }
}
