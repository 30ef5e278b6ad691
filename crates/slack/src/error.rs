//! Error types for the Slack adapter.

/// Result type for Slack operations.
pub type SlackResult<T> = Result<T, SlackError>;

/// Failures surfaced by [`crate::SlackClient`].
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// No token configured; rejected before any network call.
    #[error("Slack client not initialized. Please set SLACK_BOT_TOKEN environment variable.")]
    MissingToken,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Web API answered `ok: false`; `code` is Slack's error string.
    #[error("Slack API error: {code}")]
    Api { method: String, code: String },

    /// Non-2xx status before any envelope could be read.
    #[error("Slack API returned status {status} for {method}")]
    Status { method: String, status: u16 },

    /// Response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_vendor_code() {
        let err = SlackError::Api {
            method: "chat.postMessage".to_string(),
            code: "channel_not_found".to_string(),
        };
        assert_eq!(err.to_string(), "Slack API error: channel_not_found");
    }

    #[test]
    fn missing_token_names_the_env_var() {
        assert!(SlackError::MissingToken.to_string().contains("SLACK_BOT_TOKEN"));
    }
}
