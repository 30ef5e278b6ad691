//! Error types for the NewRelic adapter.

/// Result type for NewRelic operations.
pub type NewRelicResult<T> = Result<T, NewRelicError>;

/// Failures surfaced by [`crate::NewRelicClient`].
#[derive(Debug, thiserror::Error)]
pub enum NewRelicError {
    /// No API key configured; rejected before any network call.
    #[error("NewRelic API key not configured. Please set NEWRELIC_API_KEY environment variable.")]
    MissingKey,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("NewRelic API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status; `title` comes from the error body when present.
    #[error("NewRelic API error (status {status}): {title}")]
    Status { status: u16, title: String },

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
    fn status_error_includes_title() {
        let err = NewRelicError::Status {
            status: 401,
            title: "The API key provided is invalid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "NewRelic API error (status 401): The API key provided is invalid"
        );
    }

    #[test]
    fn missing_key_names_the_env_var() {
        assert!(NewRelicError::MissingKey
            .to_string()
            .contains("NEWRELIC_API_KEY"));
    }
}
