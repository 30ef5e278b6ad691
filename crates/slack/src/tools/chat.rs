//! Message sending.

use crate::client::SlackClient;
use anyhow::{Context, Result};
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use std::sync::Arc;

/// Send a message to a channel, optionally as a thread reply.
pub struct SendMessageTool {
    client: Arc<SlackClient>,
}

impl SendMessageTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SendMessageArgs {
    channel: String,
    text: String,
    #[serde(default)]
    thread_ts: Option<String>,
}

#[async_trait::async_trait]
impl Tool for SendMessageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "send_message".to_string(),
            description: "Send a message to a Slack channel".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel": json_schema_string(
                        "Channel ID or name (e.g., \"#general\" or \"C1234567890\")"
                    ),
                    "text": json_schema_string("Message text to send"),
                    "thread_ts": json_schema_string(
                        "Optional timestamp of parent message to reply in thread"
                    )
                }),
                vec!["channel", "text"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SendMessageArgs =
            serde_json::from_value(arguments).context("Invalid arguments for send_message")?;

        match self
            .client
            .post_message(&args.channel, &args.text, args.thread_ts.as_deref())
            .await
        {
            Ok(response) => Ok(CallToolResult::text(format!(
                "Message sent successfully to {}. Timestamp: {}",
                args.channel,
                response.ts.unwrap_or_default()
            ))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlackConfig;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn tool(server: &MockServer) -> SendMessageTool {
        let config = SlackConfig::new(Url::parse(&server.uri()).unwrap()).with_token("xoxb-test");
        SendMessageTool::new(Arc::new(SlackClient::new(config).unwrap()))
    }

    #[tokio::test]
    async fn reports_timestamp_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_partial_json(
                serde_json::json!({ "thread_ts": "1699.0" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "ok": true, "ts": "1700000000.000100" }),
            ))
            .mount(&server)
            .await;

        let result = tool(&server)
            .await
            .execute(serde_json::json!({
                "channel": "#general",
                "text": "hello",
                "thread_ts": "1699.0"
            }))
            .await
            .unwrap();

        assert!(result.is_error.is_none());
        let opsgate_mcp::protocol::ToolContent::Text { text } = &result.content[0];
        assert_eq!(
            text,
            "Message sent successfully to #general. Timestamp: 1700000000.000100"
        );
    }

    #[tokio::test]
    async fn vendor_error_is_in_band() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "ok": false, "error": "not_in_channel" }),
            ))
            .mount(&server)
            .await;

        let result = tool(&server)
            .await
            .execute(serde_json::json!({ "channel": "#general", "text": "hello" }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let opsgate_mcp::protocol::ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "Error: Slack API error: not_in_channel");
    }

    #[tokio::test]
    async fn missing_required_argument_is_rejected() {
        let server = MockServer::start().await;
        let err = tool(&server)
            .await
            .execute(serde_json::json!({ "channel": "#general" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("send_message"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
