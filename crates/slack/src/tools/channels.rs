//! Channel listing and history.

use crate::client::{Channel, Message, SlackClient};
use crate::tools::format_ts;
use anyhow::{Context, Result};
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use std::sync::Arc;

const MAX_HISTORY_LIMIT: u32 = 1000;

/// List channels in the workspace.
pub struct ListChannelsTool {
    client: Arc<SlackClient>,
}

impl ListChannelsTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListChannelsArgs {
    #[serde(default = "default_types")]
    types: String,
}

fn default_types() -> String {
    "public_channel,private_channel".to_string()
}

#[async_trait::async_trait]
impl Tool for ListChannelsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_channels".to_string(),
            description: "List Slack channels".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "types": json_schema_string(
                        "Comma-separated list of channel types to include \
                         (public_channel, private_channel, mpim, im). \
                         Default: public_channel,private_channel"
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListChannelsArgs =
            serde_json::from_value(arguments).context("Invalid arguments for list_channels")?;

        match self.client.list_channels(&args.types).await {
            Ok(response) => Ok(CallToolResult::text(format_channels(&response.channels))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_channels(channels: &[Channel]) -> String {
    let lines: Vec<String> = channels
        .iter()
        .map(|ch| {
            format!(
                "- #{} ({}) - {}",
                ch.name,
                ch.id,
                if ch.is_private { "Private" } else { "Public" }
            )
        })
        .collect();
    format!("Found {} channels:\n{}", channels.len(), lines.join("\n"))
}

/// Fetch message history from a channel.
pub struct ChannelHistoryTool {
    client: Arc<SlackClient>,
}

impl ChannelHistoryTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ChannelHistoryArgs {
    channel: String,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    oldest: Option<String>,
}

fn default_limit() -> u32 {
    10
}

#[async_trait::async_trait]
impl Tool for ChannelHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_channel_history".to_string(),
            description: "Get message history from a Slack channel".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel": json_schema_string("Channel ID or name"),
                    "limit": json_schema_integer("Number of messages to retrieve (max 1000)"),
                    "oldest": json_schema_string(
                        "Only messages after this timestamp (Unix timestamp)"
                    )
                }),
                vec!["channel"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ChannelHistoryArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_channel_history")?;

        let limit = args.limit.min(MAX_HISTORY_LIMIT);
        match self
            .client
            .channel_history(&args.channel, limit, args.oldest.as_deref())
            .await
        {
            Ok(response) => Ok(CallToolResult::text(format_history(
                &args.channel,
                &response.messages,
            ))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

/// Render history oldest-first. The API returns messages newest-first.
fn format_history(channel: &str, messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("No messages found in {}", channel);
    }

    let lines: Vec<String> = messages.iter().rev().map(format_message).collect();
    format!(
        "Message history for {} ({} messages):\n\n{}",
        channel,
        messages.len(),
        lines.join("\n")
    )
}

fn format_message(message: &Message) -> String {
    let mut user = message.user.clone().unwrap_or_else(|| "Unknown".to_string());
    let mut text = message.text.clone();

    match message.subtype.as_deref() {
        Some("bot_message") => {
            user = message.bot_id.clone().unwrap_or_else(|| "Bot".to_string());
        }
        Some("file_share") => {
            let name = message
                .files
                .first()
                .and_then(|f| f.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            text = format!("[File shared: {}]", name);
        }
        _ => {}
    }

    format!("[{}] {}: {}", format_ts(&message.ts), user, text)
}
