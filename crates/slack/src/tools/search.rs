//! Workspace message search.

use crate::client::{SearchMatch, SlackClient};
use crate::tools::format_ts;
use anyhow::{Context, Result};
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use std::sync::Arc;

const MAX_SEARCH_COUNT: u32 = 100;

/// Search for messages across the workspace.
pub struct SearchMessagesTool {
    client: Arc<SlackClient>,
}

impl SearchMessagesTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchMessagesArgs {
    query: String,
    #[serde(default = "default_count")]
    count: u32,
}

fn default_count() -> u32 {
    20
}

#[async_trait::async_trait]
impl Tool for SearchMessagesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_messages".to_string(),
            description: "Search for messages in Slack workspace".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Search query string"),
                    "count": json_schema_integer("Number of results to return (max 100)")
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchMessagesArgs =
            serde_json::from_value(arguments).context("Invalid arguments for search_messages")?;

        let count = args.count.min(MAX_SEARCH_COUNT);
        match self.client.search_messages(&args.query, count).await {
            Ok(response) => Ok(CallToolResult::text(format_matches(
                &args.query,
                &response.messages.matches,
            ))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_matches(query: &str, matches: &[SearchMatch]) -> String {
    if matches.is_empty() {
        return format!("No messages found for query: '{}'", query);
    }

    let lines: Vec<String> = matches
        .iter()
        .map(|m| {
            let channel = m
                .channel
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or("Unknown");
            let user = m.user.as_deref().unwrap_or("Unknown");
            format!("[{}] #{} - {}: {}", format_ts(&m.ts), channel, user, m.text)
        })
        .collect();

    format!(
        "Search results for '{}' ({} matches):\n\n{}",
        query,
        matches.len(),
        lines.join("\n")
    )
}
