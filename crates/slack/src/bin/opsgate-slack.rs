// Slack MCP server binary.

use anyhow::Result;
use opsgate_mcp::{McpServer, ToolRegistry};
use opsgate_slack::config::TOKEN_ENV;
use opsgate_slack::tools::{
    ChannelHistoryTool, ListChannelsTool, SearchMessagesTool, SendMessageTool, UserInfoTool,
};
use opsgate_slack::{SlackClient, SlackConfig};
use std::sync::Arc;

const INSTRUCTIONS: &str = "A Model Context Protocol server for Slack operations. \
    Provides tools to send messages, list channels, get message history, and \
    retrieve user information.";

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let client = Arc::new(SlackClient::new(SlackConfig::from_env()?)?);
    if !client.has_token() {
        tracing::warn!(
            "{} environment variable not set. Slack functionality will be limited.",
            TOKEN_ENV
        );
    }

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SendMessageTool::new(client.clone())));
    registry.register(Arc::new(ListChannelsTool::new(client.clone())));
    registry.register(Arc::new(ChannelHistoryTool::new(client.clone())));
    registry.register(Arc::new(UserInfoTool::new(client.clone())));
    registry.register(Arc::new(SearchMessagesTool::new(client)));

    tracing::info!("Registered {} tools", registry.len());

    McpServer::new("slack-mcp-server", env!("CARGO_PKG_VERSION"), registry)
        .with_instructions(INSTRUCTIONS)
        .run()
        .await
}
