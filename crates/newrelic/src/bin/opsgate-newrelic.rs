// NewRelic MCP server binary.

use anyhow::Result;
use opsgate_mcp::{McpServer, ToolRegistry};
use opsgate_newrelic::config::API_KEY_ENV;
use opsgate_newrelic::tools::{
    AlertPoliciesTool, ApplicationMetricsTool, GetApplicationTool, ListApplicationsTool,
    ListServersTool,
};
use opsgate_newrelic::{NewRelicClient, NewRelicConfig};
use std::sync::Arc;

const INSTRUCTIONS: &str = "A Model Context Protocol server for NewRelic operations. \
    Provides tools to retrieve application data, metrics, server information, and \
    alert policies.";

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

    let client = Arc::new(NewRelicClient::new(NewRelicConfig::from_env()?)?);
    if !client.has_api_key() {
        tracing::warn!(
            "{} environment variable not set. NewRelic functionality will be limited.",
            API_KEY_ENV
        );
    }

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ListApplicationsTool::new(client.clone())));
    registry.register(Arc::new(GetApplicationTool::new(client.clone())));
    registry.register(Arc::new(ApplicationMetricsTool::new(client.clone())));
    registry.register(Arc::new(ListServersTool::new(client.clone())));
    registry.register(Arc::new(AlertPoliciesTool::new(client)));

    tracing::info!("Registered {} tools", registry.len());

    McpServer::new("newrelic-mcp-server", env!("CARGO_PKG_VERSION"), registry)
        .with_instructions(INSTRUCTIONS)
        .run()
        .await
}
