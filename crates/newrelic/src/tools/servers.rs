//! Server listing.

use crate::client::NewRelicClient;
use crate::model::Server;
use crate::tools::{or_na, reporting_mark};
use anyhow::Result;
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_object, Tool};
use std::fmt::Write as _;
use std::sync::Arc;

/// List servers reporting to NewRelic.
pub struct ListServersTool {
    client: Arc<NewRelicClient>,
}

impl ListServersTool {
    pub fn new(client: Arc<NewRelicClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListServersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_servers".to_string(),
            description: "List NewRelic servers".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.client.list_servers().await {
            Ok(response) => Ok(CallToolResult::text(format_servers(&response.servers))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_servers(servers: &[Server]) -> String {
    if servers.is_empty() {
        return "No servers found.".to_string();
    }

    let mut out = format!("Found {} servers:\n\n", servers.len());
    for server in servers {
        let _ = writeln!(
            out,
            "• **{}** (ID: {})",
            server.name.as_deref().unwrap_or("Unknown"),
            server.id
        );
        let _ = writeln!(
            out,
            "  - Health: {}",
            server.health_status.as_deref().unwrap_or("unknown")
        );
        let _ = writeln!(out, "  - Reporting: {}", reporting_mark(server.reporting));
        let _ = writeln!(out, "  - Host: {}", or_na(&server.host));

        if let Some(summary) = &server.summary {
            let _ = writeln!(out, "  - CPU: {}%", or_na(&summary.cpu));
            let _ = writeln!(out, "  - Memory: {}%", or_na(&summary.memory));
            let _ = writeln!(out, "  - Disk I/O: {}%", or_na(&summary.disk_io));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServerSummary;

    #[test]
    fn format_servers_empty() {
        assert_eq!(format_servers(&[]), "No servers found.");
    }

    #[test]
    fn format_servers_lists_host_and_summary() {
        let servers = vec![Server {
            id: 3,
            name: Some("web-1".to_string()),
            health_status: Some("green".to_string()),
            reporting: true,
            host: Some("web-1.internal".to_string()),
            summary: Some(ServerSummary {
                cpu: Some(42.0),
                memory: Some(63.5),
                disk_io: None,
            }),
        }];

        let text = format_servers(&servers);
        assert!(text.starts_with("Found 1 servers:"));
        assert!(text.contains("• **web-1** (ID: 3)"));
        assert!(text.contains("  - Host: web-1.internal"));
        assert!(text.contains("  - CPU: 42%"));
        assert!(text.contains("  - Disk I/O: N/A%"));
    }
}
