// Stdio serve loop: newline-delimited JSON-RPC in on stdin, out on stdout.
// Logging must go to stderr; stdout belongs to the protocol.

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::registry::ToolRegistry;
use anyhow::Result;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{FramedRead, LinesCodec};

/// An MCP server with a static tool catalog, served over stdio.
pub struct McpServer {
    name: String,
    version: String,
    instructions: Option<String>,
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            instructions: None,
            registry,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Serve requests until stdin is closed.
    pub async fn run(&self) -> Result<()> {
        let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
        let mut stdout = tokio::io::stdout();

        tracing::info!(
            server = %self.name,
            tools = self.registry.len(),
            "serving MCP over stdio"
        );

        while let Some(line) = lines.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let payload = serde_json::to_string(&response)?;
            stdout.write_all(payload.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.dispatch(request).await,
            Err(err) => {
                tracing::warn!(%err, "failed to parse request");
                Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ))
            }
        }
    }

    /// Route a single request. Notifications produce no response.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "notification");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, &request),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.handle_tools_call(id, &request).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: serde_json::Value, request: &JsonRpcRequest) -> JsonRpcResponse {
        if let Ok(params) = request.parse_params::<InitializeParams>() {
            if let Some(client) = params.client_info {
                tracing::info!(
                    client = %client.name,
                    client_version = %client.version,
                    requested = %params.protocol_version,
                    "initialize"
                );
            }
        }

        JsonRpcResponse::success(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: ToolsCapability { list_changed: false },
                },
                server_info: ServerInfo {
                    name: self.name.clone(),
                    version: self.version.clone(),
                },
                instructions: self.instructions.clone(),
            },
        )
    }

    async fn handle_tools_call(
        &self,
        id: serde_json::Value,
        request: &JsonRpcRequest,
    ) -> JsonRpcResponse {
        let params: CallToolParams = match request.parse_params() {
            Ok(params) => params,
            Err(err) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", err)),
                );
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        // Clients may omit arguments entirely for no-parameter tools.
        let arguments = if params.arguments.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            params.arguments
        };

        tracing::debug!(tool = %params.name, "tools/call");

        match tool.execute(arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                tracing::warn!(tool = %params.name, %err, "tool failed");
                JsonRpcResponse::success(id, CallToolResult::error(err.to_string()))
            }
        }
    }
}
