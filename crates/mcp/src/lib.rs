// Shared MCP plumbing for the opsgate adapter servers.
// JSON-RPC 2.0 over stdio, a tool registry, and the serve loop.

pub mod protocol;
pub mod registry;
pub mod server;

pub use registry::{Tool, ToolRegistry};
pub use server::McpServer;
