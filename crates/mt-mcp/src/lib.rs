//! MCP server runtime for MCP Tracker
//!
//! JSON-RPC 2.0 protocol types, a tool/resource dispatch server, and the
//! STDIO serving loop. The runtime is generic: domain crates register
//! [`server::ToolHandler`]s and an optional [`server::ResourceProvider`],
//! and the framework owns all wire encoding.

pub mod protocol;
pub mod server;
pub mod stdio;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpResource, McpTool};
pub use server::{McpServer, ResourceProvider, ToolHandler};
pub use stdio::StdioServer;
