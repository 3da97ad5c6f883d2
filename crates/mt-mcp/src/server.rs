//! MCP server dispatch
//!
//! Holds the registered tools and the optional resource provider, and routes
//! incoming JSON-RPC requests to them. Transports stay thin: they parse
//! lines and hand [`JsonRpcRequest`]s to [`McpServer::dispatch`].

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use mt_types::{AppError, AppResult};

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpResource, McpTool};

/// Protocol revision advertised during initialize
const PROTOCOL_VERSION: &str = "2024-11-05";

/// A named callable tool with a declared argument schema
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool definition advertised via tools/list
    fn definition(&self) -> McpTool;

    /// Invoke the tool with the caller-supplied arguments
    async fn call(&self, args: Value) -> AppResult<Value>;
}

/// Read-only, URI-addressed resource catalog
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn list(&self) -> AppResult<Vec<McpResource>>;

    async fn read(&self, uri: &str) -> AppResult<String>;
}

/// MCP server: tool registry plus optional resources
pub struct McpServer {
    name: String,
    version: String,

    /// Registration order is the tools/list order
    tools: Vec<Arc<dyn ToolHandler>>,

    resources: Option<Arc<dyn ResourceProvider>>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tools: Vec::new(),
            resources: None,
        }
    }

    pub fn register_tool(&mut self, tool: Arc<dyn ToolHandler>) {
        self.tools.push(tool);
    }

    pub fn set_resources(&mut self, provider: Arc<dyn ResourceProvider>) {
        self.resources = Some(provider);
    }

    /// Dispatch one request; returns None for notifications
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!("Notification received: {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            "resources/list" => self.handle_resources_list(id).await,
            "resources/read" => self.handle_resources_read(id, request.params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        let mut capabilities = json!({});
        if !self.tools.is_empty() {
            capabilities["tools"] = json!({});
        }
        if self.resources.is_some() {
            capabilities["resources"] = json!({});
        }

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": capabilities,
                "serverInfo": {
                    "name": self.name,
                    "version": self.version,
                },
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|t| serde_json::to_value(t.definition()).unwrap_or_default())
            .collect();

        JsonRpcResponse::success(id, json!({"tools": tools}))
    }

    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
            }
        };

        let tool_name = match params.get("name").and_then(|n| n.as_str()) {
            Some(name) => name.to_string(),
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing 'name' parameter"),
                );
            }
        };

        let tool = match self
            .tools
            .iter()
            .find(|t| t.definition().name == tool_name)
        {
            Some(tool) => tool.clone(),
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::tool_not_found(tool_name));
            }
        };

        let args = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        match tool.call(args).await {
            Ok(result) => {
                let text = match result {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                JsonRpcResponse::success(
                    id,
                    json!({"content": [{"type": "text", "text": text}]}),
                )
            }
            Err(e) => {
                tracing::warn!("Tool '{}' failed: {}", tool_name, e);
                JsonRpcResponse::error(id, error_for(&e))
            }
        }
    }

    async fn handle_resources_list(&self, id: Value) -> JsonRpcResponse {
        let provider = match &self.resources {
            Some(provider) => provider,
            None => return JsonRpcResponse::success(id, json!({"resources": []})),
        };

        match provider.list().await {
            Ok(resources) => JsonRpcResponse::success(id, json!({"resources": resources})),
            Err(e) => JsonRpcResponse::error(id, error_for(&e)),
        }
    }

    async fn handle_resources_read(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let uri = match params.as_ref().and_then(|p| p.get("uri")).and_then(|u| u.as_str()) {
            Some(uri) => uri.to_string(),
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing 'uri' parameter"),
                );
            }
        };

        let provider = match &self.resources {
            Some(provider) => provider,
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::resource_not_found(uri));
            }
        };

        match provider.read(&uri).await {
            Ok(contents) => JsonRpcResponse::success(
                id,
                json!({
                    "contents": [{
                        "uri": uri,
                        "mimeType": "text/plain",
                        "text": contents,
                    }]
                }),
            ),
            Err(e) => JsonRpcResponse::error(id, error_for(&e)),
        }
    }
}

/// Map an application error to the JSON-RPC error surfaced to the caller
fn error_for(err: &AppError) -> JsonRpcError {
    match err {
        AppError::Validation(msg) | AppError::InvalidParams(msg) => {
            JsonRpcError::invalid_params(msg.clone())
        }
        AppError::ResourceNotFound(msg) => {
            JsonRpcError::new(crate::protocol::RESOURCE_NOT_FOUND, msg.clone(), None)
        }
        AppError::BackendUnavailable(msg) => JsonRpcError::backend_unavailable(msg.clone()),
        other => JsonRpcError::internal_error(other.to_string()),
    }
}
