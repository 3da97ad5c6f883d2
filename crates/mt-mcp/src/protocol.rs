//! JSON-RPC 2.0 protocol types for MCP
//!
//! Implements the JSON-RPC 2.0 specification for Model Context Protocol
//! communication. Reference: https://www.jsonrpc.org/specification

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Custom deserializer for the result field that preserves null distinction
///
/// JSON-RPC 2.0 allows null as a valid result value. This deserializer ensures
/// that `"result": null` is deserialized as `Some(Value::Null)` rather than `None`,
/// allowing us to distinguish between a missing result field and an explicit null result.
fn deserialize_result<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Value::deserialize(deserializer)?))
}

/// JSON-RPC 2.0 request
///
/// A request without an id is a notification; the server sends no response
/// for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (can be string, number, or null)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Method name to invoke
    pub method: String,

    /// Method parameters (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matches the request)
    pub id: Value,

    /// Result data (present on success)
    #[serde(default, deserialize_with = "deserialize_result")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error data (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code (integer)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// Standard JSON-RPC 2.0 error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// Application-specific error codes
pub const TOOL_NOT_FOUND: i32 = -32001;
pub const RESOURCE_NOT_FOUND: i32 = -32002;
pub const BACKEND_UNAVAILABLE: i32 = -32004;

impl JsonRpcRequest {
    /// Create a new JSON-RPC request
    pub fn new(id: Option<Value>, method: String, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method,
            params,
        }
    }

    /// Create a request with a numeric ID
    pub fn with_id(id: u64, method: String, params: Option<Value>) -> Self {
        Self::new(Some(Value::Number(id.into())), method, params)
    }

    /// Check if this is a notification (no id)
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response is an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl JsonRpcError {
    /// Create a new JSON-RPC error
    pub fn new(code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            code,
            message,
            data,
        }
    }

    /// Create a parse error (-32700)
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message.into(), None)
    }

    /// Create a method not found error (-32601)
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", method.into()),
            None,
        )
    }

    /// Create an invalid params error (-32602)
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message.into(), None)
    }

    /// Create an internal error (-32603)
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message.into(), None)
    }

    /// Create a tool not found error (-32001)
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::new(
            TOOL_NOT_FOUND,
            format!("Tool not found: {}", name.into()),
            None,
        )
    }

    /// Create a resource not found error (-32002)
    pub fn resource_not_found(uri: impl Into<String>) -> Self {
        Self::new(
            RESOURCE_NOT_FOUND,
            format!("Resource not found: {}", uri.into()),
            None,
        )
    }

    /// Create a backend unavailable error (-32004)
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(BACKEND_UNAVAILABLE, message.into(), None)
    }
}

// ===== MCP Entity Types =====

/// MCP Tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// MCP Resource definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResource {
    pub name: String,

    pub uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let req = JsonRpcRequest::with_id(
            1,
            "tools/call".to_string(),
            Some(json!({"name": "record_metric"})),
        );
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"method\":\"tools/call\""));
    }

    #[test]
    fn test_request_notification() {
        let req = JsonRpcRequest::new(None, "notifications/initialized".to_string(), None);
        assert!(req.is_notification());

        let req_with_id = JsonRpcRequest::with_id(1, "ping".to_string(), None);
        assert!(!req_with_id.is_notification());
    }

    #[test]
    fn test_response_success_and_error() {
        let resp = JsonRpcResponse::success(json!(1), json!({"ok": true}));
        assert!(!resp.is_error());

        let resp = JsonRpcResponse::error(json!(1), JsonRpcError::internal_error("boom"));
        assert!(resp.is_error());
    }

    #[test]
    fn test_null_result_is_preserved() {
        let json = r#"{"jsonrpc":"2.0","id":1,"result":null}"#;
        let resp: JsonRpcResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result, Some(Value::Null));
        assert!(!resp.is_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(JsonRpcError::parse_error("bad json").code, PARSE_ERROR);
        assert_eq!(
            JsonRpcError::method_not_found("nope").code,
            METHOD_NOT_FOUND
        );
        assert_eq!(JsonRpcError::invalid_params("bad").code, INVALID_PARAMS);
        assert_eq!(JsonRpcError::internal_error("boom").code, INTERNAL_ERROR);

        let err = JsonRpcError::tool_not_found("get_weather");
        assert_eq!(err.code, TOOL_NOT_FOUND);
        assert!(err.message.contains("get_weather"));

        let err = JsonRpcError::resource_not_found("file:///nope.log");
        assert_eq!(err.code, RESOURCE_NOT_FOUND);
        assert!(err.message.contains("file:///nope.log"));

        assert_eq!(
            JsonRpcError::backend_unavailable("store down").code,
            BACKEND_UNAVAILABLE
        );
    }

    #[test]
    fn test_roundtrip() {
        let req = JsonRpcRequest::with_id(42, "tools/list".to_string(), None);
        let json = serde_json::to_string(&req).unwrap();
        let parsed: JsonRpcRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, req.id);
        assert_eq!(parsed.method, req.method);
    }
}
