//! MCP Protocol Types (JSON-RPC 2.0)
//!
//! Wire format for the agent-facing side of the bridge: newline-delimited
//! JSON-RPC 2.0 over stdio.
//!
//! ## Request
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 2,
//!   "method": "tools/call",
//!   "params": { "name": "roblox_list_services", "arguments": { "client_id": "studio" } }
//! }
//! ```
//!
//! ## Response (success)
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 2,
//!   "result": { "content": [{ "type": "text", "text": "{...}" }] }
//! }
//! ```
//!
//! Tool failures do NOT surface as JSON-RPC errors; they come back as a
//! success response whose result carries `isError: true`. JSON-RPC errors are
//! reserved for protocol-level problems (unknown method, bad params).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 version string
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version reported by `initialize`
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Nominally "2.0"; the bridge routes on `method` and does not reject
    /// messages over the version field
    #[serde(default = "default_version")]
    pub jsonrpc: String,

    /// Request ID (number or string); absent for notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    /// Method name
    pub method: String,

    /// Parameters (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

/// JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Must be "2.0"
    pub jsonrpc: String,

    /// Request ID (must match request)
    pub id: Option<RequestId>,

    /// Result (mutually exclusive with error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error (mutually exclusive with result)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Request ID (number or string per the JSON-RPC spec)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,

    /// Human-readable message
    pub message: String,

    /// Additional data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            message: message.into(),
            data: None,
        }
    }
}

/// Standard JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON (-32700)
    ParseError,
    /// Invalid request object (-32600)
    InvalidRequest,
    /// Method not found (-32601)
    MethodNotFound,
    /// Invalid method parameters (-32602)
    InvalidParams,
    /// Internal error (-32603)
    InternalError,
}

impl ErrorCode {
    /// Convert to JSON-RPC error code
    pub fn as_i32(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

// ============================================================================
// MCP-Specific Message Types
// ============================================================================

/// MCP Initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version the server is using
    pub protocol_version: String,

    /// Server info
    pub server_info: ServerInfo,

    /// Server capabilities
    pub capabilities: ServerCapabilities,
}

/// Server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,

    /// Server version
    pub version: String,
}

/// Server capabilities. The bridge only exposes tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tools capability (empty object on the wire)
    pub tools: ToolsCapability,
}

/// Tools capability marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {}

/// Tool definition for tools/list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name (e.g. "roblox_get_tree")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters (advisory; not enforced)
    pub input_schema: Value,
}

/// Tools list result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResult {
    /// Available tools
    pub tools: Vec<ToolDefinition>,
}

/// Tool call params
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    /// Tool name
    pub name: String,

    /// Tool arguments
    #[serde(default)]
    pub arguments: Value,
}

/// Tool call result envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Result content
    pub content: Vec<ContentBlock>,

    /// Whether the tool call resulted in an error
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Success envelope wrapping already-serialized text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    /// Error envelope carrying a human-readable message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(message)],
            is_error: true,
        }
    }
}

/// Content block in a tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text content
        text: String,
    },
}

impl ContentBlock {
    /// Create a text content block
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }
}

// ============================================================================
// MCP Methods
// ============================================================================

/// Known MCP methods
pub mod methods {
    /// Initialize the connection
    pub const INITIALIZE: &str = "initialize";
    /// Notification that initialization is complete
    pub const INITIALIZED: &str = "notifications/initialized";
    /// List available tools
    pub const TOOLS_LIST: &str = "tools/list";
    /// Call a tool
    pub const TOOLS_CALL: &str = "tools/call";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_roundtrip() {
        let line = r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"roblox_list_services","arguments":{"client_id":"studio"}}}"#;
        let req: JsonRpcRequest = serde_json::from_str(line).unwrap();

        assert_eq!(req.method, "tools/call");
        assert_eq!(req.id, Some(RequestId::Number(2)));
        let params: ToolCallParams = serde_json::from_value(req.params.unwrap()).unwrap();
        assert_eq!(params.name, "roblox_list_services");
        assert_eq!(params.arguments["client_id"], "studio");
    }

    #[test]
    fn test_request_without_method_is_rejected() {
        let line = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
        assert!(serde_json::from_str::<JsonRpcRequest>(line).is_err());
    }

    #[test]
    fn test_response_success() {
        let resp = JsonRpcResponse::success(
            Some(RequestId::Number(1)),
            serde_json::json!({ "tools": [] }),
        );

        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_response_error_code() {
        let resp = JsonRpcResponse::error(
            Some(RequestId::String("abc".into())),
            JsonRpcError::new(ErrorCode::MethodNotFound, "Method not found"),
        );

        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, -32601);
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ToolCallResult::error("Unknown tool: roblox_nonsense");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Unknown tool: roblox_nonsense");
    }

    #[test]
    fn test_success_envelope_omits_error_flag() {
        let envelope = ToolCallResult::text("null");
        let json = serde_json::to_value(&envelope).unwrap();

        assert!(json.get("isError").is_none());
        assert_eq!(json["content"][0]["text"], "null");
    }

    #[test]
    fn test_initialize_capabilities_are_empty_object() {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: "roblox-mcp-bridge".to_string(),
                version: "0.6.0".to_string(),
            },
            capabilities: ServerCapabilities {
                tools: ToolsCapability {},
            },
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(json["capabilities"]["tools"], serde_json::json!({}));
    }
}
