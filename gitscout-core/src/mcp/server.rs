//! MCP server: tool registry and request dispatch

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::mcp::protocol::{
    error_codes, JsonRpcRequest, JsonRpcResponse, ToolCall, ToolDefinition, ToolResult,
};
use crate::Result;

/// Protocol revision advertised in the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A callable tool exposed over MCP.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (must be unique)
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool with given arguments.
    ///
    /// Tools fold their own failures into an error [`ToolResult`]; an `Err`
    /// returned here is still converted into one, never into a protocol
    /// fault, so callers always receive a structured response.
    async fn execute(&self, arguments: Value) -> Result<ToolResult>;
}

/// Dispatches JSON-RPC requests to the registered tools.
///
/// The tool set is fixed at startup; registration is not thread-safe and
/// happens before serving begins.
pub struct McpServer {
    server_name: String,
    server_version: String,
    tools: Vec<Arc<dyn McpTool>>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            server_name: name.into(),
            server_version: version.into(),
            tools: Vec::new(),
        }
    }

    /// Register a tool. Later registrations with the same name shadow
    /// earlier ones in `tools/call` lookup order.
    pub fn register(&mut self, tool: Arc<dyn McpTool>) {
        self.tools.push(tool);
    }

    /// Handle an incoming request. Notifications yield no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "ignoring notification");
            return None;
        }

        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Unknown method: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": self.server_name,
                    "version": self.server_version
                }
            }),
        )
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<ToolDefinition> = self
            .tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();

        JsonRpcResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing params for tools/call",
                );
            }
        };

        let call: ToolCall = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tool call params: {e}"),
                );
            }
        };

        let tool = match self.tools.iter().find(|t| t.name() == call.name) {
            Some(t) => t,
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", call.name),
                );
            }
        };

        // A tool-level Err still becomes a structured error result.
        let result = match tool.execute(call.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "tool execution failed");
                ToolResult::error(e.to_string())
            }
        };

        match serde_json::to_value(&result) {
            Ok(v) => JsonRpcResponse::success(id, v),
            Err(e) => JsonRpcResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize tool result: {e}"),
            ),
        }
    }
}
