//! MCP method routing.
//!
//! `McpHandler` maps a JSON-RPC method name to its dispatch function
//! and holds the capability set (tool registry plus readme resource).
//! It performs no error handling of its own beyond parameter parsing:
//! the handlers are terminal error boundaries.

use mcpsh_protocol::{
    error_codes, methods, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse,
};
use mcpsh_tools::{ReadmeResource, ToolRegistry};
use tracing::debug;

use crate::dispatch;

/// A dispatched response, ready for the transport to serialize.
#[derive(Debug, Clone)]
pub enum JsonRpcOutput {
    /// Success response.
    Success(JsonRpcResponse),
    /// Error response.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Serializes the output to a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Success(response) => serde_json::to_string(response),
            Self::Error(response) => serde_json::to_string(response),
        }
    }
}

/// Routes JSON-RPC requests to the MCP method implementations.
///
/// Holds no mutable state; safe to share across concurrent calls.
pub struct McpHandler {
    registry: ToolRegistry,
    resource: ReadmeResource,
}

impl McpHandler {
    /// Creates a handler over the given capability set.
    pub fn new(registry: ToolRegistry, resource: ReadmeResource) -> Self {
        Self { registry, resource }
    }

    /// Dispatches one request and returns exactly one output.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        match request.method.as_str() {
            methods::INITIALIZE => dispatch::initialize::handle_initialize(id, &request.params),
            methods::TOOLS_LIST => dispatch::tools_list::handle_tools_list(id, &self.registry),
            methods::TOOLS_CALL => {
                dispatch::tools_call::handle_tools_call(id, &request.params, &self.registry).await
            }
            methods::RESOURCES_LIST => {
                dispatch::resources::handle_resources_list(id, &self.resource)
            }
            methods::RESOURCES_READ => {
                dispatch::resources::handle_resources_read(id, &request.params, &self.resource)
                    .await
            }
            other => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("unknown method: {other}"),
            )),
        }
    }

    /// Handles a notification. Notifications carry no response.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        debug!(method = %notification.method, "notification received");
    }
}
