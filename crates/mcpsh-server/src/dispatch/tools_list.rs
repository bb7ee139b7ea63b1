//! Handles the `tools/list` MCP method.

use mcpsh_protocol::mcp::tools::{McpToolDefinition, ToolsListResult};
use mcpsh_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};
use mcpsh_tools::ToolRegistry;

use crate::handler::JsonRpcOutput;

/// Handles the `tools/list` request.
pub(crate) fn handle_tools_list(id: RequestId, registry: &ToolRegistry) -> JsonRpcOutput {
    let definitions: Vec<McpToolDefinition> = registry
        .iter()
        .map(|tool| McpToolDefinition {
            name: tool.name().to_string(),
            description: Some(tool.description().to_string()),
            input_schema: tool.input_schema(),
        })
        .collect();

    let result = ToolsListResult {
        tools: definitions,
        next_cursor: None,
    };

    match serde_json::to_value(result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}
