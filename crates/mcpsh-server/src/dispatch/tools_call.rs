//! Handles the `tools/call` MCP method.

use serde_json::Value;

use mcpsh_protocol::mcp::tools::{ToolContent, ToolsCallParams, ToolsCallResult};
use mcpsh_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};
use mcpsh_tools::ToolRegistry;

use crate::handler::JsonRpcOutput;

/// Handles the `tools/call` request.
pub(crate) async fn handle_tools_call(
    id: RequestId,
    params: &Option<Value>,
    registry: &ToolRegistry,
) -> JsonRpcOutput {
    // 1. Parse params
    let call_params = match params {
        Some(p) => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => {
                return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid tools/call params: {e}"),
                ));
            }
        },
        None => {
            return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "tools/call requires params",
            ));
        }
    };

    // 2. Look up the tool
    let Some(tool) = registry.get(&call_params.name) else {
        return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INVALID_PARAMS,
            format!("unknown tool: {}", call_params.name),
        ));
    };

    // 3. Invoke; the handler folds every failure into its outcome.
    tracing::debug!(tool = %call_params.name, "executing tool");
    let outcome = tool.call(&call_params.arguments).await;

    let call_result = ToolsCallResult {
        content: vec![ToolContent::Text {
            text: outcome.content,
        }],
        is_error: outcome.is_error,
    };

    match serde_json::to_value(call_result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}
