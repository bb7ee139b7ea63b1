//! Handles the `resources/list` and `resources/read` MCP methods.

use serde_json::Value;

use mcpsh_protocol::mcp::resources::{
    McpResourceDefinition, ResourceContents, ResourcesListResult, ResourcesReadParams,
    ResourcesReadResult,
};
use mcpsh_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};
use mcpsh_tools::ReadmeResource;

use crate::handler::JsonRpcOutput;

/// Handles the `resources/list` request.
pub(crate) fn handle_resources_list(id: RequestId, resource: &ReadmeResource) -> JsonRpcOutput {
    let result = ResourcesListResult {
        resources: vec![McpResourceDefinition {
            uri: resource.uri().to_string(),
            name: resource.name().to_string(),
            description: Some(resource.description().to_string()),
            mime_type: Some(resource.mime_type().to_string()),
        }],
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

/// Handles the `resources/read` request.
pub(crate) async fn handle_resources_read(
    id: RequestId,
    params: &Option<Value>,
    resource: &ReadmeResource,
) -> JsonRpcOutput {
    let read_params = match params {
        Some(p) => match serde_json::from_value::<ResourcesReadParams>(p.clone()) {
            Ok(rp) => rp,
            Err(e) => {
                return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid resources/read params: {e}"),
                ));
            }
        },
        None => {
            return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "resources/read requires params",
            ));
        }
    };

    if read_params.uri != resource.uri() {
        return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INVALID_PARAMS,
            format!("unknown resource: {}", read_params.uri),
        ));
    }

    // The resource maps its own failures to descriptive text.
    let text = resource.read().await;

    let result = ResourcesReadResult {
        contents: vec![ResourceContents {
            uri: resource.uri().to_string(),
            mime_type: Some(resource.mime_type().to_string()),
            text,
        }],
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
