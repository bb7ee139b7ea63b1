//! MCP server loop over the stdio transport.
//!
//! Reads JSON-RPC requests line by line, dispatches them via
//! `McpHandler`, and writes responses back. Notifications (which have
//! no `id` field) are handled silently without a response.

use tracing::{debug, error, info, warn};

use mcpsh_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest, RequestId,
};

use crate::error::TransportError;
use crate::handler::{JsonRpcOutput, McpHandler};
use crate::transport::StdioTransport;

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: McpHandler,
}

impl<R, W> McpServer<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new server with the given transport and handler.
    pub fn new(transport: StdioTransport<R, W>, handler: McpHandler) -> Self {
        Self { transport, handler }
    }

    /// Runs the server loop until the transport is closed.
    ///
    /// Each incoming line is parsed as either a JSON-RPC request
    /// (response required) or a notification (silently handled).
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server starting on stdio");

        loop {
            let line = match self.transport.read_line().await? {
                Some(line) if line.is_empty() => continue,
                Some(line) => line,
                None => {
                    info!("stdin closed, shutting down");
                    return Ok(());
                }
            };

            match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => {
                    debug!(method = %request.method, id = ?request.id, "received request");
                    let output = self.handler.dispatch(&request).await;
                    self.write_output(&output).await?;
                }
                Err(_) => {
                    // No `id` field: try as a notification before giving up.
                    match serde_json::from_str::<JsonRpcNotification>(&line) {
                        Ok(notification) => {
                            self.handler.handle_notification(&notification);
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to parse JSON-RPC message");
                            let err = JsonRpcErrorResponse::error(
                                RequestId::Number(0),
                                error_codes::PARSE_ERROR,
                                format!("parse error: {e}"),
                            );
                            self.write_output(&JsonRpcOutput::Error(err)).await?;
                        }
                    }
                }
            }
        }
    }

    /// Serializes and writes one output line to the transport.
    async fn write_output(&mut self, output: &JsonRpcOutput) -> Result<(), TransportError> {
        match output.to_json() {
            Ok(json) => self.transport.write_line(&json).await,
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Err(TransportError::Write(e.to_string()))
            }
        }
    }
}
