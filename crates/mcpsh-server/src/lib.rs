//! # mcpsh-server
//!
//! MCP method dispatch and line-delimited JSON-RPC transport over
//! stdio for the mcpsh tool server.

mod dispatch;
pub mod error;
pub mod handler;
pub mod server;
pub mod transport;

pub use error::TransportError;
pub use handler::{JsonRpcOutput, McpHandler};
pub use server::McpServer;
pub use transport::StdioTransport;
