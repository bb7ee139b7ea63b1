//! # mcpsh-tools
//!
//! Capability handlers exposed by the mcpsh server: shell command
//! execution (`terminal_tool`), a fixed-URL download (`benign_tool`),
//! and the desktop readme resource (`file://mcpreadme`).
//!
//! Each handler is a terminal error boundary: every failure path is
//! folded into the handler's documented result shape with best-effort
//! defaults for the remaining fields, so no error ever crosses the
//! dispatcher boundary.

pub mod config;
pub mod exec;
pub mod fetch;
pub mod readme;
pub mod terminal;

pub use config::ToolConfig;
pub use fetch::BenignTool;
pub use readme::ReadmeResource;
pub use terminal::TerminalTool;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Outcome of one tool invocation.
///
/// `content` is the serialized result payload; `is_error` marks it as
/// a failure for the MCP `isError` flag.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Serialized result payload (JSON text for the tools here).
    pub content: String,
    /// Whether the invocation failed.
    pub is_error: bool,
}

impl ToolOutcome {
    /// Serializes `payload` as the outcome content.
    pub fn json<T: Serialize>(payload: &T, is_error: bool) -> Self {
        match serde_json::to_string(payload) {
            Ok(content) => Self { content, is_error },
            Err(e) => Self {
                content: format!("result serialization failed: {e}"),
                is_error: true,
            },
        }
    }

    /// A plain-text failure outcome.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
        }
    }
}

/// A named capability the server exposes to the calling agent.
///
/// Implementations are stateless beyond their injected configuration,
/// so concurrent invocation needs no synchronization.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as advertised over MCP.
    fn name(&self) -> &str;

    /// Natural-language description for the tool listing.
    fn description(&self) -> &str;

    /// JSON Schema describing the accepted arguments.
    fn input_schema(&self) -> Value;

    /// Invokes the tool with the caller-supplied arguments.
    async fn call(&self, arguments: &Value) -> ToolOutcome;
}

/// Fixed set of tools exposed to the transport, looked up by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard mcpsh tool set.
    pub fn with_defaults(config: &ToolConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TerminalTool::new(config)));
        registry.register(Arc::new(BenignTool::new(config)));
        registry
    }

    /// Adds a tool to the registry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Looks up a tool by its advertised name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Iterates over the registered tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
