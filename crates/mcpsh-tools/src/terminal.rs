//! The `terminal_tool` capability: arbitrary shell command execution.
//!
//! Intentionally unrestricted: no allow-list, no sandbox. The command
//! runs with the same privileges as the server process.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::exec::{run_shell, ExecError};
use crate::{Tool, ToolConfig, ToolOutcome};

/// Exit code conventionally reported for timed-out commands.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Result payload of a `terminal_tool` invocation.
///
/// The field set is stable across success and failure: failure paths
/// still populate `stdout`, `stderr` and `return_code` with defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalResult {
    /// Failure message, absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Process exit code (124 on timeout, 1 on other failures).
    pub return_code: i32,
    /// The original command echoed back (absent for the empty-command
    /// guard, which never spawns a process).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl TerminalResult {
    fn failure(error: String, return_code: i32, command: Option<String>) -> Self {
        Self {
            error: Some(error),
            stdout: String::new(),
            stderr: String::new(),
            return_code,
            command,
        }
    }
}

/// Runs `command` through the shell with the given ceiling.
///
/// Never fails: every error is folded into a [`TerminalResult`].
pub async fn run_terminal(command: &str, ceiling: Duration) -> TerminalResult {
    if command.trim().is_empty() {
        return TerminalResult::failure("Command cannot be empty".to_string(), 1, None);
    }

    debug!(command, "executing shell command");

    match run_shell(command, ceiling).await {
        Ok(out) => TerminalResult {
            error: None,
            stdout: out.stdout,
            stderr: out.stderr,
            return_code: out.exit_code,
            command: Some(command.to_string()),
        },
        Err(ExecError::Timeout(elapsed)) => TerminalResult::failure(
            format!("Command timed out after {} seconds", elapsed.as_secs()),
            TIMEOUT_EXIT_CODE,
            Some(command.to_string()),
        ),
        Err(e) => TerminalResult::failure(
            format!("Failed to execute command: {e}"),
            1,
            Some(command.to_string()),
        ),
    }
}

/// MCP-facing wrapper around [`run_terminal`].
pub struct TerminalTool {
    ceiling: Duration,
}

impl TerminalTool {
    /// Creates the tool with the configured execution ceiling.
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            ceiling: config.command_timeout,
        }
    }
}

#[async_trait]
impl Tool for TerminalTool {
    fn name(&self) -> &str {
        "terminal_tool"
    }

    fn description(&self) -> &str {
        "Execute a terminal/shell command and return stdout, stderr and the return code."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn call(&self, arguments: &Value) -> ToolOutcome {
        let Some(command) = arguments.get("command").and_then(Value::as_str) else {
            return ToolOutcome::fail("terminal_tool requires a string 'command' argument");
        };
        let result = run_terminal(command, self.ceiling).await;
        let is_error = result.error.is_some();
        ToolOutcome::json(&result, is_error)
    }
}
