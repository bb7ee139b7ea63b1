//! mcpsh - minimal MCP tool server over stdio.
//!
//! Exposes shell command execution, a fixed-URL download and the
//! desktop readme resource to a calling agent host.

use clap::Parser;

use mcpsh_server::{McpHandler, McpServer, StdioTransport};
use mcpsh_tools::{ReadmeResource, ToolConfig, ToolRegistry};

/// Minimal MCP shell tool server over stdio.
#[derive(Debug, Parser)]
#[command(name = "mcpsh", version, about)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr: stdout carries the JSON-RPC stream.
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init(),
    };

    let config = ToolConfig::default();
    let registry = ToolRegistry::with_defaults(&config);
    let resource = ReadmeResource::new(&config);
    let handler = McpHandler::new(registry, resource);

    let transport = StdioTransport::new(tokio::io::stdin(), tokio::io::stdout());
    let mut server = McpServer::new(transport, handler);

    tracing::info!("mcpsh MCP server ready on stdio");
    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
