//! The `benign_tool` capability: download a fixed URL.
//!
//! Two transport strategies, tried in order: the external downloader
//! binary (`curl -s -L`), then the built-in HTTP client when the binary
//! is absent. Each strategy yields a uniform outcome and the handler
//! folds the list until one succeeds or a strategy fails terminally.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::exec::{run_with_deadline, ExecError};
use crate::{Tool, ToolConfig, ToolOutcome};

/// Result payload of a `benign_tool` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    /// Whether the download succeeded.
    pub success: bool,
    /// Downloaded body text (empty on failure).
    pub content: String,
    /// Failure message, absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The fixed target URL, always echoed back.
    pub url: String,
    /// Human-readable status, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Downloader exit code, present when the primary strategy failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,
}

impl FetchResult {
    fn ok(url: &str, content: String, status: &str) -> Self {
        Self {
            success: true,
            content,
            error: None,
            url: url.to_string(),
            status: Some(status.to_string()),
            return_code: None,
        }
    }

    fn fail(url: &str, error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
            url: url.to_string(),
            status: None,
            return_code: None,
        }
    }
}

/// Uniform outcome of one download strategy.
enum StrategyOutcome {
    /// The strategy produced a body.
    Fetched { body: String, status: &'static str },
    /// The strategy's external tool is unavailable; try the next one.
    ToolMissing,
    /// The strategy ran and failed; stop folding.
    Failed(FetchResult),
}

/// Downloads the configured URL, folding the strategy list.
///
/// Never fails: every error is folded into a [`FetchResult`].
pub async fn run_fetch(config: &ToolConfig) -> FetchResult {
    let mut outcome = curl_strategy(config).await;
    if matches!(outcome, StrategyOutcome::ToolMissing) {
        info!(downloader = %config.downloader_bin, "downloader missing, using fallback client");
        outcome = fallback_strategy(config).await;
    }

    match outcome {
        StrategyOutcome::Fetched { body, status } => {
            debug!(bytes = body.len(), status, "download complete");
            FetchResult::ok(&config.fetch_url, body, status)
        }
        StrategyOutcome::Failed(result) => result,
        // The fallback client is built in and never reports ToolMissing.
        StrategyOutcome::ToolMissing => FetchResult::fail(
            &config.fetch_url,
            "Unexpected error: no download strategy available".to_string(),
        ),
    }
}

/// Primary strategy: the external downloader binary, silent, following
/// redirects.
async fn curl_strategy(config: &ToolConfig) -> StrategyOutcome {
    let url = config.fetch_url.as_str();
    let args = ["-s", "-L", url];

    match run_with_deadline(&config.downloader_bin, &args, config.fetch_timeout).await {
        Ok(out) if out.exit_code == 0 => StrategyOutcome::Fetched {
            body: out.stdout,
            status: "Downloaded successfully",
        },
        Ok(out) => {
            let error = if out.stderr.is_empty() {
                "Unknown curl error".to_string()
            } else {
                out.stderr
            };
            let mut result = FetchResult::fail(url, error);
            result.return_code = Some(out.exit_code);
            StrategyOutcome::Failed(result)
        }
        Err(ExecError::BinaryMissing(_)) => StrategyOutcome::ToolMissing,
        Err(ExecError::Timeout(elapsed)) => StrategyOutcome::Failed(FetchResult::fail(
            url,
            format!("Download timed out after {} seconds", elapsed.as_secs()),
        )),
        Err(e) => {
            StrategyOutcome::Failed(FetchResult::fail(url, format!("Unexpected error: {e}")))
        }
    }
}

/// Fallback strategy: the built-in HTTP client under the same ceiling.
async fn fallback_strategy(config: &ToolConfig) -> StrategyOutcome {
    let url = config.fetch_url.as_str();

    let client = match reqwest::Client::builder()
        .timeout(config.fetch_timeout)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            return StrategyOutcome::Failed(FetchResult::fail(
                url,
                format!("Curl not found and fallback client failed: {e}"),
            ));
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return StrategyOutcome::Failed(FetchResult::fail(url, format!("URL error: {e}")));
        }
    };

    // Non-2xx is a URL-level failure, matching the primary strategy's
    // error taxonomy.
    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            return StrategyOutcome::Failed(FetchResult::fail(url, format!("URL error: {e}")));
        }
    };

    match response.text().await {
        Ok(body) => StrategyOutcome::Fetched {
            body,
            status: "Downloaded successfully (fallback client)",
        },
        Err(e) => StrategyOutcome::Failed(FetchResult::fail(
            url,
            format!("Curl not found and fallback client failed: {e}"),
        )),
    }
}

/// MCP-facing wrapper around [`run_fetch`]. Takes no arguments.
pub struct BenignTool {
    config: ToolConfig,
}

impl BenignTool {
    /// Creates the tool with its injected configuration.
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Tool for BenignTool {
    fn name(&self) -> &str {
        "benign_tool"
    }

    fn description(&self) -> &str {
        "Download content from a fixed URL and return the result."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, _arguments: &Value) -> ToolOutcome {
        let result = run_fetch(&self.config).await;
        let is_error = !result.success;
        ToolOutcome::json(&result, is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_config(downloader_bin: &str, fetch_url: &str) -> ToolConfig {
        ToolConfig {
            fetch_timeout: Duration::from_secs(5),
            fetch_url: fetch_url.to_string(),
            downloader_bin: downloader_bin.to_string(),
            ..ToolConfig::default()
        }
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, body).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn primary_success_uses_stdout_as_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake_curl = write_script(dir.path(), "curl-ok", "#!/bin/sh\nprintf 'X'\n");
        let config = test_config(&fake_curl, "https://example.invalid/fixture");

        let result = run_fetch(&config).await;
        assert!(result.success);
        assert_eq!(result.content, "X");
        assert_eq!(result.status.as_deref(), Some("Downloaded successfully"));
        assert_eq!(result.url, "https://example.invalid/fixture");
        assert!(result.return_code.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn primary_failure_reports_stderr_and_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake_curl = write_script(dir.path(), "curl-fail", "#!/bin/sh\necho 'no route' >&2\nexit 6\n");
        let config = test_config(&fake_curl, "https://example.invalid/fixture");

        let result = run_fetch(&config).await;
        assert!(!result.success);
        assert_eq!(result.content, "");
        assert_eq!(result.error.as_deref(), Some("no route\n"));
        assert_eq!(result.return_code, Some(6));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn primary_failure_without_stderr_uses_sentinel() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake_curl = write_script(dir.path(), "curl-silent", "#!/bin/sh\nexit 22\n");
        let config = test_config(&fake_curl, "https://example.invalid/fixture");

        let result = run_fetch(&config).await;
        assert_eq!(result.error.as_deref(), Some("Unknown curl error"));
        assert_eq!(result.return_code, Some(22));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn primary_timeout_reports_sentinel_message() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake_curl = write_script(dir.path(), "curl-slow", "#!/bin/sh\nsleep 5\n");
        let mut config = test_config(&fake_curl, "https://example.invalid/fixture");
        config.fetch_timeout = Duration::from_millis(100);

        let result = run_fetch(&config).await;
        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .expect("error")
            .starts_with("Download timed out after"));
    }

    /// Serves one canned HTTP response on a loopback listener.
    async fn serve_once(body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn missing_downloader_falls_back_to_builtin_client() {
        let url = serve_once("Y").await;
        let config = test_config("mcpsh-no-such-downloader", &url);

        let result = run_fetch(&config).await;
        assert!(result.success);
        assert_eq!(result.content, "Y");
        assert_eq!(
            result.status.as_deref(),
            Some("Downloaded successfully (fallback client)")
        );
    }

    #[tokio::test]
    async fn fallback_network_failure_is_a_url_error() {
        // Port 1 on loopback refuses connections.
        let config = test_config("mcpsh-no-such-downloader", "http://127.0.0.1:1/");

        let result = run_fetch(&config).await;
        assert!(!result.success);
        assert!(result.error.as_deref().expect("error").starts_with("URL error:"));
    }

    #[tokio::test]
    async fn benign_tool_takes_no_arguments() {
        let url = serve_once("ok").await;
        let config = test_config("mcpsh-no-such-downloader", &url);
        let tool = BenignTool::new(&config);

        let outcome = tool.call(&serde_json::json!({})).await;
        assert!(!outcome.is_error);
        let parsed: FetchResult = serde_json::from_str(&outcome.content).expect("json");
        assert_eq!(parsed.content, "ok");
    }
}
