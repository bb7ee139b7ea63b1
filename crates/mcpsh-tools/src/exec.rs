//! Supervised child-process execution shared by the shell and fetch
//! handlers.
//!
//! One spawn path: configure the command, pipe the streams, wait under
//! a deadline. A timed-out child is killed rather than abandoned, so no
//! zombie survives the call.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured streams and exit status of a finished child process.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Process exit code; `-1` when the child died from a signal.
    pub exit_code: i32,
}

/// Errors from a supervised process run.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The binary to spawn does not exist on this host.
    #[error("binary not found: {0}")]
    BinaryMissing(String),
    /// Spawning or waiting on the child failed.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The deadline elapsed before the child exited.
    #[error("timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
}

/// Runs `program` with `args` directly (no shell), bounded by `deadline`.
pub async fn run_with_deadline(
    program: &str,
    args: &[&str],
    deadline: Duration,
) -> Result<CapturedOutput, ExecError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    supervise(cmd, program, deadline).await
}

/// Runs `line` through the platform shell, bounded by `deadline`.
///
/// Shell metacharacters (pipes, redirection, chaining) work exactly as
/// they would in an interactive session.
pub async fn run_shell(line: &str, deadline: Duration) -> Result<CapturedOutput, ExecError> {
    supervise(shell_command(line), SHELL, deadline).await
}

#[cfg(not(windows))]
const SHELL: &str = "sh";
#[cfg(windows)]
const SHELL: &str = "cmd";

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c").arg(line);
    cmd
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("/C").arg(line);
    cmd
}

/// Spawns the command and waits under the deadline.
async fn supervise(
    mut cmd: Command,
    program: &str,
    deadline: Duration,
) -> Result<CapturedOutput, ExecError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Dropping the wait future at the deadline must reclaim the child.
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ExecError::BinaryMissing(program.to_string())
        } else {
            ExecError::Io(e)
        }
    })?;

    let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_elapsed) => {
            warn!(program, timeout_secs = deadline.as_secs(), "child timed out, killed");
            return Err(ExecError::Timeout(deadline));
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    debug!(program, exit_code, "child exited");

    Ok(CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEILING: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn shell_captures_stdout() {
        let out = run_shell("echo hello", CEILING).await.expect("run");
        assert_eq!(out.stdout, "hello\n");
        assert_eq!(out.exit_code, 0);
    }

    #[tokio::test]
    async fn shell_reports_real_exit_code() {
        let out = run_shell("exit 7", CEILING).await.expect("run");
        assert_eq!(out.exit_code, 7);
    }

    #[tokio::test]
    async fn shell_metacharacters_work() {
        let out = run_shell("echo one && echo two | tr 'a-z' 'A-Z'", CEILING)
            .await
            .expect("run");
        assert_eq!(out.stdout, "one\nTWO\n");
    }

    #[tokio::test]
    async fn deadline_kills_sleeping_child() {
        let err = run_shell("sleep 5", Duration::from_millis(100))
            .await
            .expect_err("should time out");
        assert!(matches!(err, ExecError::Timeout(_)));
    }

    #[tokio::test]
    async fn missing_binary_is_distinguished() {
        let err = run_with_deadline("mcpsh-no-such-binary", &[], CEILING)
            .await
            .expect_err("should fail");
        assert!(matches!(err, ExecError::BinaryMissing(_)));
    }

    #[tokio::test]
    async fn stderr_is_captured_separately() {
        let out = run_shell("echo oops >&2", CEILING).await.expect("run");
        assert_eq!(out.stdout, "");
        assert_eq!(out.stderr, "oops\n");
    }
}
