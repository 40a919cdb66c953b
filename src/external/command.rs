//! Base command execution abstraction
//!
//! Provides the foundational trait for executing external commands, enabling
//! dependency injection for testing.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("Command execution failed: {message}")]
    ExecutionFailed { message: String },
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
    #[error("Command timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("IO error: {message}")]
    Io { message: String },
}

/// Trait for executing external commands
///
/// This abstraction allows the rest of the codebase to execute commands
/// without directly depending on tokio::process::Command, enabling testing
/// with scripted implementations.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Real implementation using tokio::process::Command
///
/// Both streams are piped and collected in full; nothing reaches the
/// caller's own stdout/stderr.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandExecutor {
    timeout: Option<Duration>,
}

impl ProcessCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound each invocation. The child is killed when the bound expires.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        use tokio::process::Command;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CommandError::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    CommandError::Io { message: e.to_string() }
                }
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| CommandError::Timeout {
                    timeout_ms: limit.as_millis() as u64,
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| CommandError::ExecutionFailed { message: e.to_string() })?;

        Ok(CommandOutput {
            status_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_process_command_executor_success() {
        let executor = ProcessCommandExecutor::new();
        let result = executor.execute("echo", &["hello"]).await;

        assert!(result.is_ok());
        let output = result.unwrap();
        assert!(output.success());
        assert!(output.stdout.contains("hello"));
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_process_command_executor_command_not_found() {
        let executor = ProcessCommandExecutor::new();
        let result = executor.execute("nonexistent_command_xyz", &[]).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), CommandError::CommandNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streams_are_captured_separately() {
        let executor = ProcessCommandExecutor::new();
        let output = executor
            .execute("sh", &["-c", "echo out; echo err >&2; exit 3"])
            .await
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.status_code, 3);
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_expires() {
        let executor = ProcessCommandExecutor::new().with_timeout(Some(Duration::from_millis(100)));
        let result = executor.execute("sleep", &["5"]).await;

        assert_eq!(result.unwrap_err(), CommandError::Timeout { timeout_ms: 100 });
    }
}
