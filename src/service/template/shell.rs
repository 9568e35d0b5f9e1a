//! Subprocesses started by `$CMD$` directives.

use dioxus_logger::tracing;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::environment::Environment;
use crate::error::AppError;

/// Runs shell commands with an injected environment and a hard time limit.
///
/// A command that outlives the limit is killed. When its output was requested
/// the caller gets empty output instead of an error.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[cfg(not(windows))]
    fn command(line: &str) -> Command {
        let mut command = Command::new("/bin/sh");
        command.arg("-c").arg(line);
        command
    }

    #[cfg(windows)]
    fn command(line: &str) -> Command {
        let mut command = Command::new("cmd.exe");
        command.arg("/c").arg(line);
        command
    }

    fn prepare(line: &str, env: &Environment, capture: bool) -> Command {
        let mut command = Self::command(line);
        command
            .envs(env)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .stdout(if capture {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);
        command
    }

    /// Runs a command and returns its standard output.
    ///
    /// Lines are joined with `\n` without a trailing line break. The exit
    /// status is not inspected.
    ///
    /// # Returns
    /// - `Ok(String)` - Captured output, empty if the command timed out
    /// - `Err(AppError::IoErr)` - The shell could not be started or read
    pub async fn run(&self, line: &str, env: &Environment) -> Result<String, AppError> {
        let child = Self::prepare(line, env, true).spawn()?;

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => {
                let output = output?;
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(stdout.lines().collect::<Vec<_>>().join("\n"))
            }
            Err(_) => {
                tracing::warn!(
                    "Shell command timed out after {}s and was killed: {}",
                    self.timeout.as_secs(),
                    line
                );
                Ok(String::new())
            }
        }
    }

    /// Starts a command without waiting for it.
    ///
    /// A background task reaps the process and kills it once the time limit
    /// passes.
    pub fn spawn_detached(&self, line: &str, env: &Environment) -> Result<(), AppError> {
        let mut child = Self::prepare(line, env, false).spawn()?;
        let timeout = self.timeout;
        let line = line.to_string();

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, child.wait()).await {
                Ok(Ok(status)) => {
                    tracing::debug!("Shell command exited with {}: {}", status, line);
                }
                Ok(Err(e)) => {
                    tracing::error!("Failed to wait for shell command '{}': {}", line, e);
                }
                Err(_) => {
                    tracing::warn!(
                        "Shell command timed out after {}s and was killed: {}",
                        timeout.as_secs(),
                        line
                    );
                    if let Err(e) = child.kill().await {
                        tracing::error!("Failed to kill shell command '{}': {}", line, e);
                    }
                }
            }
        });

        Ok(())
    }
}
