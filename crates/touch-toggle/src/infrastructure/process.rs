//! Real child-process execution with a bounded wait.
//!
//! `xinput` normally answers in a few milliseconds, but it blocks forever if
//! the X server stops responding.  Every invocation is therefore wrapped in
//! [`tokio::time::timeout`]; when the deadline passes the child is killed
//! (`kill_on_drop`) and [`CommandError::TimedOut`] is returned.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time;

use crate::application::command::{command_line, CommandError, CommandOutput, CommandRunner};

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs programs as child processes of the current process.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Creates a runner that kills any child still running after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: Vec<String>) -> Result<CommandOutput, CommandError> {
        let command = command_line(program, &args);

        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        match time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                success: output.status.success(),
                status: output.status.code(),
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            Ok(Err(source)) => Err(CommandError::Spawn { command, source }),
            // Dropping the wait future drops the child, which kills it.
            Err(_elapsed) => Err(CommandError::TimedOut {
                command,
                timeout: self.timeout,
            }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
