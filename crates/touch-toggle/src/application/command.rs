//! External command execution seam.
//!
//! The device controller never spawns processes itself.  It hands a program
//! name and argument vector to a [`CommandRunner`] and receives the raw
//! [`CommandOutput`] back.  Deciding whether that output counts as a failure
//! is the controller's job, not the runner's.
//!
//! Infrastructure provides `SystemCommandRunner` (real processes with a
//! timeout) and `ScriptedCommandRunner` (canned responses for tests).

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for external command execution.
///
/// Every variant carries the full command line so the failure can be logged
/// without further context.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started, or waiting for it failed.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but reported failure.
    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    Failed {
        command: String,
        /// Exit code, or `None` if the process was killed by a signal.
        status: Option<i32>,
        /// Captured standard error, decoded lossily.
        stderr: String,
    },

    /// The process did not finish before the deadline and was killed.
    #[error("`{command}` did not finish within {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

impl CommandError {
    /// The command line that produced this error.
    pub fn command(&self) -> &str {
        match self {
            CommandError::Spawn { command, .. }
            | CommandError::Failed { command, .. }
            | CommandError::TimedOut { command, .. } => command,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no exit status".to_string(),
    }
}

/// Raw outcome of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the OS reported successful termination.
    pub success: bool,
    /// Exit code, `None` if terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// A successful run (exit status 0) that printed `stdout`.
    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            status: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// A failed run with the given exit status and standard error.
    pub fn failed(status: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            status: Some(status),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// `true` only when the OS reported success **and** the exit status is 0.
    pub fn is_success(&self) -> bool {
        self.success && self.status == Some(0)
    }

    /// Standard output decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error decoded as UTF-8, replacing invalid sequences.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Synchronously runs an external program to completion.
///
/// "Synchronously" from the caller's point of view: the returned future only
/// resolves once the process has exited and its output has been captured.
///
/// Implementations return `Err` only when no [`CommandOutput`] exists at all
/// (the process could not be started or was killed on timeout).  A process
/// that ran and failed is reported as `Ok` with `success == false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and captures its output.
    async fn run(&self, program: &str, args: Vec<String>) -> Result<CommandOutput, CommandError>;
}

/// Formats `program` and `args` as a single line for logs and errors.
pub fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
