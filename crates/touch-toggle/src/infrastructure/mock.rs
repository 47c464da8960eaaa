//! Scripted command runner for tests.
//!
//! # Why a scripted runner?
//!
//! The real [`SystemCommandRunner`](super::process::SystemCommandRunner)
//! needs an X session with the touch screen attached, and running it would
//! actually switch the test machine's touch screen off.
//!
//! `ScriptedCommandRunner` never spawns anything.  Responses are registered
//! per `xinput` sub-command (`list`, `list-props`, `enable`, `disable`) and
//! every invocation is recorded so tests can assert exactly which commands
//! were issued and in what order.
//!
//! # Response queues
//!
//! Each sub-command has a FIFO queue.  A call pops the front response while
//! more than one is queued; the last one is sticky and answers every later
//! call.  A sub-command with no responses fails like a missing program.
//!
//! ```ignore
//! let runner = Arc::new(ScriptedCommandRunner::new());
//! runner.respond("list", ScriptedResponse::stdout("06CB:19AC \tid=11"));
//! runner.respond("list-props", ScriptedResponse::stdout("Device Enabled (143):\t1"));
//! runner.respond("list-props", ScriptedResponse::stdout("Device Enabled (143):\t0"));
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::command::{command_line, CommandError, CommandOutput, CommandRunner};

/// One canned answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    /// The process ran and produced this output.
    Output(CommandOutput),
    /// The process ran past its deadline.
    TimedOut(Duration),
}

impl ScriptedResponse {
    /// Exit status 0 with `text` on stdout.
    pub fn stdout(text: &str) -> Self {
        ScriptedResponse::Output(CommandOutput::ok(text))
    }

    /// Non-zero exit with `text` on stderr.
    pub fn failure(status: i32, text: &str) -> Self {
        ScriptedResponse::Output(CommandOutput::failed(status, text))
    }
}

/// A [`CommandRunner`] that answers from per-sub-command queues.
#[derive(Debug, Default)]
pub struct ScriptedCommandRunner {
    responses: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    invocations: Mutex<Vec<Vec<String>>>,
}

impl ScriptedCommandRunner {
    /// Creates a runner with no responses and no recorded invocations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `response` to the queue for `subcommand`.
    pub fn respond(&self, subcommand: &str, response: ScriptedResponse) -> &Self {
        lock(&self.responses)
            .entry(subcommand.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Every recorded argument vector, oldest first.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        lock(&self.invocations).clone()
    }

    /// The recorded sub-commands (first argument of each call), oldest first.
    pub fn subcommands(&self) -> Vec<String> {
        lock(&self.invocations)
            .iter()
            .filter_map(|args| args.first().cloned())
            .collect()
    }

    /// Number of recorded calls of `subcommand`.
    pub fn count(&self, subcommand: &str) -> usize {
        lock(&self.invocations)
            .iter()
            .filter(|args| args.first().map(String::as_str) == Some(subcommand))
            .count()
    }

    fn next_response(&self, subcommand: &str) -> Option<ScriptedResponse> {
        let mut responses = lock(&self.responses);
        let queue = responses.get_mut(subcommand)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedCommandRunner {
    async fn run(&self, program: &str, args: Vec<String>) -> Result<CommandOutput, CommandError> {
        let command = command_line(program, &args);
        let subcommand = args.first().cloned().unwrap_or_default();
        lock(&self.invocations).push(args);

        match self.next_response(&subcommand) {
            Some(ScriptedResponse::Output(output)) => Ok(output),
            Some(ScriptedResponse::TimedOut(timeout)) => {
                Err(CommandError::TimedOut { command, timeout })
            }
            None => Err(CommandError::Spawn {
                command,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no scripted response for `{subcommand}`"),
                ),
            }),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
