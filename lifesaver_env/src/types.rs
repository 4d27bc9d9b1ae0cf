//! Common types shared between launchers and the runner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One external process execution.
///
/// `label` is a human-readable tag for logs and summaries
/// ("glider" for the demo, the relative pattern path otherwise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Program to execute
    pub program: String,

    /// Arguments, excluding the program itself
    pub args: Vec<String>,

    /// Tag used in logs and summaries
    pub label: String,
}

impl Invocation {
    /// Creates a new invocation.
    pub fn new(program: impl Into<String>, args: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            label: label.into(),
        }
    }

    /// Renders the command line for display (not shell-escaped).
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.label, self.command_line())
    }
}

/// How a finished invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RunStatus {
    /// Normal exit with the given code
    Exited(i32),

    /// Killed by the given signal (unix only)
    Signaled(i32),
}

impl RunStatus {
    /// Successful exit.
    pub const SUCCESS: RunStatus = RunStatus::Exited(0);

    /// Returns true for a zero exit code.
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Exited(0))
    }

    /// Exit code to propagate. Signals map to `128 + signal`.
    pub fn code(&self) -> i32 {
        match *self {
            RunStatus::Exited(code) => code,
            RunStatus::Signaled(signal) => 128 + signal,
        }
    }
}

impl From<std::process::ExitStatus> for RunStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return RunStatus::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return RunStatus::Signaled(signal);
            }
        }

        RunStatus::Exited(1)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Exited(code) => write!(f, "exit {}", code),
            RunStatus::Signaled(signal) => write!(f, "signal {}", signal),
        }
    }
}
