//! Error types for the Lifesaver environment abstraction.

use thiserror::Error;

/// Errors that can occur while launching a simulator process.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The program could not be started (not found, not executable, ...)
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running child failed
    #[error("Failed to wait for child process: {0}")]
    Wait(#[source] std::io::Error),

    /// The Ctrl-C listener could not be registered
    #[error("Failed to listen for interrupts: {0}")]
    Signal(#[source] std::io::Error),

    /// The batch was interrupted by Ctrl-C
    #[error("Interrupted")]
    Interrupted,
}

impl EnvError {
    /// Creates a spawn error.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Exit code a shell would report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvError::Spawn { .. } => 127,
            EnvError::Wait(_) | EnvError::Signal(_) => 1,
            EnvError::Interrupted => 130,
        }
    }
}
