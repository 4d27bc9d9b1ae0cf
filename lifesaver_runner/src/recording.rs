//! Recording launcher for dry runs and deterministic tests.

use async_trait::async_trait;
use lifesaver_env::{EnvError, Invocation, Launcher, RunStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Scripted outcome for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Status(RunStatus),
    Interrupt,
}

/// Launcher that never spawns anything.
///
/// Every invocation is recorded in order. Each one "exits" with the status
/// scripted for its label, or with success when nothing was scripted.
/// Clones share the same recording.
#[derive(Default)]
pub struct RecordingLauncher {
    /// Invocations seen so far
    calls: Arc<Mutex<Vec<Invocation>>>,

    /// Outcomes keyed by invocation label
    scripted: Arc<Mutex<HashMap<String, Outcome>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingLauncher {
    /// Creates a launcher where every invocation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the invocation with `label` exit with `status`.
    pub fn with_status(self, label: impl Into<String>, status: RunStatus) -> Self {
        lock(&self.scripted).insert(label.into(), Outcome::Status(status));
        self
    }

    /// Makes the invocation with `label` behave as if Ctrl-C was pressed.
    pub fn with_interrupt(self, label: impl Into<String>) -> Self {
        lock(&self.scripted).insert(label.into(), Outcome::Interrupt);
        self
    }

    /// Returns the recorded invocations in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        lock(&self.calls).clone()
    }

    /// Returns the number of recorded invocations.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl Clone for RecordingLauncher {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            scripted: Arc::clone(&self.scripted),
        }
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn launch(&self, invocation: &Invocation) -> Result<RunStatus, EnvError> {
        lock(&self.calls).push(invocation.clone());

        let outcome = lock(&self.scripted).get(&invocation.label).copied();
        match outcome {
            None => Ok(RunStatus::SUCCESS),
            Some(Outcome::Status(status)) => Ok(status),
            Some(Outcome::Interrupt) => Err(EnvError::Interrupted),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
