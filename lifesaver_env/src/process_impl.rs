//! Production implementation of Launcher using Tokio child processes.

use crate::error::EnvError;
use crate::types::{Invocation, RunStatus};
use crate::Launcher;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[cfg(unix)]
type InterruptStream = tokio::signal::unix::Signal;

#[cfg(windows)]
type InterruptStream = tokio::signal::windows::CtrlC;

/// How long to keep listening for a SIGINT after the child has exited.
///
/// The signal goes to the whole process group. The child can exit before the
/// runtime has dispatched our copy of it.
const INTERRUPT_GRACE: Duration = Duration::from_millis(50);

fn interrupt_stream() -> std::io::Result<InterruptStream> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::interrupt())
    }
    #[cfg(windows)]
    {
        tokio::signal::windows::ctrl_c()
    }
}

/// Production launcher backed by real child processes.
///
/// The child inherits stdin/stdout/stderr so the simulator can draw
/// directly on the terminal.
///
/// One interrupt listener is registered when the launcher is built and kept
/// for its whole lifetime. A Ctrl-C that arrives between two launches
/// (during discovery, or while a child is exiting) is buffered and stops the
/// next launch before anything is spawned.
pub struct ProcessLauncher {
    /// `None` lets the child decide what Ctrl-C means
    interrupts: Option<Mutex<InterruptStream>>,
}

impl ProcessLauncher {
    /// Creates a launcher that aborts the batch on Ctrl-C.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn new() -> Result<Self, EnvError> {
        let stream = interrupt_stream().map_err(EnvError::Signal)?;
        Ok(Self {
            interrupts: Some(Mutex::new(stream)),
        })
    }

    /// Creates a launcher that ignores Ctrl-C.
    pub fn without_interrupts() -> Self {
        Self { interrupts: None }
    }
}

/// Returns true if an interrupt arrives within `window`.
async fn interrupted_within(stream: &mut InterruptStream, window: Duration) -> bool {
    matches!(tokio::time::timeout(window, stream.recv()).await, Ok(Some(())))
}

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn launch(&self, invocation: &Invocation) -> Result<RunStatus, EnvError> {
        let mut interrupts = match &self.interrupts {
            Some(stream) => Some(stream.lock().await),
            None => None,
        };

        if let Some(stream) = interrupts.as_deref_mut() {
            if interrupted_within(stream, Duration::ZERO).await {
                warn!("Interrupted before starting {}", invocation.label);
                return Err(EnvError::Interrupted);
            }
        }

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EnvError::spawn(invocation.program.clone(), e))?;

        debug!("Spawned {} (pid={:?})", invocation.label, child.id());

        let Some(stream) = interrupts.as_deref_mut() else {
            let status = child.wait().await.map_err(EnvError::Wait)?;
            return Ok(RunStatus::from(status));
        };

        // The simulator swallows its own KeyboardInterrupt and exits 0, so
        // the signal has to be observed here for the batch to stop.
        tokio::select! {
            biased;
            _ = stream.recv() => {
                warn!("Interrupted while running {}", invocation.label);
                if let Err(e) = child.kill().await {
                    debug!("Child already gone: {}", e);
                }
                Err(EnvError::Interrupted)
            }
            status = child.wait() => {
                let status = status.map_err(EnvError::Wait)?;
                if interrupted_within(stream, INTERRUPT_GRACE).await {
                    warn!("Interrupted as {} exited ({:?})", invocation.label, status.code());
                    return Err(EnvError::Interrupted);
                }
                Ok(RunStatus::from(status))
            }
        }
    }

    fn name(&self) -> &'static str {
        "process"
    }
}
