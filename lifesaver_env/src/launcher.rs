//! Launcher trait: the seam between the runner and the operating system.

use async_trait::async_trait;
use crate::error::EnvError;
use crate::types::{Invocation, RunStatus};

/// Executes one simulator invocation and reports how it ended.
///
/// # Implementations
///
/// - **Production**: `ProcessLauncher` - spawns a real child via `tokio::process`
/// - **Dry run / tests**: `RecordingLauncher` (in `lifesaver_runner`) - records
///   invocations and returns scripted statuses
///
/// # Blocking
///
/// `launch` must not return before the invocation has finished. The runner
/// relies on this to keep invocations strictly sequential.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Runs the invocation to completion.
    ///
    /// # Returns
    /// * `Ok(status)` - The process ran and exited (successfully or not)
    /// * `Err(EnvError::Spawn)` - The program could not be started
    /// * `Err(EnvError::Interrupted)` - The batch was interrupted while running
    async fn launch(&self, invocation: &Invocation) -> Result<RunStatus, EnvError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
