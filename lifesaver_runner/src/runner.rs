//! Pattern runner - plays the glider demo, then every discovered pattern.

use crate::summary::RunSummary;
use lifesaver_core::{discover_patterns, CoreError, PatternFile, RunConfig, Seed};
use lifesaver_env::{EnvError, Invocation, Launcher, RunStatus};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Label of the built-in demo invocation.
pub const DEMO_LABEL: &str = "glider";

/// Why a batch stopped early.
#[derive(Debug, Error)]
pub enum RunFailure {
    /// The simulator exited non-zero
    #[error("{label} failed with {status}")]
    Invocation { label: String, status: RunStatus },

    /// The search root could not be walked
    #[error(transparent)]
    Discovery(#[from] CoreError),

    /// The simulator could not be started, or the batch was interrupted
    #[error("{label}: {source}")]
    Launch {
        label: String,
        #[source]
        source: EnvError,
    },
}

impl RunFailure {
    /// Exit code the runner should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunFailure::Invocation { status, .. } => status.code(),
            RunFailure::Discovery(_) => 1,
            RunFailure::Launch { source, .. } => source.exit_code(),
        }
    }
}

/// A failed batch, with everything that ran before the failure.
#[derive(Debug, Error)]
#[error("{failure}")]
pub struct RunError {
    #[source]
    pub failure: RunFailure,
    pub summary: Box<RunSummary>,
}

impl RunError {
    /// Exit code the runner should terminate with.
    pub fn exit_code(&self) -> i32 {
        self.failure.exit_code()
    }
}

/// Runs the demo invocation followed by one invocation per pattern file.
///
/// Invocations are strictly sequential and the batch is fail-fast: the
/// first non-zero exit, launch error or discovery error ends it.
pub struct PatternRunner<L: Launcher> {
    config: RunConfig,
    launcher: L,
}

impl<L: Launcher> PatternRunner<L> {
    /// Creates a new pattern runner.
    pub fn new(config: RunConfig, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// The built-in glider demo. Never expanded.
    pub fn demo_invocation(&self) -> Invocation {
        let args = self.config.simulator_args(Seed::Glider, false);
        Invocation::new(self.config.simulator.clone(), args.to_args(), DEMO_LABEL)
    }

    /// Invocation for one pattern file, expanded to the display size.
    pub fn file_invocation(&self, pattern: &PatternFile) -> Invocation {
        let args = self
            .config
            .simulator_args(Seed::File(pattern.path.clone()), true);
        Invocation::new(self.config.simulator.clone(), args.to_args(), pattern.label())
    }

    /// Runs the batch.
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        info!(
            "Starting batch: root={} iterations={} launcher={}",
            self.config.root.display(),
            self.config.iterations,
            self.launcher.name()
        );

        let mut summary = RunSummary::new(&self.config);
        match self.run_batch(&mut summary).await {
            Ok(()) => {
                summary.finish(None);
                info!("Batch finished: {} invocation(s)", summary.invocation_count());
                Ok(summary)
            }
            Err(failure) => {
                error!("Batch aborted: {}", failure);
                summary.finish(Some(failure.to_string()));
                Err(RunError {
                    failure,
                    summary: Box::new(summary),
                })
            }
        }
    }

    async fn run_batch(&self, summary: &mut RunSummary) -> Result<(), RunFailure> {
        // Phase 1: demo must finish before discovery starts
        self.execute(self.demo_invocation(), summary).await?;

        // Phase 2: one invocation per pattern file
        let patterns = discover_patterns(&self.config.root)?;
        summary.patterns_found = Some(patterns.len());
        if patterns.is_empty() {
            warn!("No pattern files under {}", self.config.root.display());
        }

        for pattern in &patterns {
            self.execute(self.file_invocation(pattern), summary).await?;
        }
        Ok(())
    }

    async fn execute(
        &self,
        invocation: Invocation,
        summary: &mut RunSummary,
    ) -> Result<(), RunFailure> {
        info!("▶ {}", invocation.label);
        debug!("  {}", invocation.command_line());

        let status = self
            .launcher
            .launch(&invocation)
            .await
            .map_err(|source| RunFailure::Launch {
                label: invocation.label.clone(),
                source,
            })?;

        debug!("  {} -> {}", invocation.label, status);
        let label = invocation.label.clone();
        summary.record(invocation, status);

        if !status.success() {
            return Err(RunFailure::Invocation { label, status });
        }
        Ok(())
    }
}
