//! Run configuration shared by every invocation in a batch.

use crate::options::{ColorMode, IterationBound, Seed, SimulatorArgs, Surface};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simulator program looked up on `PATH`.
pub const DEFAULT_SIMULATOR: &str = "gameoflife.py";

/// Pattern search root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "samples";

/// Seconds between generations.
pub const DEFAULT_DELAY_SECS: f64 = 0.07;

/// Immutable configuration for one batch.
///
/// Built once at start-up (by the CLI from flags and environment variables)
/// and applied uniformly to the demo and every file-driven invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Program to execute (default: `gameoflife.py`)
    pub simulator: String,

    /// Directory searched recursively for pattern files (default: `samples`)
    pub root: PathBuf,

    /// Generations per invocation (default: unbounded)
    pub iterations: IterationBound,

    /// Delay between generations in seconds (default: 0.07)
    pub delay_secs: f64,

    /// Formatted display (default: on)
    pub pretty: bool,

    /// Color output (default: on)
    pub color: ColorMode,

    /// Single-character cells (default: off)
    pub narrow: bool,

    /// Universe shape; `None` leaves the simulator default
    pub surface: Option<Surface>,

    /// Extra arguments appended verbatim to every invocation
    pub passthrough: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulator: DEFAULT_SIMULATOR.to_string(),
            root: PathBuf::from(DEFAULT_ROOT),
            iterations: IterationBound::Unbounded,
            delay_secs: DEFAULT_DELAY_SECS,
            pretty: true,
            color: ColorMode::On,
            narrow: false,
            surface: None,
            passthrough: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Creates a config with defaults and the given search root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Sets the simulator program.
    pub fn with_simulator(mut self, simulator: impl Into<String>) -> Self {
        self.simulator = simulator.into();
        self
    }

    /// Sets the iteration bound.
    pub fn with_iterations(mut self, iterations: IterationBound) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the passthrough arguments.
    pub fn with_passthrough(mut self, passthrough: Vec<String>) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Builds the simulator options for a seed.
    ///
    /// Everything except the seed and the expand flag comes from this
    /// config, so the demo and file runs share display, iteration and
    /// passthrough settings.
    pub fn simulator_args(&self, seed: Seed, expand: bool) -> SimulatorArgs {
        SimulatorArgs {
            pretty: self.pretty,
            color: self.color,
            narrow: self.narrow,
            surface: self.surface,
            delay_secs: self.delay_secs,
            seed,
            expand,
            iterations: self.iterations,
            passthrough: self.passthrough.clone(),
        }
    }
}
