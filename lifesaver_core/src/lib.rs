//! Lifesaver Core - configuration and discovery for the pattern runner
//!
//! 1. **Run configuration**: `RunConfig` with documented defaults
//! 2. **Simulator contract**: `SimulatorArgs` and its argv rendering
//! 3. **Pattern discovery**: recursive, case-insensitive `*.txt` walk

pub mod config;
pub mod error;
pub mod options;
pub mod pattern;

// Re-export key types for convenience
pub use config::{RunConfig, DEFAULT_DELAY_SECS, DEFAULT_ROOT, DEFAULT_SIMULATOR};
pub use error::CoreError;
pub use options::{ColorMode, IterationBound, Seed, SimulatorArgs, Surface};
pub use pattern::{discover_patterns, is_pattern_name, PatternFile};
