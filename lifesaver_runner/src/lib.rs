//! Lifesaver Pattern Runner
//!
//! Drives the Game of Life simulator as a screensaver slideshow:
//!
//! ```text
//!   glider demo ──▶ samples/a.txt ──▶ samples/sub/b.TXT ──▶ ...
//!   (--glider-board)   (--file ... --expand, one per pattern file)
//! ```
//!
//! Every invocation shares the same display, delay, iteration and
//! passthrough settings. The batch is strictly sequential and stops at the
//! first failure, propagating its exit code.
//!
//! # Usage
//!
//! ```ignore
//! use lifesaver_core::RunConfig;
//! use lifesaver_env::ProcessLauncher;
//! use lifesaver_runner::PatternRunner;
//!
//! let runner = PatternRunner::new(RunConfig::default(), ProcessLauncher::new()?);
//! let summary = runner.run().await?;
//! ```

mod recording;
mod runner;
mod summary;

pub use recording::RecordingLauncher;
pub use runner::{PatternRunner, RunError, RunFailure, DEMO_LABEL};
pub use summary::{InvocationRecord, RunSummary};
