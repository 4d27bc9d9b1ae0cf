//! Lifesaver Environment Abstraction Layer
//!
//! This crate separates *what* the pattern runner wants to execute from
//! *how* it gets executed:
//! - **Production**: real child processes via `tokio::process`
//! - **Dry run / tests**: a recording launcher that never spawns anything
//!
//! The runner only ever sees the `Launcher` trait, so its ordering and
//! fail-fast behavior can be checked without a simulator installed.
//!
//! # Example
//!
//! ```ignore
//! use lifesaver_env::{Invocation, Launcher, ProcessLauncher};
//!
//! let launcher = ProcessLauncher::new()?;
//! let inv = Invocation::new("gameoflife.py", vec!["--glider-board".into()], "glider");
//! let status = launcher.launch(&inv).await?;
//! ```

mod error;
mod launcher;
mod process_impl;
mod types;

pub use error::EnvError;
pub use launcher::Launcher;
pub use process_impl::ProcessLauncher;
pub use types::{Invocation, RunStatus};
