//! Error types for configuration and pattern discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a run or discovering patterns.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Root directory missing, not a directory, or unreadable
    #[error("Cannot read pattern directory {}: {reason}", .path.display())]
    Discovery { path: PathBuf, reason: String },

    /// Iteration bound is neither `inf` nor a non-negative integer
    #[error("Invalid iteration bound '{0}' (expected 'inf' or a non-negative integer)")]
    InvalidIterations(String),

    /// Unknown universe shape
    #[error("Unknown surface: {0} (expected sphere, rectangle, infinite or torus)")]
    InvalidSurface(String),
}

impl CoreError {
    /// Creates a discovery error.
    pub fn discovery(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Discovery {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
