//! Run summary, printable as JSON for scripting.

use lifesaver_core::RunConfig;
use lifesaver_env::{Invocation, RunStatus};
use serde::{Deserialize, Serialize};

/// One finished invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub invocation: Invocation,
    pub status: RunStatus,
}

/// Everything attempted during one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Configuration the batch ran with
    pub config: RunConfig,

    /// Invocations that ran to completion, in order
    pub records: Vec<InvocationRecord>,

    /// Pattern files found under the root (`None` if discovery never ran)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns_found: Option<usize>,

    /// True only if every invocation exited 0
    pub passed: bool,

    /// Failure message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl RunSummary {
    /// Creates an empty summary for a batch.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            config: config.clone(),
            records: Vec::new(),
            patterns_found: None,
            passed: false,
            failure_reason: None,
        }
    }

    /// Records a finished invocation.
    pub fn record(&mut self, invocation: Invocation, status: RunStatus) {
        self.records.push(InvocationRecord { invocation, status });
    }

    /// Finalizes the summary.
    pub fn finish(&mut self, failure_reason: Option<String>) {
        self.passed = failure_reason.is_none();
        self.failure_reason = failure_reason;
    }

    /// Number of invocations that ran.
    pub fn invocation_count(&self) -> usize {
        self.records.len()
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
