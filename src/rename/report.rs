use crate::scene::NodeId;
use serde::{Deserialize, Serialize};

/// One node the host refused to rename during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub node: NodeId,
    pub attempted: String,
    pub reason: String,
}

/// Outcome of one batch operation. Failures are recorded, not raised; the
/// batch always runs to completion.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    renamed: usize,
    skipped: usize,
    failures: Vec<RenameFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_renamed(&mut self) {
        self.renamed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failure(&mut self, node: NodeId, attempted: impl Into<String>, reason: impl ToString) {
        self.failures.push(RenameFailure {
            node,
            attempted: attempted.into(),
            reason: reason.to_string(),
        });
    }

    pub fn renamed(&self) -> usize {
        self.renamed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[RenameFailure] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// JSON form for front-ends that surface the outcome to the artist.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
