//! Aggregate numbers over a set of decisions.

use serde::{Deserialize, Serialize};

use crate::resolver::ResolutionDecision;

/// What a run would touch, computed before anything is executed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Number of duplicate groups.
    pub group_count: usize,
    /// Files across all groups.
    pub total_files: usize,
    /// One survivor per group.
    pub files_to_keep: usize,
    /// Files slated for removal.
    pub files_to_remove: usize,
    /// Bytes those files occupy.
    pub bytes_to_remove: u64,
}

impl DuplicateReport {
    /// Summarize a set of decisions.
    pub fn from_decisions(decisions: &[ResolutionDecision]) -> Self {
        Self {
            group_count: decisions.len(),
            total_files: decisions.iter().map(|d| d.total_count()).sum(),
            files_to_keep: decisions.len(),
            files_to_remove: decisions.iter().map(|d| d.remove.len()).sum(),
            bytes_to_remove: decisions.iter().map(|d| d.bytes_to_remove()).sum(),
        }
    }

    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        self.group_count > 0
    }
}
