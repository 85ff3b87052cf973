//! Aggregate counters for a removal run.

use serde::{Deserialize, Serialize};

use crate::operation::FileOutcome;

/// Counters produced by one executor run.
///
/// `skipped` is never incremented by the removal executor; it is kept so
/// reports line up with the prefix utilities, which do skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalStats {
    /// Files deleted, or counted as deleted in a dry run.
    pub deleted: usize,
    /// Files moved into the backup folder.
    pub backed_up: usize,
    /// Files intentionally left alone.
    pub skipped: usize,
    /// Files whose operation failed.
    pub errors: usize,
}

impl RemovalStats {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Simulated | FileOutcome::Deleted => self.deleted += 1,
            FileOutcome::BackedUp { .. } => self.backed_up += 1,
            FileOutcome::Failed(_) => self.errors += 1,
        }
    }

    /// Total outcomes counted.
    pub fn total(&self) -> usize {
        self.deleted + self.backed_up + self.skipped + self.errors
    }

    /// Check if every operation succeeded.
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    /// Counters as (label, value) pairs, in report order.
    pub fn entries(&self) -> [(&'static str, usize); 4] {
        [
            ("deleted", self.deleted),
            ("backed_up", self.backed_up),
            ("skipped", self.skipped),
            ("errors", self.errors),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationError;
    use std::path::PathBuf;

    #[test]
    fn test_record() {
        let mut stats = RemovalStats::new();
        stats.record(&FileOutcome::Simulated);
        stats.record(&FileOutcome::Deleted);
        stats.record(&FileOutcome::BackedUp {
            destination: PathBuf::from("/b/a.mp3"),
        });
        stats.record(&FileOutcome::Failed(OperationError::new(PathBuf::new(), "x")));

        assert_eq!(stats.deleted, 2);
        assert_eq!(stats.backed_up, 1);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total(), 4);
        assert!(!stats.is_success());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(RemovalStats::new()).unwrap();
        for key in ["deleted", "backed_up", "skipped", "errors"] {
            assert_eq!(json[key], 0);
        }
    }
}
