//! Per-file outcomes of removal and rename operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An error that occurred while operating on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// What happened to one removal candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Dry run; nothing was touched.
    Simulated,
    /// Moved into the backup folder.
    BackedUp { destination: PathBuf },
    /// Removed from disk.
    Deleted,
    /// The operation failed.
    Failed(OperationError),
}

impl FileOutcome {
    /// Check if this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// One attempted operation and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAction {
    /// Name of the file operated on.
    pub filename: String,
    /// What happened.
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileAction {
    /// Create a new action record.
    pub fn new(filename: impl Into<String>, outcome: FileOutcome) -> Self {
        Self {
            filename: filename.into(),
            outcome,
        }
    }
}
