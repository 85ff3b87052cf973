//! Error types for dedupe runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole run.
///
/// Per-file failures during removal are never represented here; they are
/// counted and reported by the executor instead.
#[derive(Debug, Error)]
pub enum DedupeError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target path is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Unknown removal mode selection.
    #[error("Invalid mode: {value} (expected simulate, backup or permanent)")]
    InvalidMode { value: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DedupeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Error reading a directory entry.
    ReadError,
    /// Error reading metadata; the file is recorded with size 0.
    MetadataError,
    /// Name is not valid UTF-8 and was converted lossily.
    LossyName,
}

/// Non-fatal warning encountered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a metadata error warning.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Metadata error: {error}"), WarningKind::MetadataError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_error_io() {
        let err = DedupeError::io(
            "/music",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, DedupeError::PermissionDenied { .. }));

        let err = DedupeError::io(
            "/music",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, DedupeError::NotFound { .. }));

        let err = DedupeError::io("/music", std::io::Error::other("disk on fire"));
        assert!(matches!(err, DedupeError::Io { .. }));
    }

    #[test]
    fn test_scan_warning_creation() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let warning = ScanWarning::metadata_error("/music/a.mp3", &err);
        assert_eq!(warning.kind, WarningKind::MetadataError);
        assert!(warning.message.contains("gone"));
    }

    #[test]
    fn test_invalid_mode_message() {
        let err = DedupeError::InvalidMode {
            value: "shred".to_string(),
        };
        assert!(err.to_string().contains("shred"));
    }
}
