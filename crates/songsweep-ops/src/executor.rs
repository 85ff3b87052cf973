//! Removal executor: applies resolution decisions to the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use songsweep_analyze::ResolutionDecision;
use songsweep_core::{DEFAULT_BACKUP_BASE, DedupeConfig, DedupeError, SongFile};

use crate::backup::{create_backup_folder, move_into};
use crate::mode::RemovalMode;
use crate::operation::{FileAction, FileOutcome, OperationError};
use crate::stats::RemovalStats;

/// Result of one executor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalRun {
    /// Mode the run used.
    pub mode: RemovalMode,
    /// Aggregate counters.
    pub stats: RemovalStats,
    /// Backup folder created for this run (backup mode only).
    pub backup_dir: Option<PathBuf>,
    /// Every attempted operation, in processing order.
    pub actions: Vec<FileAction>,
}

impl RemovalRun {
    /// Failed operations, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &OperationError> {
        self.actions.iter().filter_map(|a| match &a.outcome {
            FileOutcome::Failed(err) => Some(err),
            _ => None,
        })
    }
}

/// Applies decisions in one of the three [`RemovalMode`]s.
///
/// Runs synchronously on the calling thread. A failure on one file is
/// recorded and the batch continues with the next candidate.
#[derive(Debug, Clone)]
pub struct RemovalExecutor {
    mode: RemovalMode,
    backup_parent: PathBuf,
    backup_base_name: String,
}

impl RemovalExecutor {
    /// Create an executor that puts backup folders under `backup_parent`.
    pub fn new(mode: RemovalMode, backup_parent: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            backup_parent: backup_parent.into(),
            backup_base_name: DEFAULT_BACKUP_BASE.to_string(),
        }
    }

    /// Create an executor using the backup settings of `config`.
    pub fn from_config(config: &DedupeConfig, mode: RemovalMode) -> Self {
        Self {
            mode,
            backup_parent: config.backup_parent().to_path_buf(),
            backup_base_name: config.backup_base_name.clone(),
        }
    }

    /// Set the backup folder base name.
    pub fn with_backup_base_name(mut self, name: impl Into<String>) -> Self {
        self.backup_base_name = name.into();
        self
    }

    /// The mode this executor runs in.
    pub fn mode(&self) -> RemovalMode {
        self.mode
    }

    /// Process every decision's removal candidates.
    ///
    /// Only failing to create the backup folder aborts the run, and that
    /// happens before any file is touched. With no decisions no folder is
    /// created.
    pub fn execute(&self, decisions: &[ResolutionDecision]) -> Result<RemovalRun, DedupeError> {
        let backup_dir = match self.mode {
            RemovalMode::Backup if !decisions.is_empty() => Some(create_backup_folder(
                &self.backup_parent,
                &self.backup_base_name,
            )?),
            _ => None,
        };

        let mut stats = RemovalStats::new();
        let mut actions = Vec::new();

        for decision in decisions {
            tracing::info!(
                key = %decision.key,
                keep = %decision.keep.filename,
                "processing group"
            );

            for song in &decision.remove {
                let outcome = self.remove_one(song, backup_dir.as_deref());
                match &outcome {
                    FileOutcome::Failed(err) => {
                        tracing::warn!(file = %song.filename, error = %err.message, "removal failed");
                    }
                    other => {
                        tracing::info!(file = %song.filename, outcome = ?other, "{}", self.mode.verb());
                    }
                }
                stats.record(&outcome);
                actions.push(FileAction::new(song.filename.clone(), outcome));
            }
        }

        Ok(RemovalRun {
            mode: self.mode,
            stats,
            backup_dir,
            actions,
        })
    }

    fn remove_one(&self, song: &SongFile, backup_dir: Option<&Path>) -> FileOutcome {
        match (self.mode, backup_dir) {
            (RemovalMode::Simulate, _) => FileOutcome::Simulated,
            (RemovalMode::Backup, Some(dir)) => match move_into(&song.full_path, dir) {
                Ok(destination) => FileOutcome::BackedUp { destination },
                Err(e) => FileOutcome::Failed(OperationError::new(
                    song.full_path.clone(),
                    format!("Move failed: {e}"),
                )),
            },
            (RemovalMode::Backup, None) => FileOutcome::Failed(OperationError::new(
                song.full_path.clone(),
                "No backup folder",
            )),
            (RemovalMode::Permanent, _) => match fs::remove_file(&song.full_path) {
                Ok(()) => FileOutcome::Deleted,
                Err(e) => FileOutcome::Failed(OperationError::new(
                    song.full_path.clone(),
                    format!("Delete failed: {e}"),
                )),
            },
        }
    }
}
