//! Run reports and the JSON / text log writers.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use songsweep_analyze::ResolutionDecision;
use songsweep_core::{DedupeError, SongFile};

use crate::mode::RemovalMode;
use crate::stats::RemovalStats;

/// Log file name prefix; files are `<prefix>_<YYYYmmdd_HHMMSS>.{json,txt}`.
pub const LOG_FILE_PREFIX: &str = "song_cleanup_log";

/// The reported fields of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub quality_tag: String,
}

impl From<&SongFile> for FileEntry {
    fn from(song: &SongFile) -> Self {
        Self {
            filename: song.filename.clone(),
            size_bytes: song.size_bytes,
            quality_tag: song.quality_tag.to_string(),
        }
    }
}

/// The reported fields of one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionEntry {
    /// Title as written in the kept file's name.
    pub song_title: String,
    /// Artist as written in the kept file's name.
    pub artist: String,
    pub kept_file: FileEntry,
    pub removed_files: Vec<FileEntry>,
}

impl From<&ResolutionDecision> for DecisionEntry {
    fn from(decision: &ResolutionDecision) -> Self {
        Self {
            song_title: decision.keep.song_title.clone(),
            artist: decision.keep.artist.clone(),
            kept_file: FileEntry::from(&decision.keep),
            removed_files: decision.remove.iter().map(FileEntry::from).collect(),
        }
    }
}

/// Everything an external log writer needs about one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: DateTime<Local>,
    pub directory: PathBuf,
    pub mode: RemovalMode,
    pub stats: RemovalStats,
    pub decisions: Vec<DecisionEntry>,
}

impl RunReport {
    /// Build a report stamped with the current local time.
    pub fn new(
        directory: impl Into<PathBuf>,
        mode: RemovalMode,
        stats: RemovalStats,
        decisions: &[ResolutionDecision],
    ) -> Self {
        Self {
            timestamp: Local::now(),
            directory: directory.into(),
            mode,
            stats,
            decisions: decisions.iter().map(DecisionEntry::from).collect(),
        }
    }

    fn log_path(&self, dir: &Path, extension: &str) -> PathBuf {
        let stamp = self.timestamp.format("%Y%m%d_%H%M%S");
        dir.join(format!("{LOG_FILE_PREFIX}_{stamp}.{extension}"))
    }

    /// Render the human-readable text log.
    pub fn to_text(&self) -> String {
        let rule = "=".repeat(80);
        let mut out = format!(
            "Duplicate song cleanup log\n{rule}\nTime: {}\nDirectory: {}\nMode: {}\n{rule}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.directory.display(),
            self.mode,
        );

        out.push_str("Statistics:\n");
        for (label, value) in self.stats.entries() {
            out.push_str(&format!("  {label}: {value}\n"));
        }

        out.push_str(&format!("\nDetails:\n{rule}\n"));

        for (i, decision) in self.decisions.iter().enumerate() {
            out.push_str(&format!(
                "\n{}. {} - {}\n   Kept: {}\n",
                i + 1,
                decision.song_title,
                decision.artist,
                decision.kept_file.filename
            ));
            if !decision.removed_files.is_empty() {
                out.push_str("   Removed:\n");
                for file in &decision.removed_files {
                    out.push_str(&format!("     - {}\n", file.filename));
                }
            }
        }

        out
    }
}

/// Write the report as pretty-printed JSON into `dir`. Returns the file path.
pub fn write_json_log(dir: &Path, report: &RunReport) -> Result<PathBuf, DedupeError> {
    let path = report.log_path(dir, "json");
    let json = serde_json::to_string_pretty(report).map_err(|e| DedupeError::Io {
        path: path.clone(),
        source: e.into(),
    })?;
    fs::write(&path, json).map_err(|e| DedupeError::io(&path, e))?;
    tracing::info!(path = %path.display(), "wrote json log");
    Ok(path)
}

/// Write the report as plain text into `dir`. Returns the file path.
pub fn write_text_log(dir: &Path, report: &RunReport) -> Result<PathBuf, DedupeError> {
    let path = report.log_path(dir, "txt");
    fs::write(&path, report.to_text()).map_err(|e| DedupeError::io(&path, e))?;
    tracing::info!(path = %path.display(), "wrote text log");
    Ok(path)
}
