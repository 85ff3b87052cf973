//! Shuffle prefixes: a random letter plus `_` in front of a filename.
//!
//! Some players only sort by name; prefixing every file with a random letter
//! gives a cheap shuffle. Extensions are never touched, so prefixed files are
//! still picked up by the scanner.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use songsweep_core::{DedupeConfig, DedupeError, split_extension};
use songsweep_scan::DirectoryScanner;

use crate::operation::OperationError;

/// Check if a filename stem starts with a shuffle prefix like `A_`.
///
/// Requires at least one character after the prefix.
pub fn has_shuffle_prefix(stem: &str) -> bool {
    let mut chars = stem.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('_'), Some(_)) if letter.is_alphabetic()
    )
}

/// Remove the shuffle prefix from a filename, if it has one.
pub fn strip_shuffle_prefix(filename: &str) -> Option<&str> {
    let (stem, _) = split_extension(filename);
    if !has_shuffle_prefix(stem) {
        return None;
    }
    let letter_len = stem.chars().next().map_or(0, char::len_utf8);
    Some(&filename[letter_len + 1..])
}

/// What happened to one file during a prefix run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// Renamed to `new_name`.
    Renamed { new_name: String },
    /// Target name was taken; left as is.
    Skipped { new_name: String },
    /// The rename failed.
    Failed(OperationError),
}

/// Counters for a prefix run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixStats {
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Result of a prefix run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefixRun {
    pub stats: PrefixStats,
    /// (original filename, outcome) in processing order.
    pub actions: Vec<(String, RenameOutcome)>,
}

impl PrefixRun {
    fn record(&mut self, filename: &str, outcome: RenameOutcome) {
        match &outcome {
            RenameOutcome::Renamed { new_name } => {
                tracing::info!(from = filename, to = %new_name, "renamed");
                self.stats.renamed += 1;
            }
            RenameOutcome::Skipped { new_name } => {
                tracing::warn!(from = filename, to = %new_name, "target exists, skipped");
                self.stats.skipped += 1;
            }
            RenameOutcome::Failed(err) => {
                tracing::warn!(file = filename, error = %err.message, "rename failed");
                self.stats.errors += 1;
            }
        }
        self.actions.push((filename.to_string(), outcome));
    }
}

/// Give every unprefixed audio file in `config.root` a random `X_` prefix.
///
/// Files that already carry a prefix are left alone and not counted.
pub fn add_shuffle_prefixes<R: Rng + ?Sized>(
    config: &DedupeConfig,
    rng: &mut R,
) -> Result<PrefixRun, DedupeError> {
    let scan = DirectoryScanner::new().scan(config)?;
    let mut run = PrefixRun::default();

    for song in &scan.songs {
        let (stem, _) = split_extension(&song.filename);
        if has_shuffle_prefix(stem) {
            continue;
        }
        let letter = char::from(rng.gen_range(b'A'..=b'Z'));
        let new_name = format!("{letter}_{}", song.filename);
        let outcome = rename_in(&scan.root, &song.filename, new_name);
        run.record(&song.filename, outcome);
    }

    Ok(run)
}

/// Strip the `X_` prefix from every prefixed audio file in `config.root`.
///
/// A file whose original name is already taken is skipped.
pub fn strip_shuffle_prefixes(config: &DedupeConfig) -> Result<PrefixRun, DedupeError> {
    let scan = DirectoryScanner::new().scan(config)?;
    let mut run = PrefixRun::default();

    for song in &scan.songs {
        let Some(original) = strip_shuffle_prefix(&song.filename) else {
            tracing::debug!(file = %song.filename, "no prefix");
            continue;
        };
        let outcome = rename_in(&scan.root, &song.filename, original.to_string());
        run.record(&song.filename, outcome);
    }

    Ok(run)
}

fn rename_in(dir: &Path, from: &str, to: String) -> RenameOutcome {
    let source = dir.join(from);
    let target = dir.join(&to);

    if target.symlink_metadata().is_ok() {
        return RenameOutcome::Skipped { new_name: to };
    }

    match fs::rename(&source, &target) {
        Ok(()) => RenameOutcome::Renamed { new_name: to },
        Err(e) => RenameOutcome::Failed(OperationError::new(source, format!("Rename failed: {e}"))),
    }
}
