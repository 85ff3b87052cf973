//! Keep/remove resolution for duplicate groups.
//!
//! Each member gets a [`PriorityKey`] compared lexicographically on
//! (has quality tag, format rank, size). The highest key is kept; ties keep
//! discovery order.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use songsweep_core::{AudioFormat, DuplicateGroup, MIB, SongFile, SongKey};

/// Rank of a container format; higher is preferred.
pub fn format_rank(format: AudioFormat) -> u8 {
    match format {
        AudioFormat::Flac => 5,
        AudioFormat::Wav => 4,
        AudioFormat::M4a => 3,
        AudioFormat::Mp3 => 2,
        _ => 1,
    }
}

/// Ordering key for picking the copy to keep.
///
/// Field order is the precedence: any quality tag beats any format, and
/// format beats size. A tagged lossy file therefore outranks an untagged
/// lossless one, including for version tags like `_live` or `_demo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PriorityKey {
    /// Whether a quality tag was detected.
    pub tagged: bool,
    /// Rank from [`format_rank`].
    pub format_rank: u8,
    /// Size at scan time.
    pub size_bytes: u64,
}

impl PriorityKey {
    /// Compute the key of a song.
    pub fn of(song: &SongFile) -> Self {
        Self {
            tagged: song.has_quality_tag(),
            format_rank: format_rank(song.format()),
            size_bytes: song.size_bytes,
        }
    }

    /// Blended numeric score, for display only.
    ///
    /// `10000 * tagged + 1000 * rank + MiB`. Ordering always uses the key itself.
    pub fn score(&self) -> f64 {
        let tag = if self.tagged { 10_000.0 } else { 0.0 };
        tag + 1_000.0 * f64::from(self.format_rank) + self.size_bytes as f64 / MIB
    }
}

/// Outcome of resolving one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionDecision {
    /// Identity of the group.
    pub key: SongKey,
    /// The copy that stays.
    pub keep: SongFile,
    /// The other copies, highest priority first.
    pub remove: Vec<SongFile>,
}

impl ResolutionDecision {
    /// Number of files in the group.
    pub fn total_count(&self) -> usize {
        1 + self.remove.len()
    }

    /// Bytes that removal would reclaim.
    pub fn bytes_to_remove(&self) -> u64 {
        self.remove.iter().map(|s| s.size_bytes).sum()
    }
}

/// Picks the survivor of each duplicate group.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityResolver;

impl PriorityResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve one group. Returns `None` only for an empty group.
    pub fn resolve(&self, group: DuplicateGroup) -> Option<ResolutionDecision> {
        let DuplicateGroup { key, mut members } = group;

        // Stable: equal keys stay in discovery order.
        members.sort_by_key(|song| Reverse(PriorityKey::of(song)));

        let mut ranked = members.into_iter();
        let keep = ranked.next()?;
        let remove: Vec<SongFile> = ranked.collect();

        tracing::info!(
            key = %key,
            keep = %keep.filename,
            remove = remove.len(),
            "resolved group"
        );

        Some(ResolutionDecision { key, keep, remove })
    }

    /// Resolve every group, preserving group order.
    pub fn resolve_all(
        &self,
        groups: impl IntoIterator<Item = DuplicateGroup>,
    ) -> Vec<ResolutionDecision> {
        groups.into_iter().filter_map(|g| self.resolve(g)).collect()
    }
}
