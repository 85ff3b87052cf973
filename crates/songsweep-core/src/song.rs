//! Song file records and identity keys.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Bytes per MiB, used for display.
pub const MIB: f64 = 1024.0 * 1024.0;

/// Identity of a song: normalized title and artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongKey {
    /// Normalized title.
    pub title: String,
    /// Normalized artist (may be empty).
    pub artist: String,
}

impl SongKey {
    /// Create a new key from already-normalized parts.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// A key with an empty title never forms a duplicate group.
    pub fn is_groupable(&self) -> bool {
        !self.title.is_empty()
    }
}

impl std::fmt::Display for SongKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// Audio container format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioFormat {
    Flac,
    Wav,
    M4a,
    Mp3,
    Wma,
    Aac,
    Ogg,
    /// Anything else.
    Other,
}

impl AudioFormat {
    /// Map a lower-cased extension (with dot) to a format.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            ".flac" => Self::Flac,
            ".wav" => Self::Wav,
            ".m4a" => Self::M4a,
            ".mp3" => Self::Mp3,
            ".wma" => Self::Wma,
            ".aac" => Self::Aac,
            ".ogg" => Self::Ogg,
            _ => Self::Other,
        }
    }
}

/// One physical audio file as seen in a single scan pass.
///
/// Created once per scan and never mutated. The normalized fields are
/// always derived from the raw ones at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongFile {
    /// Name as seen in the directory listing.
    pub filename: String,
    /// Absolute path, used only for I/O.
    pub full_path: PathBuf,
    /// Raw title extracted from the filename.
    pub song_title: String,
    /// Raw artist extracted from the filename (may be empty).
    pub artist: String,
    /// Quality suffix such as `_eg`, empty when none was detected.
    pub quality_tag: CompactString,
    /// Normalized title (grouping key only).
    pub normalized_title: String,
    /// Normalized artist (grouping key only).
    pub normalized_artist: String,
    /// Lower-cased extension including the dot, empty if none.
    pub extension: CompactString,
    /// Size at scan time; 0 if the file vanished before it could be stat'ed.
    pub size_bytes: u64,
}

impl SongFile {
    /// The identity key of this file.
    pub fn key(&self) -> SongKey {
        SongKey::new(self.normalized_title.clone(), self.normalized_artist.clone())
    }

    /// Whether a quality tag was detected.
    pub fn has_quality_tag(&self) -> bool {
        !self.quality_tag.is_empty()
    }

    /// Container format from the extension.
    pub fn format(&self) -> AudioFormat {
        AudioFormat::from_extension(&self.extension)
    }

    /// Size in MiB.
    pub fn size_mib(&self) -> f64 {
        self.size_bytes as f64 / MIB
    }
}

/// Two or more files sharing a [`SongKey`].
///
/// Members keep discovery order. Resolution never relies on that order
/// beyond breaking exact ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Identity shared by all members.
    pub key: SongKey,
    /// Files in discovery order.
    pub members: Vec<SongFile>,
}

impl DuplicateGroup {
    /// Create a group from its key and members.
    pub fn new(key: SongKey, members: Vec<SongFile>) -> Self {
        Self { key, members }
    }

    /// Number of files in the group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total size of all members.
    pub fn total_bytes(&self) -> u64 {
        self.members.iter().map(|m| m.size_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_key_groupable() {
        assert!(SongKey::new("song", "").is_groupable());
        assert!(!SongKey::new("", "artist").is_groupable());
    }

    #[test]
    fn test_audio_format_from_extension() {
        assert_eq!(AudioFormat::from_extension(".flac"), AudioFormat::Flac);
        assert_eq!(AudioFormat::from_extension(".mp3"), AudioFormat::Mp3);
        assert_eq!(AudioFormat::from_extension(".opus"), AudioFormat::Other);
        assert_eq!(AudioFormat::from_extension(""), AudioFormat::Other);
    }
}
