//! Grouping of parsed songs by normalized identity.

use indexmap::IndexMap;

use songsweep_core::{DedupeConfig, DuplicateGroup, SongFile, SongKey};

/// Buckets songs by [`SongKey`] and keeps only real duplicates.
#[derive(Debug, Clone)]
pub struct DuplicateGrouper {
    config: DedupeConfig,
}

impl DuplicateGrouper {
    /// Create a grouper that accepts the default audio extensions.
    pub fn new() -> Self {
        Self {
            config: DedupeConfig::default(),
        }
    }

    /// Create a grouper using the extension set of `config`.
    pub fn with_config(config: DedupeConfig) -> Self {
        Self { config }
    }

    /// Group songs by identity.
    ///
    /// Every returned group has at least two members and a non-empty title.
    /// Groups appear in order of their first member's discovery; members keep
    /// discovery order. Songs with unrecognized extensions are ignored.
    pub fn group(&self, songs: impl IntoIterator<Item = SongFile>) -> Vec<DuplicateGroup> {
        let mut buckets: IndexMap<SongKey, Vec<SongFile>> = IndexMap::new();
        for song in songs {
            if !self.config.is_audio_extension(&song.extension) {
                continue;
            }
            buckets.entry(song.key()).or_default().push(song);
        }

        let groups: Vec<DuplicateGroup> = buckets
            .into_iter()
            .filter(|(key, members)| members.len() > 1 && key.is_groupable())
            .map(|(key, members)| DuplicateGroup::new(key, members))
            .collect();

        for group in &groups {
            tracing::debug!(key = %group.key, count = group.len(), "duplicate group");
        }

        groups
    }
}

impl Default for DuplicateGrouper {
    fn default() -> Self {
        Self::new()
    }
}
