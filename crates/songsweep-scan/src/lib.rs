//! Directory listing and duplicate grouping for songsweep.
//!
//! Lists the audio files directly inside one directory, parses each name
//! into a [`SongFile`], and buckets the results by normalized identity.
//!
//! # Example
//!
//! ```rust,no_run
//! use songsweep_scan::{DedupeConfig, DirectoryScanner, DuplicateGrouper};
//!
//! let config = DedupeConfig::new("/path/to/music");
//! let result = DirectoryScanner::new().scan(&config).unwrap();
//! let groups = DuplicateGrouper::with_config(config).group(result.songs);
//!
//! for group in &groups {
//!     println!("{} ({} copies)", group.key, group.len());
//! }
//! ```

mod grouper;
mod scanner;

pub use grouper::DuplicateGrouper;
pub use scanner::{DirectoryScanner, ScanResult, resolve_root};

// Re-export core types for convenience
pub use songsweep_core::{DedupeConfig, DedupeError, DuplicateGroup, ScanWarning, SongFile, SongKey};
