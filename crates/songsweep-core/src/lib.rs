//! Core types for songsweep.
//!
//! This crate provides the song record, its identity key, filename parsing
//! and the text normalization used for matching, plus run configuration
//! and the error type shared by the other crates.

mod config;
mod error;
mod normalize;
mod parse;
mod song;

pub use config::{AUDIO_EXTENSIONS, DEFAULT_BACKUP_BASE, DedupeConfig, DedupeConfigBuilder};
pub use error::{DedupeError, ScanWarning, WarningKind};
pub use normalize::normalize_text;
pub use parse::{QUALITY_TAGS, TITLE_ARTIST_SEPARATOR, parse_filename, split_extension, split_quality_tag};
pub use song::{AudioFormat, DuplicateGroup, MIB, SongFile, SongKey};
