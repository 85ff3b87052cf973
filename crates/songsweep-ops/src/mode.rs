//! Removal modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use songsweep_core::DedupeError;

/// What to do with removal candidates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMode {
    /// Report only; the filesystem is left untouched.
    Simulate,
    /// Move candidates into a fresh backup folder.
    Backup,
    /// Delete candidates irreversibly.
    Permanent,
}

impl RemovalMode {
    /// Parse a mode name, mapping failures to [`DedupeError::InvalidMode`].
    pub fn parse(value: &str) -> Result<Self, DedupeError> {
        Self::from_str(value.trim()).map_err(|_| DedupeError::InvalidMode {
            value: value.to_string(),
        })
    }

    /// Whether this mode mutates the filesystem.
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Self::Simulate)
    }

    /// Past-tense verb used in progress lines.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Simulate => "Would remove",
            Self::Backup => "Moved to backup",
            Self::Permanent => "Deleted",
        }
    }
}
