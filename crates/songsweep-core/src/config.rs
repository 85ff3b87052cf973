//! Run configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Audio extensions recognized by the scanner, lower-case with the dot.
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".flac", ".wma", ".m4a", ".wav", ".aac", ".ogg"];

/// Default base name for backup folders. Folders are named `<base>_<n>`.
pub const DEFAULT_BACKUP_BASE: &str = "Deleted_Songs_Backup";

/// Configuration for a dedupe run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DedupeConfig {
    /// Directory to scan (not recursed into).
    pub root: PathBuf,

    /// Recognized audio extensions.
    #[builder(default = "default_extensions()")]
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Base name used when probing for a fresh backup folder.
    #[builder(default = "DEFAULT_BACKUP_BASE.to_string()")]
    #[serde(default = "default_backup_base")]
    pub backup_base_name: String,

    /// Where backup folders are created (None = inside `root`).
    #[builder(default)]
    #[serde(default)]
    pub backup_parent: Option<PathBuf>,
}

fn default_extensions() -> Vec<String> {
    AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_backup_base() -> String {
    DEFAULT_BACKUP_BASE.to_string()
}

impl DedupeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if let Some(ref base) = self.backup_base_name {
            if base.trim().is_empty() {
                return Err("Backup base name cannot be empty".to_string());
            }
            if base.contains(['/', '\\']) {
                return Err("Backup base name cannot contain path separators".to_string());
            }
        }
        if let Some(ref extensions) = self.extensions {
            if let Some(bad) = extensions.iter().find(|e| !e.starts_with('.')) {
                return Err(format!("Extension must start with a dot: {bad}"));
            }
        }
        Ok(())
    }
}

impl DedupeConfig {
    /// Create a new config builder.
    pub fn builder() -> DedupeConfigBuilder {
        DedupeConfigBuilder::default()
    }

    /// Create a config with defaults for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: default_extensions(),
            backup_base_name: default_backup_base(),
            backup_parent: None,
        }
    }

    /// Check whether an extension (with dot, any case) is a recognized audio extension.
    pub fn is_audio_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Directory in which backup folders are created.
    pub fn backup_parent(&self) -> &Path {
        self.backup_parent.as_deref().unwrap_or(&self.root)
    }
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
