//! Single-directory listing of audio files.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};

use songsweep_core::{
    DedupeConfig, DedupeError, ScanWarning, SongFile, WarningKind, parse_filename,
    split_extension,
};

/// Result of listing one directory.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Canonical directory that was listed.
    pub root: PathBuf,
    /// Parsed audio files, sorted by filename.
    pub songs: Vec<SongFile>,
    /// Number of non-audio files passed over.
    pub skipped_files: u64,
    /// Non-fatal problems hit along the way.
    pub warnings: Vec<ScanWarning>,
    /// Wall time of the listing.
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Total bytes of all listed audio files.
    pub fn total_bytes(&self) -> u64 {
        self.songs.iter().map(|s| s.size_bytes).sum()
    }
}

/// Lists audio files directly inside a directory.
///
/// Subdirectories are ignored; nothing is recursed into.
#[derive(Debug, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// List and parse every recognized audio file in `config.root`.
    pub fn scan(&self, config: &DedupeConfig) -> Result<ScanResult, DedupeError> {
        let start = Instant::now();
        let root = resolve_root(&config.root)?;

        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1)
            .max_depth(1)
            .sort(true);

        let mut songs = Vec::new();
        let mut skipped_files = 0u64;
        let mut warnings = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    tracing::warn!(path = %path.display(), error = %err, "unreadable entry");
                    warnings.push(ScanWarning::new(path, err.to_string(), WarningKind::ReadError));
                    continue;
                }
            };

            let path = entry.path();
            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if file_type.is_symlink() && !path.is_file() {
                continue;
            }

            let file_name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => {
                    let lossy = entry.file_name().to_string_lossy().to_string();
                    warnings.push(ScanWarning::new(
                        &path,
                        format!("Non UTF-8 name read as {lossy}"),
                        WarningKind::LossyName,
                    ));
                    lossy
                }
            };

            let (_, ext) = split_extension(&file_name);
            if !config.is_audio_extension(ext) {
                skipped_files += 1;
                continue;
            }

            let size = match std::fs::metadata(&path) {
                Ok(m) => m.len(),
                Err(err) => {
                    tracing::warn!(file = %file_name, error = %err, "could not stat file, using size 0");
                    warnings.push(ScanWarning::metadata_error(&path, &err));
                    0
                }
            };

            let song = parse_filename(&file_name, path, size);
            tracing::debug!(file = %song.filename, size = song.size_bytes, "found audio file");
            songs.push(song);
        }

        tracing::info!(
            root = %root.display(),
            songs = songs.len(),
            skipped = skipped_files,
            "directory listed"
        );

        Ok(ScanResult {
            root,
            songs,
            skipped_files,
            warnings,
            scan_duration: start.elapsed(),
        })
    }
}

/// Canonicalize a directory path, rejecting anything that is not a directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, DedupeError> {
    let root = path.canonicalize().map_err(|e| DedupeError::io(path, e))?;
    if !root.is_dir() {
        return Err(DedupeError::NotADirectory { path: root });
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_extensions_and_subdirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("Song - Artist.mp3"), b"abc").unwrap();
        fs::write(root.join("Song - Artist.FLAC"), b"abcdef").unwrap();
        fs::write(root.join("cover.jpg"), b"img").unwrap();
        fs::write(root.join("notes"), b"txt").unwrap();
        fs::create_dir(root.join("Album.mp3")).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/Nested - One.mp3"), b"x").unwrap();

        let result = DirectoryScanner::new()
            .scan(&DedupeConfig::new(root))
            .unwrap();

        let names: Vec<&str> = result.songs.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["Song - Artist.FLAC", "Song - Artist.mp3"]);
        assert_eq!(result.skipped_files, 2);
        assert_eq!(result.total_bytes(), 9);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_records_sizes_and_absolute_paths() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("A - B.ogg"), vec![0u8; 2048]).unwrap();

        let result = DirectoryScanner::new()
            .scan(&DedupeConfig::new(temp.path()))
            .unwrap();

        let song = &result.songs[0];
        assert_eq!(song.size_bytes, 2048);
        assert!(song.full_path.is_absolute());
        assert_eq!(song.full_path, result.root.join("A - B.ogg"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = DirectoryScanner::new()
            .scan(&DedupeConfig::new(temp.path().join("missing")))
            .unwrap_err();
        assert!(matches!(err, DedupeError::NotFound { .. }));
    }

    #[test]
    fn test_scan_rejects_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.mp3");
        fs::write(&file, b"x").unwrap();

        let err = DirectoryScanner::new()
            .scan(&DedupeConfig::new(&file))
            .unwrap_err();
        assert!(matches!(err, DedupeError::NotADirectory { .. }));
    }
}
