//! Backup folder creation and moves into it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use songsweep_core::DedupeError;

/// Create a fresh backup folder `<base>_<n>` under `parent`.
///
/// Probes `n = 1, 2, ...` and takes the first name that does not exist, so a
/// run never writes into an earlier run's folder.
pub fn create_backup_folder(parent: &Path, base_name: &str) -> Result<PathBuf, DedupeError> {
    let mut n: u64 = 1;
    loop {
        let candidate = parent.join(format!("{base_name}_{n}"));
        if candidate.symlink_metadata().is_ok() {
            n += 1;
            continue;
        }
        // create_dir (not create_dir_all) fails if the name was taken meanwhile.
        match fs::create_dir(&candidate) {
            Ok(()) => {
                tracing::info!(path = %candidate.display(), "created backup folder");
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(DedupeError::io(candidate, e)),
        }
    }
}

/// Move `source` into `dir`, keeping its file name.
///
/// Fails rather than overwrite an existing file of the same name. Falls back
/// to copy-and-delete when the folder is on another filesystem.
pub fn move_into(source: &Path, dir: &Path) -> io::Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let destination = dir.join(file_name);

    if destination.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists in backup folder", file_name.to_string_lossy()),
        ));
    }

    match fs::rename(source, &destination) {
        Ok(()) => Ok(destination),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            let options = fs_extra::file::CopyOptions::new();
            fs_extra::file::move_file(source, &destination, &options).map_err(io::Error::other)?;
            Ok(destination)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_folder_is_numbered_one() {
        let temp = TempDir::new().unwrap();
        let dir = create_backup_folder(temp.path(), "Backup").unwrap();
        assert_eq!(dir, temp.path().join("Backup_1"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_skips_existing_names() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("Backup_1")).unwrap();
        fs::write(temp.path().join("Backup_2"), b"a file, not a dir").unwrap();
        fs::create_dir(temp.path().join("Backup_4")).unwrap();

        let dir = create_backup_folder(temp.path(), "Backup").unwrap();
        assert_eq!(dir, temp.path().join("Backup_3"));

        let next = create_backup_folder(temp.path(), "Backup").unwrap();
        assert_eq!(next, temp.path().join("Backup_5"));
    }

    #[test]
    fn test_missing_parent_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = create_backup_folder(&temp.path().join("nope"), "Backup");
        assert!(matches!(result, Err(DedupeError::NotFound { .. })));
    }

    #[test]
    fn test_move_into() {
        let temp = TempDir::new().unwrap();
        let dir = create_backup_folder(temp.path(), "Backup").unwrap();
        let source = temp.path().join("a.mp3");
        fs::write(&source, b"data").unwrap();

        let dest = move_into(&source, &dir).unwrap();

        assert!(!source.exists());
        assert_eq!(dest, dir.join("a.mp3"));
        assert_eq!(fs::read(&dest).unwrap(), b"data");
    }

    #[test]
    fn test_move_into_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let dir = create_backup_folder(temp.path(), "Backup").unwrap();
        fs::write(dir.join("a.mp3"), b"old").unwrap();
        let source = temp.path().join("a.mp3");
        fs::write(&source, b"new").unwrap();

        let err = move_into(&source, &dir).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(source.exists());
        assert_eq!(fs::read(dir.join("a.mp3")).unwrap(), b"old");
    }
}
