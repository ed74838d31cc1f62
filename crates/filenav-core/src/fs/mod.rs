//! File system abstractions for FileNav.
//!
//! [`entry::DirectoryEntry`] is the snapshot type returned by listings and
//! [`ops`] holds the listing and mutation primitives. The [`FileSystem`]
//! trait is the seam the directory manager and the operation executor talk
//! to; [`LocalFs`] implements it on top of [`ops`].

pub mod entry;
pub mod ops;

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult, TargetError};
use crate::fs::entry::DirectoryEntry;

/// Everything the core needs from a filesystem.
///
/// Implementations must be shareable with the background worker, hence
/// `Send + Sync`.
pub trait FileSystem: Send + Sync {
    /// Lists the immediate children of `dir`, unsorted.
    fn list(&self, dir: &Path) -> CoreResult<Vec<DirectoryEntry>>;

    /// Resolves `path` to an absolute path with `..` and symlinks collapsed.
    fn canonicalize(&self, path: &Path) -> CoreResult<PathBuf>;

    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory (following links).
    fn is_dir(&self, path: &Path) -> bool;

    /// Single-step rename; fails across filesystems.
    fn rename(&self, src: &Path, dest: &Path) -> std::io::Result<()>;

    /// Copies a file or tree to `dest` without overwriting.
    fn copy(&self, src: &Path, dest: &Path) -> Result<(), TargetError>;

    /// Checks that `dest` is a complete copy of `src`.
    fn verify_copy(&self, src: &Path, dest: &Path) -> Result<(), TargetError>;

    /// Removes a file or tree.
    fn remove(&self, path: &Path) -> Result<(), TargetError>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list(&self, dir: &Path) -> CoreResult<Vec<DirectoryEntry>> {
        ops::read_directory(dir)
    }

    fn canonicalize(&self, path: &Path) -> CoreResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::listing(path, "path not found"),
            std::io::ErrorKind::PermissionDenied => CoreError::listing(path, "permission denied"),
            _ => CoreError::listing(path, e),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        ops::entry_exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn rename(&self, src: &Path, dest: &Path) -> std::io::Result<()> {
        ops::rename_entry(src, dest)
    }

    fn copy(&self, src: &Path, dest: &Path) -> Result<(), TargetError> {
        ops::copy_entry(src, dest)
    }

    fn verify_copy(&self, src: &Path, dest: &Path) -> Result<(), TargetError> {
        ops::verify_copy(src, dest)
    }

    fn remove(&self, path: &Path) -> Result<(), TargetError> {
        ops::remove_tree(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn local_fs_canonicalize_collapses_parent_refs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        let messy = tmp.path().join("a").join("..").join("a");

        let clean = LocalFs.canonicalize(&messy).unwrap();

        assert_eq!(clean, fs::canonicalize(tmp.path().join("a")).unwrap());
    }

    #[test]
    fn local_fs_canonicalize_missing_is_listing_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFs.canonicalize(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, CoreError::Listing { .. }));
    }

    #[test]
    fn local_fs_exists_and_is_dir() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "").unwrap();

        assert!(LocalFs.exists(&file));
        assert!(!LocalFs.is_dir(&file));
        assert!(LocalFs.is_dir(tmp.path()));
        assert!(!LocalFs.exists(&tmp.path().join("nothing")));
    }
}
