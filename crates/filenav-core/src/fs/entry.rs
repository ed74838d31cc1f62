//! Directory entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// A read-only snapshot of a single file or directory.
///
/// Entries are re-derived on every listing and never cached across
/// refreshes. Directory sizes are reported as `0`.
///
/// # Examples
///
/// ```no_run
/// use filenav_core::DirectoryEntry;
/// use std::fs;
///
/// let metadata = fs::symlink_metadata("Cargo.toml").unwrap();
/// let entry = DirectoryEntry::new("Cargo.toml".into(), &metadata);
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert_eq!(entry.extension(), "toml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: String,
    extension: String,
    size: u64,
    modified: Option<SystemTime>,
    is_dir: bool,
    is_hidden: bool,
    is_symlink: bool,
}

impl DirectoryEntry {
    /// Creates a new entry from a path and its (non-following) metadata.
    ///
    /// Symbolic links are resolved once so that a link to a directory
    /// reports `is_dir() == true`; dangling links are treated as files.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let is_symlink = metadata.is_symlink();
        let resolved = if is_symlink {
            std::fs::metadata(&path).ok()
        } else {
            None
        };
        let meta = resolved.as_ref().unwrap_or(metadata);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_hidden = name.starts_with('.');
        let is_dir = meta.is_dir();

        Self {
            path,
            name,
            extension,
            size: if is_dir { 0 } else { meta.len() },
            modified: meta.modified().ok(),
            is_dir,
            is_hidden,
            is_symlink,
        }
    }

    /// Returns the absolute path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the extension without the leading dot, or `""`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `true` if this entry is a directory (or a link to one).
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}
