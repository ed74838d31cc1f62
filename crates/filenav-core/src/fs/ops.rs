//! Directory listing and file mutation primitives.
//!
//! Listing failures are request-level and return [`CoreError::Listing`].
//! Mutations report per-target [`TargetError`]s so a bulk operation can
//! record them and carry on with the remaining targets.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult, TargetError};
use crate::fs::entry::DirectoryEntry;

/// Suffix of the hidden sibling a copy is written to before it is renamed
/// into place.
pub const PARTIAL_SUFFIX: &str = ".filenav-part";

/// Maximum recursion depth for tree copies and comparisons; guards against
/// pathological nesting.
const MAX_COPY_DEPTH: usize = 64;

/// Reads the immediate contents of a directory and returns them as
/// [`DirectoryEntry`] values.
///
/// The returned entries are **unsorted**. Entries that vanish or cannot be
/// stat'ed while the directory is being read are skipped.
///
/// # Errors
///
/// [`CoreError::Listing`] if the path does not exist, is not a directory,
/// or cannot be read.
///
/// # Examples
///
/// ```no_run
/// use filenav_core::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/home/user")).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path) -> CoreResult<Vec<DirectoryEntry>> {
    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::listing(path, "path not found"),
        std::io::ErrorKind::PermissionDenied => CoreError::listing(path, "permission denied"),
        _ => CoreError::listing(path, e),
    })?;
    if !meta.is_dir() {
        return Err(CoreError::listing(path, "not a directory"));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            CoreError::listing(path, "permission denied")
        } else {
            CoreError::listing(path, e)
        }
    })?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match dir_entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        entries.push(DirectoryEntry::new(dir_entry.path(), &metadata));
    }

    Ok(entries)
}

/// Returns `true` if something (file, directory or link, even dangling)
/// exists at `path`.
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Returns the hidden sibling path a copy of `dest` is staged under.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(dest.file_name().unwrap_or_default());
    name.push(PARTIAL_SUFFIX);
    dest.with_file_name(name)
}

/// Copies a file or directory tree to `dest`, never overwriting.
///
/// The data is first written to [`partial_path`]`(dest)` and renamed into
/// place once complete, so an interrupted copy never shows up under the
/// final name. A failed copy removes its partial output; a partial that
/// already exists is left alone and fails the copy.
///
/// # Errors
///
/// - [`TargetError::Collision`] if `dest` already exists.
/// - [`TargetError::SourceNotFound`] if `src` does not exist.
/// - [`TargetError::DestinationInsideSource`] if `dest` lies under `src`.
/// - [`TargetError::Io`] for any other failure.
pub fn copy_entry(src: &Path, dest: &Path) -> Result<(), TargetError> {
    let meta = std::fs::symlink_metadata(src).map_err(TargetError::from)?;
    if entry_exists(dest) {
        return Err(TargetError::Collision);
    }
    if meta.is_dir() && dest.starts_with(src) {
        return Err(TargetError::DestinationInsideSource);
    }

    // Never touch a staging entry this call did not create.
    let staging = partial_path(dest);
    if entry_exists(&staging) {
        return Err(TargetError::Io(format!(
            "partial copy {} is in the way",
            staging.display()
        )));
    }

    if let Err(e) = copy_tree(src, &staging, 0) {
        discard_staging(&staging);
        return Err(e);
    }

    if entry_exists(dest) {
        discard_staging(&staging);
        return Err(TargetError::Collision);
    }
    std::fs::rename(&staging, dest).map_err(|e| {
        discard_staging(&staging);
        TargetError::Io(e.to_string())
    })
}

fn discard_staging(staging: &Path) {
    if let Err(e) = remove_tree(staging) {
        tracing::warn!("failed to clean up {}: {e}", staging.display());
    }
}

fn copy_tree(src: &Path, dest: &Path, depth: usize) -> Result<(), TargetError> {
    if depth > MAX_COPY_DEPTH {
        return Err(TargetError::Io(format!(
            "maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"
        )));
    }

    let meta = std::fs::symlink_metadata(src)?;
    if meta.is_symlink() {
        // Copy symlink as symlink rather than following it
        let link_target = std::fs::read_link(src)?;
        #[cfg(unix)]
        std::os::unix::fs::symlink(&link_target, dest)?;
        #[cfg(not(unix))]
        {
            let _ = link_target;
            std::fs::copy(src, dest)?;
        }
    } else if meta.is_dir() {
        std::fs::create_dir(dest)?;
        for entry in std::fs::read_dir(src)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()), depth + 1)?;
        }
    } else {
        std::fs::copy(src, dest)?;
    }
    Ok(())
}

/// Checks that `dest` is a complete copy of `src`: same shape, same names,
/// same file sizes and symlink targets.
///
/// File contents are not compared; a same-size corruption passes.
///
/// # Errors
///
/// [`TargetError::Io`] describing the first mismatch found.
pub fn verify_copy(src: &Path, dest: &Path) -> Result<(), TargetError> {
    verify_tree(src, dest, 0)
}

fn verify_tree(src: &Path, dest: &Path, depth: usize) -> Result<(), TargetError> {
    if depth > MAX_COPY_DEPTH {
        return Err(TargetError::Io("copy verification nested too deep".to_string()));
    }
    let mismatch = |what: &str| {
        Err(TargetError::Io(format!(
            "copy verification failed at {}: {what}",
            dest.display()
        )))
    };

    let src_meta = std::fs::symlink_metadata(src)?;
    let dest_meta = match std::fs::symlink_metadata(dest) {
        Ok(m) => m,
        Err(_) => return mismatch("missing"),
    };

    if src_meta.is_symlink() {
        if !dest_meta.is_symlink() || std::fs::read_link(src)? != std::fs::read_link(dest)? {
            return mismatch("symlink differs");
        }
        return Ok(());
    }
    if src_meta.is_dir() != dest_meta.is_dir() {
        return mismatch("type differs");
    }
    if !src_meta.is_dir() {
        if src_meta.len() != dest_meta.len() {
            return mismatch("size differs");
        }
        return Ok(());
    }

    let mut src_names = child_names(src)?;
    let mut dest_names = child_names(dest)?;
    src_names.sort();
    dest_names.sort();
    if src_names != dest_names {
        return mismatch("directory contents differ");
    }
    for name in &src_names {
        verify_tree(&src.join(name), &dest.join(name), depth + 1)?;
    }
    Ok(())
}

fn child_names(dir: &Path) -> std::io::Result<Vec<OsString>> {
    std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}

/// Renames `src` to `dest` in one step, refusing to replace an existing
/// entry.
///
/// Fails across filesystems; callers fall back to copy + remove.
pub fn rename_entry(src: &Path, dest: &Path) -> std::io::Result<()> {
    if entry_exists(dest) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        ));
    }
    std::fs::rename(src, dest)
}

/// Deletes a file, symlink or directory tree.
///
/// # Errors
///
/// - [`TargetError::SourceNotFound`] if `path` does not exist.
/// - [`TargetError::Io`] for any I/O failure during deletion.
pub fn remove_tree(path: &Path) -> Result<(), TargetError> {
    // symlink_metadata: never follow a link into its target
    let meta = std::fs::symlink_metadata(path)?;

    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
