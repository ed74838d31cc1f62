//! Listing presentation: hidden-entry filtering and ordering.

use std::cmp::Ordering;

use crate::fs::entry::DirectoryEntry;

/// Drops dot-prefixed entries unless `show_hidden` is set.
pub fn filter_hidden(entries: Vec<DirectoryEntry>, show_hidden: bool) -> Vec<DirectoryEntry> {
    if show_hidden {
        return entries;
    }
    entries.into_iter().filter(|e| !e.is_hidden()).collect()
}

/// Sorts by case-insensitive name, optionally with directories first.
///
/// Ties on the lowercased name fall back to the exact name so the order is
/// total and stable across refreshes.
pub fn sort_entries(mut entries: Vec<DirectoryEntry>, dirs_first: bool) -> Vec<DirectoryEntry> {
    entries.sort_by(|a, b| {
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != Ordering::Equal {
                return dir_cmp;
            }
        }
        a.name()
            .to_lowercase()
            .cmp(&b.name().to_lowercase())
            .then_with(|| a.name().cmp(b.name()))
    });
    entries
}
