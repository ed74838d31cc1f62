//! Multi-selection state and the browsing/selecting mode switch.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::fs::entry::DirectoryEntry;

/// What a tap on an entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Tapping opens directories and files.
    #[default]
    Browsing,
    /// Tapping toggles the entry in the selection.
    Selecting,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browsing => f.write_str("browsing"),
            Self::Selecting => f.write_str("selecting"),
        }
    }
}

/// Set of selected entries keyed by absolute path, plus the current mode.
///
/// Immutable: every transition returns a new store. Iteration is in path
/// order so requests built from a selection are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    mode: SelectionMode,
    selected: BTreeMap<PathBuf, DirectoryEntry>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips between browsing and selecting. Entering browsing mode clears
    /// the selection; entering selecting mode starts from an empty set.
    pub fn toggle_mode(&self) -> Self {
        match self.mode {
            SelectionMode::Browsing => Self {
                mode: SelectionMode::Selecting,
                selected: BTreeMap::new(),
            },
            SelectionMode::Selecting => Self::default(),
        }
    }

    /// Adds `entry` if absent, removes it if present. A no-op while browsing.
    pub fn toggle_entry(&self, entry: &DirectoryEntry) -> Self {
        if self.mode != SelectionMode::Selecting {
            return self.clone();
        }
        let mut selected = self.selected.clone();
        if selected.remove(entry.path()).is_none() {
            selected.insert(entry.path().to_path_buf(), entry.clone());
        }
        Self {
            mode: self.mode,
            selected,
        }
    }

    /// Back to browsing with nothing selected.
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Keeps only the selected entries whose path satisfies `keep`; the mode
    /// is left alone.
    pub fn retain(&self, mut keep: impl FnMut(&Path) -> bool) -> Self {
        let selected = self
            .selected
            .iter()
            .filter(|(path, _)| keep(path))
            .map(|(path, entry)| (path.clone(), entry.clone()))
            .collect();
        Self {
            mode: self.mode,
            selected,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == SelectionMode::Selecting
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.selected.contains_key(path)
    }

    /// Selected paths in path order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.selected.keys().cloned().collect()
    }
}
