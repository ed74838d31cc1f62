//! Navigation history with back/forward support.

use std::path::{Path, PathBuf};

/// Default number of directories remembered.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Immutable, bounded navigation history with a cursor.
///
/// Every mutation returns a **new** `PathHistory`, so a caller can build the
/// next state, try to list the directory it points at, and simply drop it
/// if listing fails. Pushing a path discards everything after the cursor
/// (same semantics as a web browser).
///
/// Invariant: `cursor < paths.len()` whenever the history is non-empty, and
/// `paths.len() <= max_depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathHistory {
    paths: Vec<PathBuf>,
    cursor: usize,
    max_depth: usize,
}

impl Default for PathHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl PathHistory {
    /// Creates an empty history remembering at most `max_depth` paths
    /// (clamped to at least one).
    pub fn new(max_depth: usize) -> Self {
        Self {
            paths: Vec::new(),
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Truncates everything after the cursor, appends `path` and moves the
    /// cursor onto it. The oldest entries are dropped once the depth bound
    /// is exceeded.
    pub fn push(&self, path: PathBuf) -> Self {
        let keep = if self.paths.is_empty() {
            0
        } else {
            self.cursor + 1
        };
        let mut paths: Vec<PathBuf> = self.paths[..keep].to_vec();
        paths.push(path);

        let overflow = paths.len().saturating_sub(self.max_depth);
        paths.drain(..overflow);

        Self {
            cursor: paths.len() - 1,
            paths,
            max_depth: self.max_depth,
        }
    }

    /// Steps the cursor back. Returns the new history and the path now under
    /// the cursor, or `None` at the oldest entry.
    pub fn go_back(&self) -> Option<(Self, PathBuf)> {
        if !self.can_go_back() {
            return None;
        }
        let cursor = self.cursor - 1;
        let path = self.paths[cursor].clone();
        Some((Self { cursor, ..self.clone() }, path))
    }

    /// Steps the cursor forward. Returns the new history and the path now
    /// under the cursor, or `None` at the newest entry.
    pub fn go_forward(&self) -> Option<(Self, PathBuf)> {
        if !self.can_go_forward() {
            return None;
        }
        let cursor = self.cursor + 1;
        let path = self.paths[cursor].clone();
        Some((Self { cursor, ..self.clone() }, path))
    }

    /// Returns `true` if the cursor is past the first entry.
    pub fn can_go_back(&self) -> bool {
        !self.paths.is_empty() && self.cursor > 0
    }

    /// Returns `true` if there are entries after the cursor.
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.paths.len()
    }

    /// The path under the cursor.
    pub fn current(&self) -> Option<&Path> {
        self.paths.get(self.cursor).map(PathBuf::as_path)
    }

    /// The cursor position, or `None` for an empty history.
    pub fn cursor(&self) -> Option<usize> {
        if self.paths.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
