//! Paths staged for a later paste.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::ops::request::OperationKind;

/// What a paste will do with the staged entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    /// Nothing staged.
    #[default]
    Empty,
    Copy,
    Cut,
}

impl fmt::Display for ClipboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Copy => f.write_str("copy"),
            Self::Cut => f.write_str("cut"),
        }
    }
}

/// Staged source paths and the mode they were staged with.
///
/// Independent of the selection: leaving selection mode does not touch the
/// clipboard. `mode == Empty` exactly when no paths are staged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    mode: ClipboardMode,
    entries: BTreeSet<PathBuf>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clipboard holding `entries` for `mode`. Whatever was staged
    /// before is replaced, never merged.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptyStage`] if `mode` is [`ClipboardMode::Empty`] or
    /// `entries` is empty.
    pub fn stage(
        entries: impl IntoIterator<Item = PathBuf>,
        mode: ClipboardMode,
    ) -> CoreResult<Self> {
        let entries: BTreeSet<PathBuf> = entries.into_iter().collect();
        if mode == ClipboardMode::Empty || entries.is_empty() {
            return Err(CoreError::EmptyStage);
        }
        Ok(Self { mode, entries })
    }

    pub fn mode(&self) -> ClipboardMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.mode == ClipboardMode::Empty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Staged paths in path order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().cloned().collect()
    }

    /// The operation a paste dispatches: copy for [`ClipboardMode::Copy`],
    /// move for [`ClipboardMode::Cut`].
    pub fn operation_kind(&self) -> Option<OperationKind> {
        match self.mode {
            ClipboardMode::Empty => None,
            ClipboardMode::Copy => Some(OperationKind::Copy),
            ClipboardMode::Cut => Some(OperationKind::Move),
        }
    }
}
