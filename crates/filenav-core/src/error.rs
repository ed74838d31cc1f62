//! Error types for `filenav-core`.
//!
//! Request-level failures return [`CoreResult<T>`], an alias for
//! `Result<T, CoreError>`. Failures of individual targets inside a bulk
//! operation never surface as a [`CoreError`]; they are recorded as
//! [`TargetError`]s in the operation result instead.

use std::path::PathBuf;

/// Unified error type for all request-level core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A directory could not be listed (missing, unreadable, or not a directory).
    #[error("cannot list {path}: {reason}")]
    Listing { path: PathBuf, reason: String },

    /// Paste was requested while the clipboard is empty.
    #[error("clipboard is empty")]
    NoClipboardContent,

    /// Tried to stage an empty set of entries on the clipboard.
    #[error("nothing to stage")]
    EmptyStage,

    /// The operation requires selection mode.
    #[error("not in selection mode")]
    NotSelecting,

    /// The operation requires at least one selected entry.
    #[error("no entries selected")]
    EmptySelection,

    /// The paste destination is not an existing directory.
    #[error("invalid destination: {0}")]
    InvalidDestination(PathBuf),

    /// A paste or delete is still running.
    #[error("another file operation is still in progress")]
    OperationInProgress,

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn listing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Listing {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias used throughout `filenav-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Why a single target of a bulk operation failed.
///
/// Stored as plain strings so results can be cloned and sent across threads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The destination entry already exists.
    #[error("destination already exists")]
    Collision,

    /// The source disappeared before it could be processed.
    #[error("source not found")]
    SourceNotFound,

    /// A directory cannot be copied or moved into itself.
    #[error("destination is inside the source directory")]
    DestinationInsideSource,

    /// Copy/move request without a usable destination directory.
    #[error("destination is not a directory")]
    InvalidDestination,

    /// The copy completed but the source could not be removed afterwards.
    #[error("copied, but removing the source failed: {0}")]
    SourceRemovalFailed(String),

    /// Any other read/write/permission failure.
    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for TargetError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::SourceNotFound,
            std::io::ErrorKind::AlreadyExists => Self::Collision,
            _ => Self::Io(err.to_string()),
        }
    }
}
