//! Observer contract between the directory manager and the UI.
//!
//! Notifications flow **Core → UI** and are delivered synchronously on the
//! interactive thread. Delegation callbacks flow the same way but hand
//! control to the UI: opening a file, and actually submitting a bulk
//! operation to the executor. The manager decides *when* an operation runs;
//! the UI owns the channel it runs on.

use std::path::Path;

use crate::fs::entry::DirectoryEntry;
use crate::nav::clipboard::ClipboardMode;
use crate::nav::selection::SelectionMode;
use crate::ops::request::{OperationReport, OperationRequest};

/// Implemented by the interactive layer. All notification methods default
/// to no-ops; the delegation callbacks default to declining.
pub trait DirectoryListener {
    /// The current directory was (re)listed.
    fn entries_changed(&mut self, _dir: &Path, _entries: &[DirectoryEntry]) {}

    /// The selection mode or the selected set changed.
    fn selection_mode_changed(&mut self, _mode: SelectionMode, _selected: usize) {}

    /// Entries were staged on or cleared from the clipboard.
    fn clipboard_changed(&mut self, _mode: ClipboardMode, _staged: usize) {}

    /// A dispatched operation finished and the listing was refreshed.
    fn operation_finished(&mut self, _report: &OperationReport) {}

    /// Something failed that has no caller to return an error to, such as
    /// the refresh that follows a completed operation.
    fn error(&mut self, _message: &str) {}

    /// Open a file in a built-in viewer. Returns `true` if handled.
    fn request_file_open(&mut self, _entry: &DirectoryEntry) -> bool {
        false
    }

    /// Fallback when no built-in viewer handled the file (e.g. hand it to
    /// the system opener). Returns `true` if handled.
    fn request_file_open_with(&mut self, _entry: &DirectoryEntry) -> bool {
        false
    }

    /// Submit a copy. Returns `true` if the request was accepted.
    fn copy_files(&mut self, _request: OperationRequest) -> bool {
        false
    }

    /// Submit a move. Returns `true` if the request was accepted.
    fn move_files(&mut self, _request: OperationRequest) -> bool {
        false
    }

    /// Submit a delete. Returns `true` if the request was accepted.
    fn delete_files(&mut self, _request: OperationRequest) -> bool {
        false
    }
}
