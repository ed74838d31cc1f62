//! The directory manager: single source of truth the UI observes.
//!
//! [`DirectoryManager`] owns the navigation history, the selection and the
//! clipboard, and lives on the interactive thread. Local commands mutate
//! state and notify the [`DirectoryListener`] synchronously. Bulk operations
//! are handed to the listener's delegation callbacks as
//! [`OperationRequest`]s; their completion comes back later through
//! [`DirectoryManager::operation_completed`].
//!
//! Reachable states are {Browsing, Selecting} × {clipboard empty, copy,
//! cut}; the manager starts in (Browsing, empty) and has no terminal state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::settings::GeneralConfig;
use crate::error::{CoreError, CoreResult};
use crate::event::DirectoryListener;
use crate::fs::entry::DirectoryEntry;
use crate::fs::{FileSystem, LocalFs};
use crate::nav::clipboard::{Clipboard, ClipboardMode};
use crate::nav::filter::{filter_hidden, sort_entries};
use crate::nav::history::PathHistory;
use crate::nav::selection::{SelectionMode, SelectionStore};
use crate::ops::request::{
    OperationKind, OperationReport, OperationRequest, Outcome, RequestId,
};

#[derive(Debug, Clone)]
struct PendingOperation {
    id: RequestId,
    kind: OperationKind,
    /// Clipboard content a paste consumes; `None` for deletes.
    staged: Option<Clipboard>,
}

/// Navigation, selection and clipboard state plus the rules for when bulk
/// operations may run.
pub struct DirectoryManager {
    fs: Arc<dyn FileSystem>,
    show_hidden: bool,
    dirs_first: bool,
    history: PathHistory,
    entries: Vec<DirectoryEntry>,
    selection: SelectionStore,
    clipboard: Clipboard,
    pending: Option<PendingOperation>,
    last_request: u64,
    listener: Option<Box<dyn DirectoryListener>>,
}

impl DirectoryManager {
    /// Creates a manager over `fs`. Nothing is listed until the first
    /// [`go_to`](Self::go_to).
    pub fn new(fs: Arc<dyn FileSystem>, config: &GeneralConfig) -> Self {
        Self {
            fs,
            show_hidden: config.show_hidden,
            dirs_first: config.sort_dir_first,
            history: PathHistory::new(config.history_depth),
            entries: Vec::new(),
            selection: SelectionStore::new(),
            clipboard: Clipboard::new(),
            pending: None,
            last_request: 0,
            listener: None,
        }
    }

    /// Creates a manager over the local disk.
    pub fn local(config: &GeneralConfig) -> Self {
        Self::new(Arc::new(LocalFs), config)
    }

    /// Installs `listener`, returning the one it replaces.
    pub fn set_listener(
        &mut self,
        listener: Box<dyn DirectoryListener>,
    ) -> Option<Box<dyn DirectoryListener>> {
        self.listener.replace(listener)
    }

    // --- queries ---

    pub fn current_dir(&self) -> Option<&Path> {
        self.history.current()
    }

    /// Entries of the current directory as of the last listing.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Looks up an entry of the current listing by file name.
    pub fn entry_named(&self, name: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selection_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn clipboard_mode(&self) -> ClipboardMode {
        self.clipboard.mode()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// The dispatched request still awaiting its report, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|p| p.id)
    }

    // --- navigation ---

    /// Lists `path` and makes it the current directory, discarding any
    /// forward history. Relative paths are resolved against the current
    /// directory.
    ///
    /// # Errors
    ///
    /// [`CoreError::Listing`] if `path` is not a readable directory; the
    /// history is left untouched.
    pub fn go_to(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let dir = self.resolve(path.as_ref())?;
        let entries = self.list(&dir)?;
        tracing::debug!("navigated to {}", dir.display());

        self.history = self.history.push(dir);
        self.entries = entries;
        self.notify_entries();
        Ok(())
    }

    /// Steps back in history. Returns `false` at the oldest entry.
    ///
    /// # Errors
    ///
    /// [`CoreError::Listing`] if the previous directory can no longer be
    /// listed; the cursor does not move.
    pub fn go_back(&mut self) -> CoreResult<bool> {
        let step = self.history.go_back();
        self.step(step)
    }

    /// Steps forward in history. Returns `false` at the newest entry.
    ///
    /// # Errors
    ///
    /// Same as [`go_back`](Self::go_back).
    pub fn go_forward(&mut self) -> CoreResult<bool> {
        let step = self.history.go_forward();
        self.step(step)
    }

    /// Navigates to the parent directory. Returns `false` at the root or
    /// before the first navigation.
    pub fn go_up(&mut self) -> CoreResult<bool> {
        let parent = match self.current_dir().and_then(Path::parent) {
            Some(parent) => parent.to_path_buf(),
            None => return Ok(false),
        };
        self.go_to(parent)?;
        Ok(true)
    }

    /// Re-lists the current directory without moving the history cursor.
    ///
    /// Selected paths that no longer exist are dropped from the selection.
    pub fn refresh(&mut self) -> CoreResult<()> {
        let dir = match self.current_dir() {
            Some(dir) => dir.to_path_buf(),
            None => return Ok(()),
        };
        self.entries = self.list(&dir)?;

        let pruned = self.selection.retain(|path| self.fs.exists(path));
        if pruned != self.selection {
            self.selection = pruned;
            self.notify_selection();
        }
        self.notify_entries();
        Ok(())
    }

    fn step(&mut self, step: Option<(PathHistory, PathBuf)>) -> CoreResult<bool> {
        let (history, dir) = match step {
            Some(step) => step,
            None => return Ok(false),
        };
        let entries = self.list(&dir)?;
        tracing::debug!("history moved to {}", dir.display());

        self.history = history;
        self.entries = entries;
        self.notify_entries();
        Ok(true)
    }

    // --- selection ---

    /// Flips between browsing and selecting. Leaving selection mode clears
    /// the selection but not the clipboard.
    pub fn toggle_selection_mode(&mut self) {
        self.selection = self.selection.toggle_mode();
        self.notify_selection();
    }

    /// Adds or removes `entry` from the selection. Returns `false` (and
    /// changes nothing) while browsing.
    pub fn toggle_entry(&mut self, entry: &DirectoryEntry) -> bool {
        if !self.selection.is_selecting() {
            return false;
        }
        self.selection = self.selection.toggle_entry(entry);
        self.notify_selection();
        true
    }

    /// Activates `entry` the way a tap does: toggles it while selecting,
    /// enters it if it is a directory, and otherwise asks the listener to
    /// open it (built-in viewer first, then the external fallback).
    ///
    /// Returns whether anything handled the entry.
    pub fn open_entry(&mut self, entry: &DirectoryEntry) -> CoreResult<bool> {
        if self.selection.is_selecting() {
            return Ok(self.toggle_entry(entry));
        }
        if entry.is_dir() {
            self.go_to(entry.path())?;
            return Ok(true);
        }
        let handled = match self.listener.as_deref_mut() {
            Some(listener) => {
                listener.request_file_open(entry) || listener.request_file_open_with(entry)
            }
            None => false,
        };
        Ok(handled)
    }

    // --- clipboard ---

    /// Stages `paths` for a later paste, replacing whatever was staged.
    ///
    /// Relative paths are taken relative to the current directory. Paths are
    /// not canonicalised, so a staged symlink stays a link.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyStage`] if `paths` is empty or `mode` is
    ///   [`ClipboardMode::Empty`].
    /// - [`CoreError::NotFound`] for a relative path before the first
    ///   navigation.
    pub fn stage(&mut self, paths: Vec<PathBuf>, mode: ClipboardMode) -> CoreResult<()> {
        let paths = paths
            .into_iter()
            .map(|path| self.absolute(path))
            .collect::<CoreResult<Vec<_>>>()?;
        self.clipboard = Clipboard::stage(paths, mode)?;
        tracing::debug!("staged {} path(s) for {mode}", self.clipboard.len());
        self.notify_clipboard();
        Ok(())
    }

    /// Stages the current selection and returns to browsing.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptySelection`] if nothing is selected.
    pub fn stage_selected(&mut self, mode: ClipboardMode) -> CoreResult<()> {
        if self.selection.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        self.stage(self.selection.paths(), mode)?;
        self.selection = self.selection.cleared();
        self.notify_selection();
        Ok(())
    }

    /// Empties the clipboard.
    pub fn clear_clipboard(&mut self) {
        self.clipboard = Clipboard::new();
        self.notify_clipboard();
    }

    /// Hands the staged entries to the listener as a copy (or, for a cut, a
    /// move) into `destination`.
    ///
    /// The clipboard stays staged until the executor reports that at least
    /// one target made it. Returns the request id, or `None` if the listener
    /// declined the request.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoClipboardContent`] if nothing is staged.
    /// - [`CoreError::OperationInProgress`] while another request runs.
    /// - [`CoreError::InvalidDestination`] if `destination` is not a directory.
    pub fn paste(&mut self, destination: impl AsRef<Path>) -> CoreResult<Option<RequestId>> {
        let kind = self
            .clipboard
            .operation_kind()
            .ok_or(CoreError::NoClipboardContent)?;
        self.ensure_idle()?;

        let destination = destination.as_ref();
        let dest = self
            .resolve(destination)
            .map_err(|_| CoreError::InvalidDestination(destination.to_path_buf()))?;
        if !self.fs.is_dir(&dest) {
            return Err(CoreError::InvalidDestination(dest));
        }

        let id = self.next_request_id();
        let targets = self.clipboard.paths();
        let request = match kind {
            OperationKind::Move => OperationRequest::move_to(id, targets, dest),
            _ => OperationRequest::copy(id, targets, dest),
        };
        Ok(self.dispatch(request))
    }

    /// Pastes into the current directory.
    pub fn paste_here(&mut self) -> CoreResult<Option<RequestId>> {
        let here = self
            .current_dir()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.paste(here)
    }

    // --- delete ---

    /// Hands the selected entries to the listener for deletion. Confirmation
    /// is the caller's business and must happen before this call.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotSelecting`] while browsing.
    /// - [`CoreError::EmptySelection`] if nothing is selected.
    /// - [`CoreError::OperationInProgress`] while another request runs.
    pub fn delete_selected(&mut self) -> CoreResult<Option<RequestId>> {
        if !self.selection.is_selecting() {
            return Err(CoreError::NotSelecting);
        }
        if self.selection.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        self.ensure_idle()?;

        let id = self.next_request_id();
        let request = OperationRequest::delete(id, self.selection.paths());
        Ok(self.dispatch(request))
    }

    // --- completion ---

    /// Applies the report of a dispatched request. Must be called on the
    /// interactive thread.
    ///
    /// A paste clears the clipboard unless every target failed or the
    /// clipboard was restaged while the paste ran; a fully
    /// successful delete returns to browsing. The listing is refreshed in
    /// every case before the listener hears about the result. Reports that
    /// do not match the outstanding request are ignored.
    pub fn operation_completed(&mut self, report: OperationReport) {
        let pending = match self.pending.take() {
            Some(pending) if pending.id == report.id => pending,
            other => {
                self.pending = other;
                tracing::warn!("ignoring report {}: not the outstanding request", report.id);
                return;
            }
        };

        match pending.kind {
            OperationKind::Copy | OperationKind::Move => {
                let consumed = pending.staged.as_ref() == Some(&self.clipboard);
                if report.result.any_succeeded() && consumed {
                    self.clear_clipboard();
                } else if !consumed {
                    tracing::debug!("clipboard restaged during {}, keeping it", report.id);
                }
            }
            OperationKind::Delete => {
                if report.result.outcome() == Outcome::Success {
                    self.selection = self.selection.cleared();
                    self.notify_selection();
                }
            }
        }

        let refresh_error = self.refresh().err().map(|e| {
            tracing::warn!("refresh after {} failed: {e}", report.id);
            e.to_string()
        });
        if let Some(listener) = self.listener.as_deref_mut() {
            if let Some(message) = refresh_error {
                listener.error(&message);
            }
            listener.operation_finished(&report);
        }
    }

    // --- internals ---

    fn dispatch(&mut self, request: OperationRequest) -> Option<RequestId> {
        let id = request.id();
        let kind = request.kind();
        let accepted = match self.listener.as_deref_mut() {
            Some(listener) => match kind {
                OperationKind::Copy => listener.copy_files(request),
                OperationKind::Move => listener.move_files(request),
                OperationKind::Delete => listener.delete_files(request),
            },
            None => false,
        };

        if accepted {
            tracing::debug!("{kind} {id} dispatched");
            let staged = match kind {
                OperationKind::Delete => None,
                _ => Some(self.clipboard.clone()),
            };
            self.pending = Some(PendingOperation { id, kind, staged });
            Some(id)
        } else {
            tracing::debug!("{kind} {id} declined by listener");
            None
        }
    }

    fn ensure_idle(&self) -> CoreResult<()> {
        match self.pending {
            Some(_) => Err(CoreError::OperationInProgress),
            None => Ok(()),
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId::new(self.last_request)
    }

    fn absolute(&self, path: PathBuf) -> CoreResult<PathBuf> {
        if path.is_absolute() {
            return Ok(path);
        }
        match self.current_dir() {
            Some(current) => Ok(current.join(path)),
            None => Err(CoreError::NotFound(path)),
        }
    }

    fn resolve(&self, path: &Path) -> CoreResult<PathBuf> {
        let joined = match self.current_dir() {
            Some(current) if path.is_relative() => current.join(path),
            _ => path.to_path_buf(),
        };
        self.fs.canonicalize(&joined)
    }

    fn list(&self, dir: &Path) -> CoreResult<Vec<DirectoryEntry>> {
        let entries = self.fs.list(dir)?;
        Ok(sort_entries(
            filter_hidden(entries, self.show_hidden),
            self.dirs_first,
        ))
    }

    fn notify_entries(&mut self) {
        if let (Some(listener), Some(dir)) = (self.listener.as_deref_mut(), self.history.current())
        {
            listener.entries_changed(dir, &self.entries);
        }
    }

    fn notify_selection(&mut self) {
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.selection_mode_changed(self.selection.mode(), self.selection.len());
        }
    }

    fn notify_clipboard(&mut self) {
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.clipboard_changed(self.clipboard.mode(), self.clipboard.len());
        }
    }
}
