//! FileNav core library: UI-agnostic file browsing logic.
//!
//! `filenav-core` owns the state a file browser presents: where the user is,
//! where they have been, what they have selected and what is staged for a
//! paste. Bulk copy/move/delete work runs off the interactive thread and
//! reports back over a channel. Any frontend (the `filenav` CLI among them)
//! drives it through [`DirectoryManager`] and observes it through
//! [`DirectoryListener`].
//!
//! # Modules
//!
//! - [`fs`]: [`DirectoryEntry`], listing and mutation primitives, the [`FileSystem`] seam.
//! - [`nav`]: [`PathHistory`], [`SelectionStore`], [`Clipboard`], listing filters.
//! - [`ops`]: Operation requests/results and the background [`FileOperationExecutor`].
//! - [`manager`]: [`DirectoryManager`], the state machine tying the above together.
//! - [`event`]: The [`DirectoryListener`] observer contract.
//! - [`config`]: TOML-based settings.
//! - [`error`]: [`CoreError`], [`TargetError`] and the [`CoreResult`] alias.

pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod manager;
pub mod nav;
pub mod ops;

pub use config::settings::{Config, GeneralConfig, LoggingConfig};
pub use error::{CoreError, CoreResult, TargetError};
pub use event::DirectoryListener;
pub use fs::entry::DirectoryEntry;
pub use fs::ops::read_directory;
pub use fs::{FileSystem, LocalFs};
pub use manager::DirectoryManager;
pub use nav::clipboard::{Clipboard, ClipboardMode};
pub use nav::filter::{filter_hidden, sort_entries};
pub use nav::history::PathHistory;
pub use nav::selection::{SelectionMode, SelectionStore};
pub use ops::executor::{execute, report_channel, FileOperationExecutor};
pub use ops::request::{
    OperationKind, OperationReport, OperationRequest, OperationResult, Outcome, RequestId,
    TargetFailure,
};
