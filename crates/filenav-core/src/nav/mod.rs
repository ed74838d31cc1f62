//! Navigation state for FileNav.
//!
//! Back/forward [`history::PathHistory`], the [`selection::SelectionStore`],
//! the [`clipboard::Clipboard`], and listing [`filter`]ing/sorting. All
//! three state types are immutable values owned by the
//! [`DirectoryManager`](crate::manager::DirectoryManager).

pub mod clipboard;
pub mod filter;
pub mod history;
pub mod selection;
