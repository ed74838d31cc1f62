//! Plain-text formatting of listings, reports and state.

use filenav_core::{DirectoryEntry, DirectoryManager, OperationReport};

use crate::filetype::FileType;

/// Formats one listing line. Selected entries get a `*` marker.
pub fn format_entry(entry: &DirectoryEntry, selected: bool) -> String {
    let marker = if selected { '*' } else { ' ' };
    if entry.is_dir() {
        return format!("{marker} {}/", entry.name());
    }
    let link = if entry.is_symlink() { " @" } else { "" };
    format!(
        "{marker} {}{link}  ({}, {})",
        entry.name(),
        FileType::from_extension(entry.extension()),
        format_size(entry.size())
    )
}

/// Formats the whole listing, one entry per line.
pub fn format_listing(manager: &DirectoryManager) -> Vec<String> {
    let selection = manager.selection();
    let mut lines = Vec::with_capacity(manager.entries().len() + 1);
    if let Some(dir) = manager.current_dir() {
        lines.push(format!("{}:", dir.display()));
    }
    if manager.entries().is_empty() {
        lines.push("  (empty)".to_string());
    }
    lines.extend(
        manager
            .entries()
            .iter()
            .map(|e| format_entry(e, selection.contains(e.path()))),
    );
    lines
}

/// Formats an operation report: a summary line, then one line per failure.
pub fn format_report(report: &OperationReport) -> Vec<String> {
    let result = &report.result;
    let mut lines = vec![format!(
        "{} {}: {} ({} ok, {} failed)",
        report.kind,
        report.id,
        result.outcome(),
        result.succeeded().len(),
        result.failed().len()
    )];
    lines.extend(
        result
            .failed()
            .iter()
            .map(|f| format!("  {}: {}", f.path.display(), f.error)),
    );
    lines
}

/// Formats the browser state for the `status` command.
pub fn format_status(manager: &DirectoryManager) -> Vec<String> {
    let dir = manager
        .current_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let pending = manager
        .pending_request()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    vec![
        format!("dir:       {dir}"),
        format!(
            "history:   back={} forward={}",
            manager.can_go_back(),
            manager.can_go_forward()
        ),
        format!(
            "mode:      {} ({} selected)",
            manager.selection_mode(),
            manager.selection().len()
        ),
        format!(
            "clipboard: {} ({} staged)",
            manager.clipboard_mode(),
            manager.clipboard().len()
        ),
        format!("pending:   {pending}"),
    ]
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
