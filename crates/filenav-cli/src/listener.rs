//! Console implementation of the directory listener.
//!
//! Prints notifications as they arrive and submits delegated operations to
//! the background executor. Text files are previewed inline; everything else
//! is handed to the system opener.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;

use filenav_core::{
    ClipboardMode, DirectoryEntry, DirectoryListener, FileOperationExecutor, OperationReport,
    OperationRequest, SelectionMode,
};

use crate::filetype::FileType;
use crate::render::{format_entry, format_report};

/// Lines shown when previewing a text file.
pub const PREVIEW_LINES: usize = 20;

pub struct ConsoleListener {
    executor: FileOperationExecutor,
}

impl ConsoleListener {
    pub fn new(executor: FileOperationExecutor) -> Self {
        Self { executor }
    }

    fn submit(&self, request: OperationRequest) -> bool {
        let id = self.executor.submit(request);
        println!("{id} started");
        true
    }
}

impl DirectoryListener for ConsoleListener {
    fn entries_changed(&mut self, dir: &Path, entries: &[DirectoryEntry]) {
        println!("{}: {} entries", dir.display(), entries.len());
        for entry in entries {
            println!("{}", format_entry(entry, false));
        }
    }

    fn selection_mode_changed(&mut self, mode: SelectionMode, selected: usize) {
        match mode {
            SelectionMode::Selecting => println!("[selecting: {selected} selected]"),
            SelectionMode::Browsing => println!("[browsing]"),
        }
    }

    fn clipboard_changed(&mut self, mode: ClipboardMode, staged: usize) {
        match mode {
            ClipboardMode::Empty => println!("[clipboard empty]"),
            _ => println!("[clipboard: {staged} item(s) to {mode}]"),
        }
    }

    fn operation_finished(&mut self, report: &OperationReport) {
        for line in format_report(report) {
            println!("{line}");
        }
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn request_file_open(&mut self, entry: &DirectoryEntry) -> bool {
        if FileType::from_extension(entry.extension()) != FileType::Text {
            return false;
        }
        match preview(entry.path(), PREVIEW_LINES) {
            Ok(lines) => {
                println!("--- {} ---", entry.name());
                for line in lines {
                    println!("{line}");
                }
                true
            }
            Err(e) => {
                tracing::warn!("preview of {} failed: {e}", entry.path().display());
                false
            }
        }
    }

    fn request_file_open_with(&mut self, entry: &DirectoryEntry) -> bool {
        let opener = system_opener();
        let spawned = Command::new(&opener)
            .arg(entry.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                reap(child, opener.clone());
                println!("opened {} with {opener}", entry.name());
                true
            }
            Err(e) => {
                tracing::warn!("failed to launch {opener}: {e}");
                println!("no application to open {}", entry.name());
                false
            }
        }
    }

    fn copy_files(&mut self, request: OperationRequest) -> bool {
        self.submit(request)
    }

    fn move_files(&mut self, request: OperationRequest) -> bool {
        self.submit(request)
    }

    fn delete_files(&mut self, request: OperationRequest) -> bool {
        self.submit(request)
    }
}

/// Reads at most `max` lines from the start of a text file.
pub fn preview(path: &Path, max: usize) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    reader.lines().take(max).collect()
}

/// Waits for `child` on a detached thread so it does not linger as a zombie.
fn reap(mut child: Child, opener: String) -> thread::JoinHandle<()> {
    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => tracing::warn!("{opener} exited with {status}"),
        Ok(_) => {}
        Err(e) => tracing::warn!("failed to wait for {opener}: {e}"),
    })
}

/// `$FILENAV_OPENER`, or the platform's default opener.
fn system_opener() -> String {
    std::env::var("FILENAV_OPENER").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "open".to_string()
        } else {
            "xdg-open".to_string()
        }
    })
}
