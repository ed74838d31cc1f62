//! The REPL session: turns commands into manager calls.

use filenav_core::{ClipboardMode, CoreResult, DirectoryManager, OperationReport, SelectionMode};

use crate::command::{self, Command, HELP};
use crate::render::{format_listing, format_status};

/// Whether the main loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What the next input line means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// A delete of this many entries waits for `y`.
    ConfirmDelete(usize),
}

pub struct Session {
    manager: DirectoryManager,
    confirm_delete: bool,
    mode: Mode,
}

impl Session {
    pub fn new(manager: DirectoryManager, confirm_delete: bool) -> Self {
        Self {
            manager,
            confirm_delete,
            mode: Mode::Normal,
        }
    }

    pub fn manager(&self) -> &DirectoryManager {
        &self.manager
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Handles one line of input, printing whatever it produces.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if let Mode::ConfirmDelete(count) = self.mode {
            self.mode = Mode::Normal;
            let answer = line.trim().to_lowercase();
            if answer == "y" || answer == "yes" {
                tracing::debug!("delete of {count} item(s) confirmed");
                report(self.manager.delete_selected().map(|_| ()));
            } else {
                println!("delete cancelled");
            }
            return Flow::Continue;
        }

        match command::parse(line) {
            Ok(Some(cmd)) => self.handle_command(cmd),
            Ok(None) => Flow::Continue,
            Err(e) => {
                eprintln!("error: {e}");
                Flow::Continue
            }
        }
    }

    /// Applies an executor report.
    pub fn complete(&mut self, report: OperationReport) {
        self.manager.operation_completed(report);
    }

    fn handle_command(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::List => print_lines(format_listing(&self.manager)),
            Command::ChangeDir(path) => report(self.manager.go_to(path)),
            Command::GoUp => report_moved(self.manager.go_up(), "already at the root"),
            Command::GoBack => self.back(),
            Command::GoForward => {
                report_moved(self.manager.go_forward(), "no next directory")
            }
            Command::Refresh => report(self.manager.refresh()),
            Command::ToggleSelect => self.manager.toggle_selection_mode(),
            Command::Mark(name) => self.mark(&name),
            Command::Open(name) => self.open(&name),
            Command::Copy => report(self.manager.stage_selected(ClipboardMode::Copy)),
            Command::Cut => report(self.manager.stage_selected(ClipboardMode::Cut)),
            Command::Paste(None) => report(self.manager.paste_here().map(|_| ())),
            Command::Paste(Some(dir)) => report(self.manager.paste(dir).map(|_| ())),
            Command::ClearClipboard => self.manager.clear_clipboard(),
            Command::DeleteSelected => self.delete(),
            Command::Status => print_lines(format_status(&self.manager)),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Backs out of selection mode first; only a browsing session walks history.
    fn back(&mut self) {
        if self.manager.selection_mode() == SelectionMode::Selecting {
            self.manager.toggle_selection_mode();
            return;
        }
        report_moved(self.manager.go_back(), "no previous directory");
    }

    fn mark(&mut self, name: &str) {
        if self.manager.selection_mode() != SelectionMode::Selecting {
            eprintln!("error: not in selection mode (use `select`)");
            return;
        }
        match self.manager.entry_named(name).cloned() {
            Some(entry) => {
                self.manager.toggle_entry(&entry);
            }
            None => eprintln!("error: no entry named `{name}`"),
        }
    }

    fn open(&mut self, name: &str) {
        let entry = match self.manager.entry_named(name).cloned() {
            Some(entry) => entry,
            None => {
                eprintln!("error: no entry named `{name}`");
                return;
            }
        };
        match self.manager.open_entry(&entry) {
            Ok(true) => {}
            Ok(false) => println!("nothing can open {name}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    fn delete(&mut self) {
        let selecting = self.manager.selection_mode() == SelectionMode::Selecting;
        let count = self.manager.selection().len();
        if self.confirm_delete && selecting && count > 0 {
            self.mode = Mode::ConfirmDelete(count);
            println!("delete {count} item(s)? [y/N]");
            return;
        }
        report(self.manager.delete_selected().map(|_| ()));
    }
}

fn report(result: CoreResult<()>) {
    if let Err(e) = result {
        eprintln!("error: {e}");
    }
}

fn report_moved(result: CoreResult<bool>, edge: &str) {
    match result {
        Ok(true) => {}
        Ok(false) => println!("{edge}"),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
