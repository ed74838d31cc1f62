//! Parsing of REPL input lines into commands.

use std::path::PathBuf;

use anyhow::bail;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current listing.
    List,
    /// Navigate to a directory (absolute or relative).
    ChangeDir(PathBuf),
    GoUp,
    GoBack,
    GoForward,
    Refresh,
    /// Toggle between browsing and selecting.
    ToggleSelect,
    /// Toggle one entry of the current listing, by name.
    Mark(String),
    /// Activate an entry, by name.
    Open(String),
    /// Stage the selection for copying.
    Copy,
    /// Stage the selection for moving.
    Cut,
    /// Paste into the given directory, or the current one.
    Paste(Option<PathBuf>),
    ClearClipboard,
    DeleteSelected,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  ls                 list the current directory
  cd <path>          go to a directory
  up                 go to the parent directory
  back | forward     move through history (back leaves selection mode first)
  refresh            re-read the current directory
  select             toggle selection mode
  mark <name>        toggle an entry while selecting
  open <name>        open a file or enter a directory
  copy | cut         stage the selection on the clipboard
  paste [dir]        paste the clipboard (default: here)
  clear              empty the clipboard
  delete             delete the selection
  status             show the browser state
  help               show this text
  quit               exit";

/// Parses a line. Returns `Ok(None)` for a blank line.
///
/// Names and paths take the rest of the line, so they may contain spaces.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "ls" => Command::List,
        "cd" => Command::ChangeDir(PathBuf::from(required(word, rest)?)),
        "up" => Command::GoUp,
        "back" => Command::GoBack,
        "forward" => Command::GoForward,
        "refresh" => Command::Refresh,
        "select" => Command::ToggleSelect,
        "mark" => Command::Mark(required(word, rest)?.to_string()),
        "open" => Command::Open(required(word, rest)?.to_string()),
        "copy" => Command::Copy,
        "cut" => Command::Cut,
        "paste" if rest.is_empty() => Command::Paste(None),
        "paste" => Command::Paste(Some(PathBuf::from(rest))),
        "clear" => Command::ClearClipboard,
        "delete" | "rm" => Command::DeleteSelected,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(Some(command))
}

fn required<'a>(command: &str, arg: &'a str) -> anyhow::Result<&'a str> {
    if arg.is_empty() {
        bail!("`{command}` needs an argument");
    }
    Ok(arg)
}
