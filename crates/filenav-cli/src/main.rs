//! FileNav: a line-oriented file browser.
//!
//! This binary loads the configuration, routes logs to a file, and runs a
//! REPL that drives the core's directory manager. Bulk operations run on
//! tokio's blocking pool and their reports are fed back between commands.

mod command;
mod filetype;
mod listener;
mod render;
mod session;

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use filenav_core::{
    report_channel, Config, CoreError, DirectoryManager, FileOperationExecutor, LocalFs,
    LoggingConfig,
};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::listener::ConsoleListener;
use crate::session::{Flow, Mode, Session};

/// Command-line arguments: `filenav [--config <path>] [start-dir]`.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    start_dir: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            _ if arg.starts_with('-') => anyhow::bail!("unknown option `{arg}`"),
            _ if parsed.start_dir.is_none() => parsed.start_dir = Some(PathBuf::from(&arg)),
            _ => anyhow::bail!("unexpected argument `{arg}`"),
        }
    }
    Ok(parsed)
}

fn default_config_path() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("filenav")
        .join("config.toml")
}

/// Loads the configuration, falling back to defaults when the file is
/// missing or broken.
fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(CoreError::NotFound(_)) => Config::default(),
        Err(e) => {
            eprintln!("warning: ignoring config {}: {e}", path.display());
            Config::default()
        }
    }
}

/// Sends tracing output to the configured log file so it never interleaves
/// with the REPL. `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let path = config.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.level.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(())
}

/// Reads stdin on a dedicated thread. The channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("stdin read failed: {e}");
                    break;
                }
            }
        }
    });
    rx
}

fn prompt(session: &Session) {
    if let Mode::ConfirmDelete(_) = session.mode() {
        return;
    }
    let dir = session
        .manager()
        .current_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_default();
    print!("{dir}> ");
    let _ = io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path);
    init_logging(&config.logging)?;
    tracing::info!("starting with config {}", config_path.display());

    let start_dir = match args.start_dir.or_else(|| config.general.start_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to get current directory")?,
    };

    let (report_tx, mut reports) = report_channel();
    let executor = FileOperationExecutor::new(
        Arc::new(LocalFs),
        tokio::runtime::Handle::current(),
        report_tx,
    );
    let mut manager = DirectoryManager::new(Arc::new(LocalFs), &config.general);
    manager.set_listener(Box::new(ConsoleListener::new(executor)));
    manager
        .go_to(&start_dir)
        .with_context(|| format!("cannot open {}", start_dir.display()))?;

    let mut session = Session::new(manager, config.general.confirm_delete);
    let mut lines = spawn_stdin_reader();
    prompt(&session);

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) => {
                    if session.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                None => break,
            },
            Some(report) = reports.recv() => session.complete(report),
        }
        prompt(&session);
    }

    // Let an in-flight operation finish so its outcome is not lost.
    if session.manager().pending_request().is_some() {
        if let Some(report) = reports.recv().await {
            session.complete(report);
        }
    }
    println!();
    tracing::info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments() {
        let parsed = args(&[]).unwrap();
        assert!(parsed.config.is_none());
        assert!(parsed.start_dir.is_none());
    }

    #[test]
    fn config_and_start_dir() {
        let parsed = args(&["--config", "/etc/filenav.toml", "/srv"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/etc/filenav.toml")));
        assert_eq!(parsed.start_dir, Some(PathBuf::from("/srv")));
    }

    #[test]
    fn config_flag_needs_value() {
        assert!(args(&["--config"]).is_err());
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(args(&["/a", "/b"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("absent.toml"));
        assert!(config.general.confirm_delete);
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[general\nshow_hidden = ").unwrap();

        let config = load_config(&path);

        assert!(!config.general.show_hidden);
        assert_eq!(config.logging.level, "info");
    }
}
