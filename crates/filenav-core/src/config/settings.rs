//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::nav::history::DEFAULT_HISTORY_DEPTH;

/// Top-level application configuration.
///
/// All fields have sensible defaults so FileNav works without a config
/// file. Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default = "default_true")]
    pub sort_dir_first: bool,
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    #[serde(default)]
    pub start_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_dir_first: true,
            confirm_delete: true,
            history_depth: default_history_depth(),
            start_dir: None,
        }
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// The configured log file, or `filenav.log` in the temp directory.
    pub fn log_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("filenav.log"))
    }
}

fn default_true() -> bool {
    true
}

fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_general() {
        let config = Config::default();

        assert!(!config.general.show_hidden);
        assert!(config.general.sort_dir_first);
        assert!(config.general.confirm_delete);
        assert_eq!(config.general.history_depth, 100);
        assert!(config.general.start_dir.is_none());
    }

    #[test]
    fn default_config_logging() {
        let config = Config::default();

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_file().ends_with("filenav.log"));
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
show_hidden = true
sort_dir_first = false
confirm_delete = false
history_depth = 8
start_dir = "/srv/share"

[logging]
level = "debug"
file = "/var/log/filenav.log"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert!(!config.general.sort_dir_first);
        assert!(!config.general.confirm_delete);
        assert_eq!(config.general.history_depth, 8);
        assert_eq!(config.general.start_dir, Some(PathBuf::from("/srv/share")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.log_file(),
            PathBuf::from("/var/log/filenav.log")
        );
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[general]\nshow_hidden = true\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert!(config.general.sort_dir_first);
        assert_eq!(config.general.history_depth, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.confirm_delete);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }
}
