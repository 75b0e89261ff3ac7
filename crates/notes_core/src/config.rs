//! Application configuration.
//!
//! # Responsibility
//! - Resolve database path, log directory, log level, server port and the
//!   completed-task window for every front end.
//!
//! # Invariants
//! - Precedence, lowest first: built-in defaults, `~/.notes/config.toml`,
//!   `NOTES_*` environment variables, command-line flags.
//! - A missing config file is not an error; a malformed one is.
//! - `~` in configured paths expands to the home directory.

use crate::logging::default_log_level;
use crate::present::DEFAULT_COMPLETED_WINDOW_DAYS;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = ".notes";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "database.sqlite";
pub const LOG_DIR_NAME: &str = "logs";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

pub const ENV_DB: &str = "NOTES_DB";
pub const ENV_LOG_DIR: &str = "NOTES_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "NOTES_LOG_LEVEL";
pub const ENV_PORT: &str = "NOTES_PORT";

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    /// No home directory could be determined for the defaults.
    NoHomeDir,
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDir => write!(f, "cannot determine the home directory"),
            Self::Io { path, message } => {
                write!(f, "cannot read config `{}`: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid config `{}`: {message}", path.display())
            }
            Self::InvalidValue { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub server_port: u16,
    /// Completed tasks older than this many days drop out of compact tables.
    pub completed_window_days: i64,
}

/// On-disk shape of `config.toml`; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    db_path: Option<String>,
    log_dir: Option<String>,
    log_level: Option<String>,
    server_port: Option<u16>,
    completed_window_days: Option<i64>,
}

impl AppConfig {
    /// Built-in defaults rooted at `home`.
    pub fn defaults_in(home: &Path) -> Self {
        let app_dir = home.join(APP_DIR_NAME);
        Self {
            db_path: app_dir.join(DB_FILE_NAME),
            log_dir: app_dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
            server_port: DEFAULT_SERVER_PORT,
            completed_window_days: DEFAULT_COMPLETED_WINDOW_DAYS,
        }
    }

    /// Defaults, then `~/.notes/config.toml`, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let mut config = Self::defaults_in(&home);
        config.merge_file(&home.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))?;
        config.merge_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlays values from a TOML file. Missing files are skipped.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })
            }
        };
        let file: ConfigFile = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        if let Some(db_path) = file.db_path.as_deref().and_then(non_blank) {
            self.db_path = expand_tilde(db_path);
        }
        if let Some(log_dir) = file.log_dir.as_deref().and_then(non_blank) {
            self.log_dir = expand_tilde(log_dir);
        }
        if let Some(level) = file.log_level.as_deref().and_then(non_blank) {
            self.log_level = level.to_string();
        }
        if let Some(port) = file.server_port {
            self.server_port = port;
        }
        if let Some(days) = file.completed_window_days {
            if days < 0 {
                return Err(ConfigError::InvalidValue {
                    key: "completed_window_days",
                    value: days.to_string(),
                });
            }
            self.completed_window_days = days;
        }
        Ok(())
    }

    /// Overlays `NOTES_*` variables read through `lookup`.
    pub fn merge_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_DB) {
            if let Some(path) = non_blank(&value) {
                self.db_path = expand_tilde(path);
            }
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            if let Some(path) = non_blank(&value) {
                self.log_dir = expand_tilde(path);
            }
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            if let Some(level) = non_blank(&value) {
                self.log_level = level.to_string();
            }
        }
        if let Some(value) = lookup(ENV_PORT) {
            if let Some(port) = non_blank(&value) {
                self.server_port = port.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_PORT,
                    value: value.clone(),
                })?;
            }
        }
        Ok(())
    }

    /// Applies command-line flags, which win over everything else.
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        server_port: Option<u16>,
    ) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(port) = server_port {
            self.server_port = port;
        }
        self
    }

    pub fn completed_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.completed_window_days)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Expands a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
