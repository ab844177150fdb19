//! Runtime configuration for hosts embedding the board core.
//!
//! # Responsibility
//! - Parse and normalize logging settings from explicit values or the
//!   process environment.
//!
//! # Invariants
//! - Level names are case-insensitive; `warning` is an alias of `warn`.
//! - Log directories must be absolute.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "RANKBOARD_LOG_LEVEL";
/// Environment variable holding the absolute log directory.
pub const LOG_DIR_ENV: &str = "RANKBOARD_LOG_DIR";

/// Supported log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a level name.
    ///
    /// # Errors
    /// - `ConfigError::UnsupportedLevel` for unknown names.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::UnsupportedLevel(other.to_string())),
        }
    }

    /// Canonical lowercase name, as `flexi_logger` expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> LogLevel {
    if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

/// Errors from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Level name is not one of `trace|debug|info|warn|error`.
    UnsupportedLevel(String),
    /// Log directory is empty or unset.
    MissingLogDir,
    /// Log directory is not absolute.
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::MissingLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(value) => {
                write!(f, "log_dir must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Builds a config from raw strings.
    ///
    /// # Errors
    /// - `ConfigError` when the level is unknown or the directory is empty or
    ///   relative.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: LogLevel::parse(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Reads `RANKBOARD_LOG_LEVEL` and `RANKBOARD_LOG_DIR`.
    ///
    /// The level falls back to [`default_log_level`]; the directory is
    /// required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`LogConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let level = match lookup(LOG_LEVEL_ENV) {
            Some(value) if !value.trim().is_empty() => LogLevel::parse(&value)?,
            _ => default_log_level(),
        };
        let log_dir = lookup(LOG_DIR_ENV).ok_or(ConfigError::MissingLogDir)?;
        Ok(Self {
            level,
            log_dir: normalize_log_dir(&log_dir)?,
        })
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingLogDir);
    }
    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, ConfigError, LogConfig, LogLevel, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;

    #[test]
    fn level_parse_accepts_known_values() {
        assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse(" warning ").unwrap(), LogLevel::Warn);
        assert_eq!(
            LogLevel::parse("loud").unwrap_err(),
            ConfigError::UnsupportedLevel("loud".to_string())
        );
    }

    #[test]
    fn new_rejects_relative_dir() {
        let err = LogConfig::new("info", "logs/dev").unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn lookup_defaults_level_and_requires_dir() {
        let absolute = std::env::temp_dir();
        let absolute = absolute.to_str().unwrap().to_string();
        let vars = HashMap::from([(LOG_DIR_ENV, absolute.clone())]);

        let config = LogConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.level, default_log_level());
        assert_eq!(config.log_dir.to_str(), Some(absolute.as_str()));

        let empty: HashMap<&str, String> = HashMap::from([(LOG_LEVEL_ENV, "info".to_string())]);
        let err = LogConfig::from_lookup(|name| empty.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingLogDir);
    }
}
