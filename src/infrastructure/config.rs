use crate::application::AppOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Title of the list block.
    pub title: String,
    /// Require pressing delete twice on the same row.
    pub confirm_delete: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        let options = AppOptions::default();
        Self {
            title: options.title,
            confirm_delete: options.confirm_delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace.
    pub level: String,
    /// Log file. Without one, logs are discarded in TUI mode.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Returns the path to the default configuration file.
    ///
    /// Uses `~/.config/todolist/config.toml` on Linux, or the platform's
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("todolist").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Config::default()`. An existing file is parsed
    /// as TOML and validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that the title is non-empty and the log level is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.title.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "ui.title must not be empty".to_string(),
            });
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.logging
            .level
            .parse::<Level>()
            .map_err(|_| ConfigError::ValidationError {
                message: format!("unknown log level '{}'", self.logging.level),
            })
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            title: self.ui.title.clone(),
            confirm_delete: self.ui.confirm_delete,
        }
    }
}
