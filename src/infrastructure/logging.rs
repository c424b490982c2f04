//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The terminal UI owns stdout and stderr, so log lines go to a file when
//! one is configured and are discarded otherwise. `RUST_LOG` overrides the
//! configured level.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file '{path}': {source}")]
    OpenError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    InitError(#[from] TryInitError),
}

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// Log file; `None` discards output.
    pub log_file: Option<PathBuf>,
    /// Write to stderr instead of discarding when no file is set.
    pub stderr_fallback: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: None,
            stderr_fallback: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Raises the level for `-v` flags.
    ///
    /// - 0: keep the configured level
    /// - 1 (`-v`): debug
    /// - 2+ (`-vv`): trace
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.level = match verbosity {
            0 => self.level,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.log_file = path;
        }
        self
    }

    #[must_use]
    pub fn with_stderr_fallback(mut self, enable: bool) -> Self {
        self.stderr_fallback = enable;
        self
    }
}

/// Installs the global subscriber. Call once at start-up.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let (writer, ansi) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::OpenError {
                    path: path.clone(),
                    source,
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if config.stderr_fallback => (BoxMakeWriter::new(io::stderr), true),
        None => (BoxMakeWriter::new(io::sink), false),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,todolist={}", level_str)))
}
