//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! One-shot commands log to stderr. The console owns the terminal, so it
//! logs to a file instead (`<data dir>/ontoctl/ontoctl.log` unless a path
//! is given).
//!
//! # Log Levels
//!
//! - `warn`: failed service calls
//! - `info`: successful mutations, downloads
//! - `debug`: every request dispatched
//! - `trace`: stale responses dropped

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Single-line format
    #[default]
    Compact,
    /// JSON lines for machine parsing
    Json,
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub with_ansi: bool,
    /// Write to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::default(),
            with_ansi: true,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Map the `-v` count to a level
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+ (`-vvv`): trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None)
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        // Escape codes are noise in a file
        if path.is_some() {
            self.with_ansi = false;
        }
        self.log_file = path;
        self
    }
}

/// Default log file for the console
#[must_use]
pub fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("ontoctl").join("ontoctl.log"))
}

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file))
    } else {
        init_logging_with_writer(config, io::stderr)
    }
}

/// Initialize logging with a custom writer
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> io::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi),
            )
            .try_init(),
    };
    result.map_err(io::Error::other)
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn
        EnvFilter::new(format!("warn,ontoctl={level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(9).level, Level::TRACE);
    }

    #[test]
    fn test_log_file_disables_ansi() {
        let config = LogConfig::default().with_log_file(Some(PathBuf::from("/tmp/x.log")));
        assert!(!config.with_ansi);
        assert!(LogConfig::default().with_ansi);
    }

    #[test]
    fn test_default_log_file_location() {
        if let Some(path) = default_log_file() {
            assert!(path.ends_with("ontoctl/ontoctl.log"));
        }
    }
}
