//! Configuration module for ontoctl
//!
//! Settings live in `<config dir>/ontoctl/config.toml`. Environment
//! variables prefixed with `ONTOCTL_` override the file, and command-line
//! flags override both.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys accepted by `config get` and `config set`
pub const KEYS: &[&str] = &[
    "api_url",
    "download_dir",
    "request_timeout_secs",
    "quiet",
    "editor",
];

const ENV_PREFIX: &str = "ONTOCTL";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OntoConfig {
    /// Base URL of the version service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Where downloads are written; the user's download directory if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Editor for source text; `$VISUAL`/`$EDITOR` if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Default for OntoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            download_dir: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            quiet: false,
            editor: None,
        }
    }
}

impl OntoConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("ontoctl").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, with environment overrides applied
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        settings.try_deserialize()
    }

    /// Load configuration, running first-time setup if there is no file yet
    ///
    /// Setup only runs when `interactive` is set; otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup(interactive: bool) -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        if config_path.exists() || !interactive {
            Self::load_from(&config_path)
        } else {
            first_time_setup(&config_path)?;
            Self::load_from(&config_path)
        }
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Request timeout as a duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolved download directory
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolved editor command
    #[must_use]
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Read one setting as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_url" => Some(self.api_url.clone()),
            "download_dir" => Some(self.download_dir().display().to_string()),
            "request_timeout_secs" => Some(self.request_timeout_secs.to_string()),
            "quiet" => Some(self.quiet.to_string()),
            "editor" => Some(self.editor()),
            _ => None,
        }
    }

    /// Change one setting from text
    ///
    /// An empty value clears optional settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "api_url" => {
                if value.is_empty() {
                    return Err(ConfigError::Message("api_url cannot be empty".to_string()));
                }
                self.api_url = value.to_string();
            }
            "download_dir" => self.download_dir = optional(value).map(PathBuf::from),
            "request_timeout_secs" => {
                self.request_timeout_secs = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid timeout '{value}', expected seconds"))
                })?;
            }
            "quiet" => {
                self.quiet = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value '{value}', expected true or false"))
                })?;
            }
            "editor" => self.editor = optional(value),
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown key '{key}'. Valid keys: {}",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}
