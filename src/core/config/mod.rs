//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$FORGEKIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forgekit/config.toml`
//! 3. `~/.forgekit/config.toml` (canonical location)
//!
//! Missing files are not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use forgekit::core::config::Config;
//! use forgekit::forge::ForgeFactory;
//!
//! let config = Config::load().unwrap();
//! let factory = ForgeFactory::from_config(&config).unwrap();
//! println!("Base branch: {}", config.default_base_branch());
//! ```

pub mod schema;

pub use schema::{CapabilityOverrides, ForgeConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FORGEKIT_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
///
/// Accessor methods apply defaults for unset values.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration file
    pub file: ForgeConfig,
    /// Path the configuration was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Wrap an in-memory configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the configuration is invalid.
    pub fn from_file(file: ForgeConfig) -> Result<Self, ConfigError> {
        file.validate()?;
        Ok(Self { file, path: None })
    }

    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find()? {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no forgekit config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ForgeConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        debug!(path = %path.display(), "loaded forgekit config");
        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn find() -> Result<Option<PathBuf>, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("forgekit/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        match Self::config_path() {
            Ok(path) if path.exists() => Ok(Some(path)),
            Ok(_) | Err(ConfigError::NoHomeDir) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get the canonical config path.
    ///
    /// Returns `~/.forgekit/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".forgekit/config.toml"))
    }

    /// Path the configuration was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the default base branch.
    ///
    /// Defaults to "main" if not configured.
    pub fn default_base_branch(&self) -> &str {
        self.file.default_base_branch.as_deref().unwrap_or("main")
    }

    /// Iterate over configured host aliases as `(host, provider name)`.
    pub fn host_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.file
            .hosts
            .iter()
            .map(|(host, forge)| (host.as_str(), forge.as_str()))
    }

    /// Iterate over capability overrides as `(provider name, overrides)`.
    pub fn capability_overrides(&self) -> impl Iterator<Item = (&str, &CapabilityOverrides)> {
        self.file
            .capabilities
            .iter()
            .map(|(forge, overrides)| (forge.as_str(), overrides))
    }
}
