#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for casket
//!
//! Values come from four layers, later ones winning: built-in defaults, the
//! TOML file (`<config_dir>/casket/config.toml` or `--config`), `CASKET_*`
//! environment variables, and finally the flags the binary applies.

pub mod constants;
pub mod core;

pub use crate::core::{AuditorConfig, GeneralConfig, PathConfig, RepositoryConfig};

use casket_errors::{ConfigError, Error};
use casket_types::ColorChoice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Everything a run can be configured with
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub auditor: AuditorConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// `<config_dir>/casket/config.toml`
    ///
    /// # Errors
    ///
    /// Fails on systems without a per-user config directory.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("casket").join("config.toml"))
    }

    /// Read and parse one config file.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` when the file does not exist, an I/O error
    /// when it cannot be read, `ConfigError::Parse` for invalid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
                .into(),
                _ => Error::io_with_path(&e, path),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.message().to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            tracing::debug!("no config directory; using defaults");
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// An explicit path must exist; the default path may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // CASKET_VCS
        if let Ok(program) = std::env::var("CASKET_VCS") {
            self.repository.vcs_program = non_empty("CASKET_VCS", program)?;
        }

        // CASKET_AUDITOR
        if let Ok(program) = std::env::var("CASKET_AUDITOR") {
            self.auditor.program = non_empty("CASKET_AUDITOR", program)?;
        }

        // CASKET_CACHE_PATH
        if let Ok(path) = std::env::var("CASKET_CACHE_PATH") {
            self.paths.cache_path = Some(PathBuf::from(non_empty("CASKET_CACHE_PATH", path)?));
        }

        // CASKET_COLOR
        if let Ok(color) = std::env::var("CASKET_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CASKET_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Get the download cache path (with default)
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.paths.cache_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(constants::CACHE_SUBDIR)
        })
    }

    /// Get the debug log directory (with default)
    #[must_use]
    pub fn logs_path(&self) -> PathBuf {
        self.paths.logs_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(constants::LOGS_SUBDIR)
        })
    }
}

fn non_empty(field: &str, value: String) -> Result<String, Error> {
    if value.trim().is_empty() {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into())
    } else {
        Ok(value)
    }
}
