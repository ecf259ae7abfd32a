//! Configuration errors

use std::borrow::Cow;
use std::path::PathBuf;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no configuration directory on this system")]
    NoConfigDir,

    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// An environment override was empty or not one of the accepted values.
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NoConfigDir => None,
            Self::NotFound { .. } => Some("Pass an existing file to --config, or drop the flag."),
            Self::Parse { .. } => Some("The config file must be TOML; see the [auditor] and [paths] tables."),
            Self::InvalidValue { .. } => Some("Unset the variable or give it a non-empty value."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NoConfigDir => "config.no_config_dir",
            Self::NotFound { .. } => "config.not_found",
            Self::Parse { .. } => "config.parse",
            Self::InvalidValue { .. } => "config.invalid_value",
        })
    }
}
