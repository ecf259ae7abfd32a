#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for casket
//!
//! Each concern of a run (version control, cask loading, auditing, the
//! download cache, configuration, subprocesses, orchestration) has its own
//! enum. They meet in [`Error`] at crate boundaries. Everything is `Clone` so
//! a failure can be carried inside an event as well as returned.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod audit;
pub mod cask;
pub mod config;
pub mod ops;
pub mod platform;
pub mod storage;
pub mod vcs;

pub use audit::AuditError;
pub use cask::CaskError;
pub use config::ConfigError;
pub use ops::OpsError;
pub use platform::PlatformError;
pub use storage::StorageError;
pub use vcs::VcsError;

/// Any failure that ends a run
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("version control error: {0}")]
    Vcs(#[from] VcsError),

    #[error("cask error: {0}")]
    Cask(#[from] CaskError),

    /// Shown without a prefix: the message names the failed casks.
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("download cache error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("ops error: {0}")]
    Ops(#[from] OpsError),

    #[error("{}", io_message(.message, .path.as_deref()))]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<PathBuf>,
    },
}

impl Error {
    /// Wrap a file access failure, keeping the path for the report
    pub fn io_with_path(err: &std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    fn domain(&self) -> Option<&dyn UserFacingError> {
        match self {
            Self::Vcs(err) => Some(err),
            Self::Cask(err) => Some(err),
            Self::Audit(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Platform(err) => Some(err),
            Self::Ops(err) => Some(err),
            Self::Io { .. } => None,
        }
    }
}

fn io_message(message: &str, path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("{}: {message}", path.display()),
        None => format!("I/O error: {message}"),
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

/// What the CLI needs to explain a failure to a person
pub trait UserFacingError {
    fn user_message(&self) -> Cow<'_, str>;

    /// Suggested next step, if there is an obvious one.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    fn is_retryable(&self) -> bool {
        false
    }

    /// Dotted code such as `vcs.command_failed` for `--json` output.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self.domain() {
            Some(err) => err.user_message(),
            None => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        self.domain().and_then(UserFacingError::user_hint)
    }

    fn is_retryable(&self) -> bool {
        match self.domain() {
            Some(err) => err.is_retryable(),
            None => matches!(self, Self::Io { .. }),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => Some("error.io"),
            _ => self.domain().and_then(UserFacingError::user_code),
        }
    }
}
