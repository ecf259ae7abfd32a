//! Download cache errors

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("permission denied removing {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Another process holds the entry open.
    #[error("{} is in use", .path.display())]
    Busy { path: PathBuf },

    #[error("{}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl StorageError {
    /// Classify a failure to read or remove a cache entry
    #[must_use]
    pub fn from_io_with_path(err: &std::io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            ErrorKind::ResourceBusy => Self::Busy { path },
            _ => Self::Io {
                path,
                message: err.to_string(),
            },
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied { path } | Self::Busy { path } | Self::Io { path, .. } => path,
        }
    }
}

impl UserFacingError for StorageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied { .. } => {
                Some("Point CASKET_CACHE_PATH at a cache directory you own.")
            }
            Self::Busy { .. } => Some("Close whatever is using the download and re-run with --cleanup."),
            Self::Io { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::PermissionDenied { .. } => "storage.permission_denied",
            Self::Busy { .. } => "storage.busy",
            Self::Io { .. } => "storage.io",
        })
    }
}
