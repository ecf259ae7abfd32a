//! Subprocess errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// The program could not be started; a non-zero exit is not an error here
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("`{command}` is not installed or not on PATH")]
    CommandNotFound { command: String },

    #[error("could not run `{command}`: {message}")]
    ProcessExecutionFailed { command: String, message: String },
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandNotFound { .. } => {
                Some("Install it, or set CASKET_VCS / CASKET_AUDITOR to its full path.")
            }
            Self::ProcessExecutionFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::CommandNotFound { .. } => "platform.command_not_found",
            Self::ProcessExecutionFailed { .. } => "platform.process_failed",
        })
    }
}
