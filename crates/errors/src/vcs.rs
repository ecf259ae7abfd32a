//! Version control error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VcsError {
    /// The subcommand ran and exited non-zero; `stderr` is reported verbatim.
    #[error("{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("`{command}` produced non UTF-8 output")]
    InvalidOutput { command: String },

    #[error("not inside a working tree: {path}")]
    NotARepository { path: String },
}

impl UserFacingError for VcsError {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Self::CommandFailed { command, stderr } if stderr.is_empty() => {
                Cow::Owned(format!("`{command}` failed"))
            }
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandFailed { .. } => {
                Some("Check that the commit range exists in this repository.")
            }
            Self::NotARepository { .. } => Some("Run casket from inside the cask repository."),
            Self::InvalidOutput { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::CommandFailed { .. } => "vcs.command_failed",
            Self::InvalidOutput { .. } => "vcs.invalid_output",
            Self::NotARepository { .. } => "vcs.not_a_repository",
        })
    }
}
