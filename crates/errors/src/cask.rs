//! Cask definition error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CaskError {
    #[error("cask file not found: {path}")]
    NotFound { path: String },

    #[error("no `cask` block in {path}")]
    MissingToken { path: String },
}

impl UserFacingError for CaskError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingToken { .. } => {
                Some("Fix the cask definition before re-running the audit.")
            }
            Self::NotFound { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotFound { .. } => "cask.not_found",
            Self::MissingToken { .. } => "cask.missing_token",
        })
    }
}
