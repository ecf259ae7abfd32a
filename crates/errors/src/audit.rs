//! Audit error types

use std::borrow::Cow;

use crate::UserFacingError;
use casket_types::pluralize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum AuditError {
    /// One or more casks failed; tokens are kept in encounter order.
    #[error("audit failed for {}: {}", pluralize(.tokens.len(), "cask"), .tokens.join(" "))]
    CasksFailed { tokens: Vec<String> },

    #[error("auditor `{program}` could not be run: {message}")]
    AuditorUnavailable { program: String, message: String },
}

impl UserFacingError for AuditError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::AuditorUnavailable { .. } => {
                Some("Set [auditor] program in the config file or CASKET_AUDITOR.")
            }
            Self::CasksFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::CasksFailed { .. } => "audit.casks_failed",
            Self::AuditorUnavailable { .. } => "audit.auditor_unavailable",
        })
    }
}
