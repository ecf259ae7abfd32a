//! Run orchestration errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum OpsError {
    /// A required collaborator was not given to the context builder.
    #[error("cannot build run context: {message}")]
    ContextCreationFailed { message: String },

    #[error("cannot encode the run report: {message}")]
    SerializationError { message: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ContextCreationFailed { .. } => "ops.context_creation_failed",
            Self::SerializationError { .. } => "ops.serialization_error",
        })
    }
}
