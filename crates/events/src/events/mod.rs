use serde::{Deserialize, Serialize};

use crate::EventSource;
use casket_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod audit;
pub mod cleanup;
pub mod general;
pub mod platform;

pub use audit::*;
pub use cleanup::*;
pub use general::*;
pub use platform::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Warnings, debug traces, operation boundaries
    General(GeneralEvent),

    /// External process execution
    Platform(PlatformEvent),

    /// Change discovery and per-cask audits
    Audit(AuditEvent),

    /// Download cache removal
    Cleanup(CleanupEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Platform(_) => EventSource::PLATFORM,
            Self::Audit(_) => EventSource::AUDIT,
            Self::Cleanup(_) => EventSource::CLEANUP,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Platform(PlatformEvent::ProcessFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Audit(AuditEvent::CaskAuditCompleted { passed: false, .. })
            | Self::Cleanup(CleanupEvent::Failed { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Platform(_)
            | Self::Audit(AuditEvent::CaskAuditStarted { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Token of the cask this event reports on
    #[must_use]
    pub fn cask(&self) -> Option<&str> {
        match self {
            Self::Audit(
                AuditEvent::CaskAuditStarted { token, .. }
                | AuditEvent::AuditorOutput { token, .. }
                | AuditEvent::CaskAuditCompleted { token, .. },
            ) => Some(token),
            _ => None,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "casket::events::general",
            Self::Platform(_) => "casket::events::platform",
            Self::Audit(_) => "casket::events::audit",
            Self::Cleanup(_) => "casket::events::cleanup",
        }
    }
}
