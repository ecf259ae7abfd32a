//! Structured logging integration for events
//!
//! Every event is also written as a tracing record with structured fields,
//! so a `--debug` log file holds the full run even when the terminal shows
//! only a summary.

use casket_events::{
    AppEvent, AuditEvent, CleanupEvent, EventMessage, GeneralEvent, PlatformEvent,
};
use tracing::{debug, error, info, warn};

/// Log an event at its level with fields drawn from its payload
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    let source = meta.source.as_str();
    let event_id = meta.event_id;

    match &message.event {
        AppEvent::General(event) => match event {
            GeneralEvent::DebugLog { message } => {
                debug!(source, %event_id, "{message}");
            }
            GeneralEvent::Warning { message } => {
                warn!(source, %event_id, "{message}");
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(source, %event_id, operation = %operation, "Operation started");
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(source, %event_id, operation = %operation, success, "Operation completed");
            }
        },

        AppEvent::Platform(event) => match event {
            PlatformEvent::ProcessStarted { command } => {
                debug!(
                    source,
                    %event_id,
                    command = %command.command_line(),
                    cwd = ?command.cwd,
                    "Process started"
                );
            }
            PlatformEvent::ProcessCompleted {
                command,
                exit_code,
                duration_ms,
                stdout_bytes,
                stderr_bytes,
            } => {
                debug!(
                    source,
                    %event_id,
                    command = %command.command_line(),
                    exit_code = ?exit_code,
                    duration_ms,
                    stdout_bytes,
                    stderr_bytes,
                    "Process completed"
                );
            }
            PlatformEvent::ProcessFailed {
                command,
                failure,
                duration_ms,
            } => {
                error!(
                    source,
                    %event_id,
                    command = %command.command_line(),
                    code = ?failure.code,
                    message = %failure.message,
                    duration_ms,
                    "Process failed"
                );
            }
        },

        AppEvent::Audit(event) => match event {
            AuditEvent::ChangesDiscovered {
                commit_range,
                casks,
            } => {
                info!(
                    source,
                    %event_id,
                    commit_range = %commit_range,
                    count = casks.len(),
                    casks = ?casks,
                    "Changed casks discovered"
                );
            }
            AuditEvent::CaskAuditStarted {
                token,
                download,
                check_token_conflicts,
            } => {
                debug!(
                    source,
                    %event_id,
                    token = %token,
                    download,
                    check_token_conflicts,
                    "Cask audit started"
                );
            }
            AuditEvent::AuditorOutput {
                token,
                stdout,
                stderr,
            } => {
                debug!(
                    source,
                    %event_id,
                    token = %token,
                    stdout = %stdout,
                    stderr = %stderr,
                    "Auditor output"
                );
            }
            AuditEvent::CaskAuditCompleted { token, passed } => {
                if *passed {
                    info!(source, %event_id, token = %token, "Cask audit passed");
                } else {
                    warn!(source, %event_id, token = %token, "Cask audit failed");
                }
            }
            AuditEvent::RunCompleted { audited, failed } => {
                info!(source, %event_id, audited, failed, "Audit run completed");
            }
        },

        AppEvent::Cleanup(event) => match event {
            CleanupEvent::Starting { path } => {
                info!(source, %event_id, path = %path.display(), "Cleanup started");
            }
            CleanupEvent::Completed {
                path,
                entries_removed,
                duration_ms,
            } => {
                info!(
                    source,
                    %event_id,
                    path = %path.display(),
                    entries_removed,
                    duration_ms,
                    "Cleanup completed"
                );
            }
            CleanupEvent::Failed { path, failure } => {
                warn!(
                    source,
                    %event_id,
                    path = %path.display(),
                    code = ?failure.code,
                    message = %failure.message,
                    retryable = failure.retryable,
                    "Cleanup failed"
                );
            }
        },
    }
}
