//! Turning an audit outcome into the run's result

use casket_audit::AuditOutcome;
use casket_errors::{AuditError, Error};
use casket_events::{AppEvent, AuditEvent, EventEmitter};
use casket_types::{CommitRange, RunReport};

/// Announce the totals and decide success.
///
/// # Errors
///
/// Returns `AuditError::CasksFailed` naming every failed cask, in encounter
/// order, when at least one audit failed.
pub fn finish_run(
    events: &impl EventEmitter,
    outcome: AuditOutcome,
    commit_range: CommitRange,
) -> Result<RunReport, Error> {
    let failed = outcome.failed_tokens();

    events.emit(AppEvent::Audit(AuditEvent::RunCompleted {
        audited: outcome.records.len(),
        failed: failed.len(),
    }));

    if !failed.is_empty() {
        return Err(AuditError::CasksFailed { tokens: failed }.into());
    }
    Ok(outcome.into_report(commit_range))
}
