//! The audit-modified-casks operation

use casket_audit::CaskAuditDispatcher;
use casket_errors::Error;
use casket_events::EventEmitter;
use casket_types::{CommitRange, RunReport};

use crate::report::finish_run;
use crate::{with_cleanup, OpsCtx, RunContext};

const OPERATION: &str = "audit modified casks";

/// What the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    pub commit_range: CommitRange,
    /// Empty the download cache when the run ends
    pub cleanup: bool,
}

/// Audit every cask added or modified in the requested range.
///
/// When cleanup was requested it runs once after the scan, whether the scan
/// succeeded, failed, or panicked.
///
/// # Errors
///
/// Returns version control, load and auditor errors as they occur, or
/// `AuditError::CasksFailed` when the scan finished with failed casks.
pub async fn audit_modified_casks(ctx: &OpsCtx, request: AuditRequest) -> Result<RunReport, Error> {
    let cleanup = request.cleanup.then(|| ctx.cleanup.as_ref());
    with_cleanup(cleanup, scan(ctx, request.commit_range)).await
}

/// The scan without cleanup
///
/// # Errors
///
/// See [`audit_modified_casks`].
pub async fn scan(ctx: &OpsCtx, commit_range: CommitRange) -> Result<RunReport, Error> {
    ctx.emit_operation_started(OPERATION);

    let result = async {
        let run = RunContext::prepare(ctx, commit_range).await?;

        let outcome = CaskAuditDispatcher::new(ctx.loader.as_ref(), ctx.auditor.as_ref(), &run.git)
            .with_events(ctx.tx.clone())
            .dispatch(&run.root, &run.range, &run.changes)
            .await?;

        finish_run(ctx, outcome, run.range)
    }
    .await;

    ctx.emit_operation_completed(OPERATION, result.is_ok());
    result
}
