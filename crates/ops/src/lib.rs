#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Run orchestration for casket
//!
//! This crate sits between the CLI and the domain crates. It builds the
//! run-scoped context once, drives change discovery and the per-cask audits,
//! turns the outcome into a report, and guarantees that a requested cache
//! cleanup happens however the run ends.

mod context;
mod maintenance;
mod report;
mod run;

pub use context::{OpsContextBuilder, OpsCtx, RunContext};
pub use maintenance::{with_cleanup, CacheCleanup, Cleanup};
pub use report::finish_run;
pub use run::{audit_modified_casks, scan, AuditRequest};

use casket_errors::{Error, OpsError};
use casket_types::RunReport;

/// Serialize a run report for `--json` output
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn report_to_json(report: &RunReport) -> Result<String, Error> {
    serde_json::to_string_pretty(report).map_err(|e| {
        OpsError::SerializationError {
            message: e.to_string(),
        }
        .into()
    })
}
