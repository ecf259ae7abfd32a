#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Per-cask audit dispatch for casket
//!
//! Loads every changed cask, decides which optional checks each one gets and
//! hands it to an [`Auditor`]. Failures are collected in encounter order; the
//! run keeps going after a failed cask and only stops on fatal errors.

mod command;
mod dispatcher;
mod plan;

pub use command::CommandAuditor;
pub use dispatcher::{AuditOutcome, CaskAuditDispatcher};
pub use plan::AuditPlan;

use async_trait::async_trait;
use casket_errors::Error;
use casket_types::{AuditOptions, CaskDefinition};
use std::path::Path;

/// Runs the full audit of one cask
#[async_trait]
pub trait Auditor: Send + Sync {
    /// Audit `cask` inside the repository at `root`.
    ///
    /// Returns whether the cask passed. An `Err` means the audit could not be
    /// performed at all and aborts the run.
    async fn audit(
        &self,
        root: &Path,
        cask: &CaskDefinition,
        options: &AuditOptions,
    ) -> Result<bool, Error>;
}
