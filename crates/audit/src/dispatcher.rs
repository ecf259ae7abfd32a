//! Sequential audit of every changed cask

use casket_changes::{ChangeSet, StanzaChangeClassifier};
use casket_errors::Error;
use casket_events::{AppEvent, AuditEvent, EventEmitter, EventSender};
use casket_loader::CaskLoader;
use casket_types::{CaskAuditRecord, CaskDefinition, CaskFilePath, CommitRange, RunReport};
use casket_vcs::Git;
use std::path::Path;

use crate::{AuditPlan, Auditor};

/// Result of auditing a change set
#[derive(Debug, Clone, Default)]
pub struct AuditOutcome {
    /// One record per audited file, in change set order
    pub records: Vec<CaskAuditRecord>,
    /// Definitions that failed, in encounter order; duplicates are kept
    pub failed: Vec<CaskDefinition>,
}

impl AuditOutcome {
    #[must_use]
    pub fn failed_tokens(&self) -> Vec<String> {
        self.failed.iter().map(|cask| cask.token.clone()).collect()
    }

    #[must_use]
    pub fn into_report(self, commit_range: CommitRange) -> RunReport {
        RunReport {
            commit_range,
            audited: self.records,
        }
    }
}

/// Loads, plans and audits changed casks one at a time
pub struct CaskAuditDispatcher<'a> {
    loader: &'a dyn CaskLoader,
    auditor: &'a dyn Auditor,
    classifier: StanzaChangeClassifier<'a>,
    events: Option<EventSender>,
}

impl<'a> CaskAuditDispatcher<'a> {
    #[must_use]
    pub fn new(loader: &'a dyn CaskLoader, auditor: &'a dyn Auditor, git: &'a Git) -> Self {
        Self {
            loader,
            auditor,
            classifier: StanzaChangeClassifier::new(git),
            events: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Audit every file in `changes.modified_or_added`, in order.
    ///
    /// Definitions are loaded from that same sequence, so each record pairs a
    /// file with its own definition.
    ///
    /// # Errors
    ///
    /// A load failure, a version control failure while classifying, or an
    /// auditor that cannot be run aborts the scan. A failed audit does not.
    pub async fn dispatch(
        &self,
        root: &Path,
        range: &CommitRange,
        changes: &ChangeSet,
    ) -> Result<AuditOutcome, Error> {
        let mut outcome = AuditOutcome::default();

        for file in &changes.modified_or_added {
            let (cask, record) = self.audit_file(root, range, file, changes.is_added(file)).await?;
            if !record.passed {
                outcome.failed.push(cask);
            }
            outcome.records.push(record);
        }

        Ok(outcome)
    }

    /// Load and audit a single file.
    ///
    /// # Errors
    ///
    /// See [`CaskAuditDispatcher::dispatch`].
    pub async fn audit_file(
        &self,
        root: &Path,
        range: &CommitRange,
        file: &CaskFilePath,
        newly_added: bool,
    ) -> Result<(CaskDefinition, CaskAuditRecord), Error> {
        let cask = self.loader.load(root, file).await?;

        // The file diff is only needed when there is a checksum to verify.
        let relevant_change = if cask.sha256.is_no_check() {
            false
        } else {
            self.classifier.is_relevant_change(file, range).await?
        };
        let plan = AuditPlan::decide(&cask, relevant_change, newly_added);

        self.events.emit(AppEvent::Audit(AuditEvent::CaskAuditStarted {
            token: cask.token.clone(),
            download: plan.download,
            check_token_conflicts: plan.check_token_conflicts,
        }));

        let passed = self
            .auditor
            .audit(root, &cask, &plan.options(range))
            .await?;

        self.events.emit(AppEvent::Audit(AuditEvent::CaskAuditCompleted {
            token: cask.token.clone(),
            passed,
        }));

        let record = CaskAuditRecord {
            token: cask.token.clone(),
            path: file.clone(),
            download: plan.download,
            check_token_conflicts: plan.check_token_conflicts,
            passed,
        };
        Ok((cask, record))
    }
}
