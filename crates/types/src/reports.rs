//! Audit parameters and run reports

use crate::{CaskFilePath, CommitRange};
use serde::{Deserialize, Serialize};

/// Parameters steering a single cask audit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOptions {
    /// Verify the download against the pinned checksum
    pub download: bool,
    /// Check the token against existing casks
    pub check_token_conflicts: bool,
    pub commit_range: CommitRange,
}

/// Outcome of auditing one cask
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaskAuditRecord {
    pub token: String,
    pub path: CaskFilePath,
    pub download: bool,
    pub check_token_conflicts: bool,
    pub passed: bool,
}

/// Everything a run audited, in encounter order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub commit_range: CommitRange,
    pub audited: Vec<CaskAuditRecord>,
}

impl RunReport {
    #[must_use]
    pub fn new(commit_range: CommitRange) -> Self {
        Self {
            commit_range,
            audited: Vec::new(),
        }
    }

    /// Tokens of failed casks in encounter order; duplicates are kept.
    #[must_use]
    pub fn failed_tokens(&self) -> Vec<String> {
        self.audited
            .iter()
            .filter(|record| !record.passed)
            .map(|record| record.token.clone())
            .collect()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.audited.iter().all(|record| record.passed)
    }
}
