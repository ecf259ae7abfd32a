//! Which optional checks a cask gets

use casket_types::{AuditOptions, CaskDefinition, CommitRange};
use serde::{Deserialize, Serialize};

/// Optional checks decided for one cask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditPlan {
    pub download: bool,
    pub check_token_conflicts: bool,
}

impl AuditPlan {
    /// Decide the checks for `cask`.
    ///
    /// Download verification needs a checksum to verify against and a change
    /// to a relevant stanza. Token conflicts are only checked for new casks.
    #[must_use]
    pub fn decide(cask: &CaskDefinition, relevant_change: bool, newly_added: bool) -> Self {
        Self {
            download: !cask.sha256.is_no_check() && relevant_change,
            check_token_conflicts: newly_added,
        }
    }

    #[must_use]
    pub fn options(self, commit_range: &CommitRange) -> AuditOptions {
        AuditOptions {
            download: self.download,
            check_token_conflicts: self.check_token_conflicts,
            commit_range: commit_range.clone(),
        }
    }
}
