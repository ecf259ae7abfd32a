use serde::{Deserialize, Serialize};

/// Change discovery and cask audit events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuditEvent {
    /// The modified-or-added cask set for the range is known and non-empty
    ChangesDiscovered {
        commit_range: String,
        casks: Vec<String>,
    },

    CaskAuditStarted {
        token: String,
        download: bool,
        check_token_conflicts: bool,
    },

    /// What the auditor printed while checking one cask
    AuditorOutput {
        token: String,
        stdout: String,
        stderr: String,
    },

    CaskAuditCompleted {
        token: String,
        passed: bool,
    },

    RunCompleted {
        audited: usize,
        failed: usize,
    },
}
