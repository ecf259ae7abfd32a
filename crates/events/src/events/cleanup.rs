use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Download cache cleanup events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CleanupEvent {
    Starting {
        path: PathBuf,
    },

    Completed {
        path: PathBuf,
        entries_removed: usize,
        duration_ms: u64,
    },

    /// Cleanup could not finish; the run outcome is unaffected
    Failed {
        path: PathBuf,
        failure: FailureContext,
    },
}
