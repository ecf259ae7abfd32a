//! External process events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// The command line of a spawned process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl ProcessCommandDescriptor {
    /// `program arg1 arg2 ...`, space separated
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    ProcessStarted {
        command: ProcessCommandDescriptor,
    },

    /// The process ran to completion; `exit_code` may be non-zero
    ProcessCompleted {
        command: ProcessCommandDescriptor,
        exit_code: Option<i32>,
        duration_ms: u64,
        stdout_bytes: usize,
        stderr_bytes: usize,
    },

    /// The process could not be spawned
    ProcessFailed {
        command: ProcessCommandDescriptor,
        failure: FailureContext,
        duration_ms: u64,
    },
}
