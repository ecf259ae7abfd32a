//! Shared test utilities for the casket workspace.
//!
//! - **process**: a scripted [`ProcessOperations`](casket_platform::ProcessOperations)
//!   that answers version control and auditor invocations from a table
//! - **fakes**: in-memory loader, auditor and cleanup collaborators that record calls
//! - **diff**: a small builder for unified diffs of cask files
//! - **fixtures**: cask sources and canned diffs
//! - **arb**: proptest strategies for diff lines

pub mod arb;
pub mod diff;
pub mod fakes;
pub mod fixtures;
pub mod process;

pub use diff::CaskDiff;
pub use fakes::{CountingCleanup, MapLoader, RecordedAudit, RecordingAuditor};
pub use process::{GitScript, RecordedCommand, ScriptedProcess};
