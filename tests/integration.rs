//! End-to-end tests for casket against real git repositories
//!
//! Each test builds a throwaway repository, commits cask changes and runs the
//! full audit with the real process layer and cask loader. Only the auditor is
//! replaced, so the decisions it receives can be inspected. Tests return early
//! when `git` is not installed.

#[path = "integration/mod.rs"]
mod integration;
