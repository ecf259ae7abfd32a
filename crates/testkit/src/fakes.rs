//! In-memory collaborators that record how they were called.

use async_trait::async_trait;
use casket_audit::Auditor;
use casket_errors::{CaskError, Error, StorageError};
use casket_loader::CaskLoader;
use casket_ops::Cleanup;
use casket_types::{AuditOptions, CaskDefinition, CaskFilePath, ChecksumPolicy};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves definitions from a map instead of parsing files.
#[derive(Debug, Default)]
pub struct MapLoader {
    casks: HashMap<CaskFilePath, CaskDefinition>,
    loaded: Mutex<Vec<CaskFilePath>>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its own path.
    pub fn with(mut self, cask: CaskDefinition) -> Self {
        self.casks.insert(cask.path.clone(), cask);
        self
    }

    /// Register `Casks/<token>.rb` with a pinned checksum.
    pub fn checksummed(self, token: &str) -> Self {
        self.with(CaskDefinition::new(
            token,
            CaskFilePath::new(format!("Casks/{token}.rb")),
            ChecksumPolicy::Checksum("a".repeat(64)),
        ))
    }

    /// Register `Casks/<token>.rb` with `sha256 :no_check`.
    pub fn unchecked(self, token: &str) -> Self {
        self.with(CaskDefinition::new(
            token,
            CaskFilePath::new(format!("Casks/{token}.rb")),
            ChecksumPolicy::NoCheck,
        ))
    }

    /// Paths loaded so far, in order.
    pub fn loaded(&self) -> Vec<CaskFilePath> {
        self.loaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaskLoader for MapLoader {
    async fn load(&self, _root: &Path, file: &CaskFilePath) -> Result<CaskDefinition, Error> {
        self.loaded.lock().unwrap().push(file.clone());
        self.casks.get(file).cloned().ok_or_else(|| {
            CaskError::NotFound {
                path: file.to_string(),
            }
            .into()
        })
    }
}

/// One call to [`RecordingAuditor::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAudit {
    pub root: PathBuf,
    pub token: String,
    pub options: AuditOptions,
}

/// Passes every cask except those marked failing, recording each call.
#[derive(Debug, Default)]
pub struct RecordingAuditor {
    failing: HashSet<String>,
    audits: Mutex<Vec<RecordedAudit>>,
}

impl RecordingAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, tokens: &[&str]) -> Self {
        self.failing
            .extend(tokens.iter().map(|t| (*t).to_string()));
        self
    }

    pub fn audits(&self) -> Vec<RecordedAudit> {
        self.audits.lock().unwrap().clone()
    }

    pub fn audited_tokens(&self) -> Vec<String> {
        self.audits().into_iter().map(|a| a.token).collect()
    }

    /// Options the named cask was audited with, if it was audited.
    pub fn options_for(&self, token: &str) -> Option<AuditOptions> {
        self.audits()
            .into_iter()
            .find(|a| a.token == token)
            .map(|a| a.options)
    }
}

#[async_trait]
impl Auditor for RecordingAuditor {
    async fn audit(
        &self,
        root: &Path,
        cask: &CaskDefinition,
        options: &AuditOptions,
    ) -> Result<bool, Error> {
        self.audits.lock().unwrap().push(RecordedAudit {
            root: root.to_path_buf(),
            token: cask.token.clone(),
            options: options.clone(),
        });
        Ok(!self.failing.contains(&cask.token))
    }
}

/// Counts invocations; optionally fails each one.
#[derive(Debug, Default)]
pub struct CountingCleanup {
    runs: AtomicUsize,
    fail: bool,
}

impl CountingCleanup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            runs: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cleanup for CountingCleanup {
    async fn clean(&self) -> Result<usize, Error> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(StorageError::Busy {
                path: PathBuf::from("/cache"),
            }
            .into())
        } else {
            Ok(0)
        }
    }
}
