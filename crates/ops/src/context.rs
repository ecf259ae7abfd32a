//! Operations context for dependency injection

use casket_audit::{Auditor, CommandAuditor};
use casket_changes::{CaskLayout, ChangeSet, ChangeSetResolver};
use casket_config::Config;
use casket_errors::{Error, OpsError};
use casket_events::{EventEmitter, EventSender};
use casket_loader::{CaskLoader, DslCaskLoader};
use casket_platform::{NativeProcessOperations, PlatformContext, ProcessOperations};
use casket_types::CommitRange;
use casket_vcs::Git;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{CacheCleanup, Cleanup};

/// Collaborators and configuration shared by every operation
pub struct OpsCtx {
    pub config: Config,
    /// Runs version control and auditor subprocesses
    pub process: Arc<dyn ProcessOperations>,
    pub loader: Arc<dyn CaskLoader>,
    pub auditor: Arc<dyn Auditor>,
    /// Invoked at the end of a run when cleanup was requested
    pub cleanup: Arc<dyn Cleanup>,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Directory root discovery starts from; the process directory when unset
    pub working_dir: Option<PathBuf>,
}

impl OpsCtx {
    // No public constructor - use OpsContextBuilder instead

    #[must_use]
    pub fn platform_context(&self) -> PlatformContext {
        PlatformContext::new(Some(self.tx.clone()))
    }

    /// Version control gateway running in the working directory
    #[must_use]
    pub fn git(&self) -> Git {
        let git = Git::new(
            &self.config.repository.vcs_program,
            Arc::clone(&self.process),
            self.platform_context(),
        );
        match &self.working_dir {
            Some(dir) => git.in_dir(dir),
            None => git,
        }
    }

    #[must_use]
    pub fn layout(&self) -> CaskLayout {
        CaskLayout::new(
            &self.config.repository.cask_dir,
            &self.config.repository.cask_extension,
        )
    }
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Everything a run needs to know about the repository, computed once
#[derive(Clone)]
pub struct RunContext {
    pub root: PathBuf,
    pub range: CommitRange,
    pub changes: ChangeSet,
    /// Gateway whose commands run from `root`
    pub git: Git,
}

impl RunContext {
    /// Discover the repository root and the changed casks for `range`.
    ///
    /// # Errors
    ///
    /// Fails when not inside a checkout or when the range cannot be diffed.
    pub async fn prepare(ctx: &OpsCtx, range: CommitRange) -> Result<Self, Error> {
        let git = ctx.git();
        let root = ChangeSetResolver::new(&git, ctx.layout())
            .repository_root()
            .await?;

        let git = git.in_dir(&root);
        let changes = ChangeSetResolver::new(&git, ctx.layout())
            .with_events(ctx.tx.clone())
            .resolve(&root, &range)
            .await?;

        Ok(Self {
            root,
            range,
            changes,
            git,
        })
    }
}

/// Builder for [`OpsCtx`]
///
/// Configuration and an event sender are required. Any collaborator left
/// unset is built from the configuration.
pub struct OpsContextBuilder {
    config: Option<Config>,
    process: Option<Arc<dyn ProcessOperations>>,
    loader: Option<Arc<dyn CaskLoader>>,
    auditor: Option<Arc<dyn Auditor>>,
    cleanup: Option<Arc<dyn Cleanup>>,
    tx: Option<EventSender>,
    working_dir: Option<PathBuf>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            process: None,
            loader: None,
            auditor: None,
            cleanup: None,
            tx: None,
            working_dir: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn with_process(mut self, process: Arc<dyn ProcessOperations>) -> Self {
        self.process = Some(process);
        self
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn CaskLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    #[must_use]
    pub fn with_auditor(mut self, auditor: Arc<dyn Auditor>) -> Self {
        self.auditor = Some(auditor);
        self
    }

    #[must_use]
    pub fn with_cleanup(mut self, cleanup: Arc<dyn Cleanup>) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Discover the repository from `dir` instead of the process directory
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or event sender is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let config = self.config.ok_or_else(|| OpsError::ContextCreationFailed {
            message: "config is required".to_string(),
        })?;
        let tx = self.tx.ok_or_else(|| OpsError::ContextCreationFailed {
            message: "event sender is required".to_string(),
        })?;

        let process = self
            .process
            .unwrap_or_else(|| Arc::new(NativeProcessOperations::new()));
        let loader = self
            .loader
            .unwrap_or_else(|| Arc::new(DslCaskLoader::new()));
        let auditor = self.auditor.unwrap_or_else(|| {
            Arc::new(CommandAuditor::new(
                config.auditor.clone(),
                Arc::clone(&process),
                PlatformContext::new(Some(tx.clone())),
            ))
        });
        let cleanup = self.cleanup.unwrap_or_else(|| {
            Arc::new(CacheCleanup::new(config.cache_path()).with_events(tx.clone()))
        });

        Ok(OpsCtx {
            config,
            process,
            loader,
            auditor,
            cleanup,
            tx,
            working_dir: self.working_dir,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
