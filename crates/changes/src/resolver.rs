//! Changed cask files for a commit range

use casket_errors::Error;
use casket_events::{AppEvent, AuditEvent, EventEmitter, EventSender};
use casket_types::{CaskFilePath, CommitRange, DiffFilter};
use casket_vcs::Git;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where cask files live inside the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaskLayout {
    pub cask_dir: String,
    pub extension: String,
}

impl CaskLayout {
    pub fn new(cask_dir: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            cask_dir: cask_dir.into(),
            extension: extension.into(),
        }
    }

    /// Glob handed to version control, anchored at the repository root
    #[must_use]
    pub fn pathspec(&self, root: &Path) -> String {
        root.join(&self.cask_dir)
            .join(format!("*.{}", self.extension))
            .to_string_lossy()
            .into_owned()
    }
}

impl Default for CaskLayout {
    fn default() -> Self {
        Self::new("Casks", "rb")
    }
}

/// Cask files touched by a commit range
///
/// Both lists keep the order version control reported them in. `added` is
/// expected to be a subset of `modified_or_added` but nothing relies on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub modified_or_added: Vec<CaskFilePath>,
    pub added: Vec<CaskFilePath>,
}

impl ChangeSet {
    /// Whether `file` was introduced by the range
    #[must_use]
    pub fn is_added(&self, file: &CaskFilePath) -> bool {
        self.added.contains(file)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modified_or_added.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modified_or_added.len()
    }

    /// File stems of the modified or added casks, used when announcing them
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.modified_or_added
            .iter()
            .map(|path| path.stem().map_or_else(|| path.to_string(), str::to_string))
            .collect()
    }
}

/// Lists changed cask files through version control
pub struct ChangeSetResolver<'a> {
    git: &'a Git,
    layout: CaskLayout,
    events: Option<EventSender>,
}

impl<'a> ChangeSetResolver<'a> {
    #[must_use]
    pub fn new(git: &'a Git, layout: CaskLayout) -> Self {
        Self {
            git,
            layout,
            events: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Top of the working tree.
    ///
    /// # Errors
    ///
    /// Fails when not inside a checkout.
    pub async fn repository_root(&self) -> Result<PathBuf, Error> {
        self.git.show_toplevel().await
    }

    /// Cask files under `root` changed in `range` that match `filter`
    ///
    /// # Errors
    ///
    /// Propagates version control failures.
    pub async fn files_changed(
        &self,
        root: &Path,
        range: &CommitRange,
        filter: DiffFilter,
    ) -> Result<Vec<CaskFilePath>, Error> {
        let listing = self
            .git
            .diff_name_only(range, filter, &self.layout.pathspec(root))
            .await?;

        Ok(listing
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(CaskFilePath::from)
            .collect())
    }

    /// Both file sets for `range`, announcing them when there are any
    ///
    /// # Errors
    ///
    /// Propagates version control failures.
    pub async fn resolve(&self, root: &Path, range: &CommitRange) -> Result<ChangeSet, Error> {
        let modified_or_added = self
            .files_changed(root, range, DiffFilter::ModifiedOrAdded)
            .await?;
        let added = self.files_changed(root, range, DiffFilter::Added).await?;
        let changes = ChangeSet {
            modified_or_added,
            added,
        };

        tracing::debug!(
            range = %range,
            modified_or_added = changes.len(),
            added = changes.added.len(),
            "resolved changed casks"
        );

        if !changes.is_empty() {
            self.events.emit(AppEvent::Audit(AuditEvent::ChangesDiscovered {
                commit_range: range.to_string(),
                casks: changes.tokens(),
            }));
        }

        Ok(changes)
    }
}
