//! Commit range, diff filter and stanza vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two revisions to compare, passed to version control untouched (e.g. `main..feature`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitRange(String);

impl CommitRange {
    #[must_use]
    pub fn new(range: impl Into<String>) -> Self {
        Self(range.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which kinds of file change a name listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffFilter {
    /// Added or modified files (`--diff-filter=AM`)
    ModifiedOrAdded,
    /// Newly introduced files only (`--diff-filter=A`)
    Added,
}

impl DiffFilter {
    /// Status letters understood by `git diff --diff-filter`
    #[must_use]
    pub fn status_letters(self) -> &'static str {
        match self {
            Self::ModifiedOrAdded => "AM",
            Self::Added => "A",
        }
    }

    /// Full `--diff-filter=` argument
    #[must_use]
    pub fn as_arg(self) -> String {
        format!("--diff-filter={}", self.status_letters())
    }
}

/// Cask fields whose change warrants download verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stanza {
    Version,
    Sha256,
    Url,
    Appcast,
}

impl Stanza {
    /// The fixed set consulted when classifying a diff
    pub const RELEVANT: [Stanza; 4] = [Self::Version, Self::Sha256, Self::Url, Self::Appcast];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Sha256 => "sha256",
            Self::Url => "url",
            Self::Appcast => "appcast",
        }
    }
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
