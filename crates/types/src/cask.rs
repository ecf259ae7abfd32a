//! Cask file paths and loaded cask definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Path of a cask file as reported by version control, relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaskFilePath(PathBuf);

impl CaskFilePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// File name without extension; this is the token a well-formed cask declares.
    #[must_use]
    pub fn stem(&self) -> Option<&str> {
        self.0.file_stem().and_then(|s| s.to_str())
    }

    /// Absolute location of the file under `root`
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl fmt::Display for CaskFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&str> for CaskFilePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The value of a cask's `sha256` stanza
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ChecksumPolicy {
    /// A pinned digest
    Checksum(String),
    /// `sha256 :no_check`: the download is never verified
    NoCheck,
    /// No `sha256` stanza; the audit itself reports this
    Unspecified,
}

impl ChecksumPolicy {
    #[must_use]
    pub fn is_no_check(&self) -> bool {
        matches!(self, Self::NoCheck)
    }
}

/// A cask file after loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaskDefinition {
    /// Identifying token, e.g. `google-chrome`
    pub token: String,
    /// File the definition was loaded from
    pub path: CaskFilePath,
    pub sha256: ChecksumPolicy,
    pub version: Option<String>,
    pub url: Option<String>,
}

impl CaskDefinition {
    /// Create a definition with a pinned checksum and no other stanzas
    pub fn new(token: impl Into<String>, path: CaskFilePath, sha256: ChecksumPolicy) -> Self {
        Self {
            token: token.into(),
            path,
            sha256,
            version: None,
            url: None,
        }
    }
}

impl fmt::Display for CaskDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}
