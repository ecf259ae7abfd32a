#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Cask definition loading
//!
//! [`CaskLoader`] turns a changed file into a [`CaskDefinition`]. The
//! shipped [`DslCaskLoader`] reads the handful of stanzas the audit run
//! needs straight from the cask source without evaluating it.

mod dsl;

pub use dsl::{parse_cask, DslCaskLoader};

use async_trait::async_trait;
use casket_errors::Error;
use casket_types::{CaskDefinition, CaskFilePath};
use std::path::Path;

/// Loads cask definitions from files in a repository
#[async_trait]
pub trait CaskLoader: Send + Sync {
    /// Load the definition stored at `file`, relative to `root`.
    async fn load(&self, root: &Path, file: &CaskFilePath) -> Result<CaskDefinition, Error>;
}
