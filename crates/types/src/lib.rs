#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for casket
//!
//! This crate provides the vocabulary shared by every other crate: commit
//! ranges, cask file paths, stanza names, loaded cask definitions and the
//! report produced by an audit run.

pub mod cask;
pub mod format;
pub mod reports;
pub mod revision;

// Re-export commonly used types
pub use cask::{CaskDefinition, CaskFilePath, ChecksumPolicy};
pub use format::pluralize;
pub use reports::{AuditOptions, CaskAuditRecord, RunReport};
pub use revision::{CommitRange, DiffFilter, Stanza};

use serde::{Deserialize, Serialize};

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    #[default]
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}
