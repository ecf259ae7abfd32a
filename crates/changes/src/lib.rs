#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Change discovery for cask audits
//!
//! Works out which cask files a commit range touched ([`ChangeSetResolver`])
//! and whether a file's diff adds a line to a stanza that affects what gets
//! downloaded ([`StanzaChangeClassifier`]).

mod resolver;
mod stanza;

pub use resolver::{CaskLayout, ChangeSet, ChangeSetResolver};
pub use stanza::{added_relevant_stanza, StanzaChangeClassifier};
