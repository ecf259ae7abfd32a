#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Process execution layer for casket.
//!
//! Version control and the external auditor are both reached through
//! [`ProcessOperations`], so every spawn emits the same platform events and
//! tests can substitute a scripted runner.

pub mod core;
pub mod implementations;
pub mod process;

pub use crate::core::PlatformContext;
pub use implementations::NativeProcessOperations;

/// Re-export commonly used types
pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
