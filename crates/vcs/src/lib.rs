#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Version control gateway for casket
//!
//! Runs `git` subcommands through the platform process layer. Output is
//! returned with its trailing newline removed; a non-zero exit becomes a
//! [`VcsError::CommandFailed`] carrying the command's standard error. There
//! is no retry.

use casket_errors::{Error, VcsError};
use casket_events::EventEmitter;
use casket_platform::{PlatformCommand, PlatformContext, ProcessOperations};
use casket_types::{CommitRange, DiffFilter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Handle for running version control subcommands
#[derive(Clone)]
pub struct Git {
    program: String,
    process: Arc<dyn ProcessOperations>,
    ctx: PlatformContext,
    work_dir: Option<PathBuf>,
}

impl Git {
    /// Create a gateway running `program` in the current directory
    pub fn new(
        program: impl Into<String>,
        process: Arc<dyn ProcessOperations>,
        ctx: PlatformContext,
    ) -> Self {
        Self {
            program: program.into(),
            process,
            ctx,
            work_dir: None,
        }
    }

    /// A copy of this gateway whose commands run inside `dir`
    #[must_use]
    pub fn in_dir(&self, dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Run a subcommand and return its standard output.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::CommandFailed` with the captured standard error when
    /// the command exits non-zero, `VcsError::InvalidOutput` when standard
    /// output is not UTF-8, or a platform error if the program cannot be spawned.
    pub async fn run<I, S>(&self, args: I) -> Result<String, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = PlatformCommand::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        let command_line = cmd.descriptor().command_line();
        tracing::debug!(command = %command_line, "running version control command");
        self.ctx.emit_debug(command_line.clone());

        let output = self.process.execute_command(&self.ctx, cmd).await?;

        if !output.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::CommandFailed {
                command: command_line,
                stderr: chomp(&stderr).to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| VcsError::InvalidOutput {
                command: command_line,
            })?;
        Ok(chomp(&stdout).to_string())
    }

    /// Absolute path of the top of the working tree
    ///
    /// # Errors
    ///
    /// Fails when not run inside a checkout.
    pub async fn show_toplevel(&self) -> Result<PathBuf, Error> {
        let out = self.run(["rev-parse", "--show-toplevel"]).await?;
        if out.is_empty() {
            return Err(VcsError::NotARepository {
                path: self
                    .work_dir
                    .as_ref()
                    .map_or_else(|| ".".to_string(), |d| d.display().to_string()),
            }
            .into());
        }
        Ok(PathBuf::from(out))
    }

    /// Names of files changed in `range` matching `filter` and `pathspec`, one per line
    ///
    /// # Errors
    ///
    /// Propagates command failures.
    pub async fn diff_name_only(
        &self,
        range: &CommitRange,
        filter: DiffFilter,
        pathspec: &str,
    ) -> Result<String, Error> {
        self.run([
            "diff",
            "--name-only",
            &filter.as_arg(),
            range.as_str(),
            "--",
            pathspec,
        ])
        .await
    }

    /// Unified diff of a single file over `range`
    ///
    /// # Errors
    ///
    /// Propagates command failures.
    pub async fn diff_file(&self, range: &CommitRange, file: &Path) -> Result<String, Error> {
        let file = file.to_string_lossy();
        self.run(["diff", range.as_str(), "--", file.as_ref()]).await
    }
}

/// Remove one trailing line terminator
fn chomp(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
