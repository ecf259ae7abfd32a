//! Auditor backed by an external command

use async_trait::async_trait;
use casket_config::AuditorConfig;
use casket_errors::{AuditError, Error};
use casket_events::{AppEvent, AuditEvent, EventEmitter};
use casket_platform::{PlatformCommand, PlatformContext, ProcessOperations};
use casket_types::{AuditOptions, CaskDefinition};
use std::path::Path;
use std::sync::Arc;

use crate::Auditor;

/// Runs `<program> <args..> [download flag] [token conflicts flag] <cask file>`
/// from the repository root.
///
/// The commit range is exported through an environment variable. Whatever the
/// command prints is forwarded as an `AuditorOutput` event so its diagnostics
/// reach the user; exit status 0 means the cask passed.
#[derive(Clone)]
pub struct CommandAuditor {
    config: AuditorConfig,
    process: Arc<dyn ProcessOperations>,
    ctx: PlatformContext,
}

impl CommandAuditor {
    pub fn new(
        config: AuditorConfig,
        process: Arc<dyn ProcessOperations>,
        ctx: PlatformContext,
    ) -> Self {
        Self {
            config,
            process,
            ctx,
        }
    }

    fn command(&self, root: &Path, cask: &CaskDefinition, options: &AuditOptions) -> PlatformCommand {
        let mut cmd = PlatformCommand::new(&self.config.program);
        cmd.args(&self.config.args);
        if options.download {
            cmd.arg(&self.config.download_flag);
        }
        if options.check_token_conflicts {
            cmd.arg(&self.config.token_conflicts_flag);
        }
        cmd.arg(cask.path.as_path().to_string_lossy());
        cmd.current_dir(root);
        cmd.env(
            self.config.commit_range_env.clone(),
            options.commit_range.as_str(),
        );
        cmd
    }
}

#[async_trait]
impl Auditor for CommandAuditor {
    async fn audit(
        &self,
        root: &Path,
        cask: &CaskDefinition,
        options: &AuditOptions,
    ) -> Result<bool, Error> {
        let cmd = self.command(root, cask, options);
        let output = self
            .process
            .execute_command(&self.ctx, cmd)
            .await
            .map_err(|e| AuditError::AuditorUnavailable {
                program: self.config.program.clone(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        if !output.success() {
            tracing::debug!(token = %cask.token, exit_code = ?output.exit_code, "auditor reported failure");
        }
        if !stdout.is_empty() || !stderr.is_empty() {
            self.ctx.emit(AppEvent::Audit(AuditEvent::AuditorOutput {
                token: cask.token.clone(),
                stdout,
                stderr,
            }));
        }
        Ok(output.success())
    }
}
