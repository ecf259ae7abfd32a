//! Host process operations implementation
//!
//! Spawns real processes through tokio, emitting platform events around
//! every execution.

use async_trait::async_trait;
use casket_errors::{Error, PlatformError};
use casket_events::{
    AppEvent, EventEmitter, FailureContext, PlatformEvent, ProcessCommandDescriptor,
};
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Runs commands on the host with `tokio::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn emit_process_completed(
    ctx: &PlatformContext,
    descriptor: ProcessCommandDescriptor,
    output: &CommandOutput,
    duration: Duration,
) {
    ctx.emit(AppEvent::Platform(PlatformEvent::ProcessCompleted {
        command: descriptor,
        exit_code: output.exit_code,
        duration_ms: duration_to_millis(duration),
        stdout_bytes: output.stdout.len(),
        stderr_bytes: output.stderr.len(),
    }));
}

fn emit_process_failed(
    ctx: &PlatformContext,
    descriptor: ProcessCommandDescriptor,
    error: &PlatformError,
    duration: Duration,
) {
    ctx.emit(AppEvent::Platform(PlatformEvent::ProcessFailed {
        command: descriptor,
        failure: FailureContext::from_error(error),
        duration_ms: duration_to_millis(duration),
    }));
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        let descriptor = cmd.descriptor();

        ctx.emit(AppEvent::Platform(PlatformEvent::ProcessStarted {
            command: descriptor.clone(),
        }));

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        let result = command.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlatformError::CommandNotFound {
                    command: cmd.program().to_string(),
                }
            } else {
                PlatformError::ProcessExecutionFailed {
                    command: descriptor.command_line(),
                    message: e.to_string(),
                }
            }
        });

        let duration = start.elapsed();

        match result {
            Ok(output) => {
                let output = CommandOutput {
                    exit_code: output.status.code(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                };
                emit_process_completed(ctx, descriptor, &output, duration);
                Ok(output)
            }
            Err(e) => {
                emit_process_failed(ctx, descriptor, &e, duration);
                Err(Error::from(e))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use casket_events::channel;

    #[tokio::test]
    async fn captures_stdout_and_stderr_separately() {
        let ops = NativeProcessOperations::new();
        let ctx = PlatformContext::default();
        let mut cmd = PlatformCommand::new("sh");
        cmd.args(["-c", "printf out; printf err >&2; exit 3"]);

        let output = ops.execute_command(&ctx, cmd).await.unwrap();
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr, b"err");
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn passes_environment_and_working_directory() {
        let ops = NativeProcessOperations::new();
        let ctx = PlatformContext::default();
        let mut cmd = PlatformCommand::new("sh");
        cmd.args(["-c", "printf \"$CASKET_TEST_VALUE:$(pwd)\""])
            .env("CASKET_TEST_VALUE", "hello")
            .current_dir("/");

        let output = ops.execute_command(&ctx, cmd).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hello:/");
    }

    #[tokio::test]
    async fn missing_program_is_command_not_found() {
        let (tx, mut rx) = channel();
        let ops = NativeProcessOperations::new();
        let ctx = PlatformContext::new(Some(tx));

        let err = ops
            .execute_command(&ctx, PlatformCommand::new("casket-no-such-program"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::CommandNotFound { .. })
        ));

        let started = rx.try_recv().unwrap();
        assert!(matches!(
            started.event,
            AppEvent::Platform(PlatformEvent::ProcessStarted { .. })
        ));
        let failed = rx.try_recv().unwrap();
        assert!(matches!(
            failed.event,
            AppEvent::Platform(PlatformEvent::ProcessFailed { .. })
        ));
    }
}
