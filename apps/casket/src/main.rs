//! casket - audit all modified Casks in a given commit range
//!
//! The CLI parses the invocation, loads configuration and hands the run to
//! the ops crate, rendering events as they arrive.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use casket_config::Config;
use casket_events::EventReceiver;
use casket_ops::{AuditRequest, OpsContextBuilder, OpsCtx};
use casket_types::{ColorChoice, RunReport};
use std::path::Path;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse_normalized(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            process::exit(i32::from(e.use_stderr()));
        }
    };
    let renderer = OutputRenderer::new(cli.global.json, colors_enabled(cli.global.color));
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        let _ = renderer.render_error(&e);
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    // Usage problems end the run before anything touches the repository
    let commit_range = cli.commit_range()?;

    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);

    init_tracing(cli.global.json, cli.global.debug, &config.logs_path());
    info!("Starting casket v{}", env!("CARGO_PKG_VERSION"));

    let (event_sender, event_receiver) = casket_events::channel();
    let ops_ctx = OpsContextBuilder::new()
        .with_config(config.clone())
        .with_event_sender(event_sender)
        .build()?;

    let colors = colors_enabled(Some(config.general.color));
    let mut event_handler = EventHandler::new(colors, cli.global.debug, cli.global.json);
    let renderer = OutputRenderer::new(cli.global.json, colors);

    let request = AuditRequest {
        commit_range,
        cleanup: cli.cleanup,
    };
    let report =
        execute_with_events(ops_ctx, request, event_receiver, &mut event_handler).await?;

    renderer.render_report(&report)?;

    info!("Run completed successfully");
    Ok(())
}

/// Run the audit while rendering events as they arrive
async fn execute_with_events(
    ctx: OpsCtx,
    request: AuditRequest,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<RunReport, CliError> {
    let mut run_future =
        Box::pin(async move { casket_ops::audit_modified_casks(&ctx, request).await });

    loop {
        select! {
            result = &mut run_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map_err(CliError::from);
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
}

fn colors_enabled(choice: Option<ColorChoice>) -> bool {
    match choice.unwrap_or_default() {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    }
}

/// Initialize tracing/logging; debug logs go to a timestamped file in `log_dir`
fn init_tracing(json_mode: bool, debug_flag: bool, log_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Some(file) = create_log_file(log_dir) {
            tracing_subscriber::fmt()
                .json()
                .with_writer(file.1)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new("info,casket=debug,casket_ops=debug")
                    }),
                )
                .init();
            if !json_mode {
                eprintln!("Debug logging enabled: {}", file.0.display());
            }
            return;
        }
    }

    if json_mode {
        // JSON mode: keep stdout clean for the report
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: events are rendered by the handler; keep the log quiet
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::new("error,casket=off"))
            .without_time()
            .with_target(false)
            .init();
    }
}

fn create_log_file(log_dir: &Path) -> Option<(std::path::PathBuf, std::fs::File)> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Warning: Failed to create log directory: {e}");
        return None;
    }
    let path = log_dir.join(format!(
        "casket-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));
    match std::fs::File::create(&path) {
        Ok(file) => Some((path, file)),
        Err(e) => {
            eprintln!("Warning: Failed to create log file: {e}");
            None
        }
    }
}
