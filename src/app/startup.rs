//! Application startup
//!
//! The command line is read first so `--config-file` can point at the
//! configuration file; file values are then overlaid by command line values.
//! Logging starts once both are merged.

use std::io::IsTerminal;

use clap::Parser;
use tokio::sync::broadcast;

use super::cli::{Args, ScanSettings};
use crate::core::error_handling::{fatal_message, log_error_with_context};
use crate::core::logging::{init_logging, level_from_verbosity};
use crate::core::shutdown::ShutdownCoordinator;
use crate::display::{stdout_renderer, Renderer};
use crate::scanner::controller::{ControllerConfig, ScanController};
use crate::scanner::polling::PollingTask;
use crate::scanner::runner::{run_scan, RunSummary};
use crate::scanner::source::ReplaySource;
use crate::scanner::ScanOutcome;

/// Initialize and run the application, returning the process exit status
pub async fn startup() -> i32 {
    let cli = Args::parse();

    let mut args = match Args::load_config_file(cli.config_file.as_deref()).await {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", fatal_message(&e, "Loading configuration"));
            return 1;
        }
    };
    args.merge_cli(cli);

    let use_color = args.use_color(std::io::stdout().is_terminal());
    let log_file = args
        .effective_log_file()
        .map(|path| path.to_string_lossy().to_string());
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| level_from_verbosity(args.verbosity()).to_string());
    let log_color = log_file.is_none() && args.use_color(std::io::stderr().is_terminal());

    if let Err(e) = init_logging(
        Some(&log_level),
        args.log_format.as_deref(),
        log_file.as_deref(),
        log_color,
    ) {
        eprintln!("Error initializing logging: {}", e);
        return 1;
    }

    log::info!(
        "{} {} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    for key in &args.ignored_config_keys {
        log::warn!("Ignoring unknown configuration key '{}'", key);
    }
    log::debug!("Final arguments: {:?}", args);

    let settings = match args.validate() {
        Ok(settings) => settings,
        Err(e) => {
            log_error_with_context(&e, "Validating arguments");
            return 1;
        }
    };

    let (coordinator, shutdown_rx) = ShutdownCoordinator::new();
    coordinator.listen_for_signals();

    let mut renderer = stdout_renderer(settings.output_format, use_color);
    match run(&settings, renderer.as_mut(), shutdown_rx).await {
        Ok(summary) => {
            log::info!(
                "Scan ended ({:?}) after {} polls: {}",
                summary.stop_reason,
                summary.ticks,
                summary.stats
            );
            0
        }
        Err(e) => {
            log_error_with_context(&e, "Scanning");
            1
        }
    }
}

/// Open the frame source named by `settings` and run one scanning session
pub async fn run(
    settings: &ScanSettings,
    renderer: &mut dyn Renderer,
    shutdown_rx: broadcast::Receiver<()>,
) -> ScanOutcome<RunSummary> {
    let mut source = ReplaySource::from_input(settings.input.as_ref()).await?;
    let task = PollingTask::new(settings.interval)?;
    let mut controller = ScanController::new(ControllerConfig {
        cooldown: settings.cooldown,
        export_path: settings.export.clone(),
    });

    run_scan(&mut source, &mut controller, renderer, &task, shutdown_rx).await
}
