//! Application startup: arguments, configuration, logging and the demo run

use crate::app::cli::{load_config, Args, LogSettings, Settings};
use crate::app::demo;
use crate::app::error::{AppError, AppResult};
use crate::app::summary::print_summary;
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use crate::core::version::version_line;
use clap::Parser;
use std::io::IsTerminal;

/// Initialize application startup and run to completion
///
/// Exits with status 1 on configuration or runtime errors.
pub fn startup() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> AppResult<()> {
    let config = load_config(args.config_file.as_deref())?;
    let settings = Settings::resolve(args, config.as_ref())?;

    let use_color = use_color(&settings.log);
    init_logging(
        &settings.log.level,
        settings.log.format,
        settings.log.file.as_deref(),
        use_color,
    )?;
    log::info!("{}", version_line());
    log::debug!("Resolved settings: {:?}", settings);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    let report = runtime.block_on(async {
        let (coordinator, _shutdown_rx) = ShutdownCoordinator::new();
        coordinator.install_signal_handlers();
        demo::run(settings.demo.clone(), coordinator).await
    })?;

    print_summary(&report, use_color);
    Ok(())
}

// Explicit choice wins; otherwise colour only when stdout is a terminal
fn use_color(log: &LogSettings) -> bool {
    log.color
        .unwrap_or_else(|| std::io::stdout().is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_color_choice_wins() {
        let mut log = LogSettings::default();
        log.color = Some(true);
        assert!(use_color(&log));

        log.color = Some(false);
        assert!(!use_color(&log));
    }

    #[test]
    fn test_missing_config_file_fails_before_logging() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            config_file: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };

        match run(&args) {
            Err(AppError::ConfigNotFound { .. }) => {}
            other => panic!("Expected ConfigNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
