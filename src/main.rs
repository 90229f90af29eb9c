//! anno-autosave - Main entry point
//!
//! Parses arguments, resolves the configuration and runs the capture loop
//! until the requested count is reached or the user interrupts it.

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use anno_autosave::cli::Cli;
use anno_autosave::input::{DryRunDriver, PointerDriver};
use anno_autosave::logging::init_logging;
use anno_autosave::schedule::SystemClock;
use anno_autosave::shutdown::{self, ShutdownFlag};
use anno_autosave::{CaptureConfig, CaptureLoop, CaptureSummary, StopReason};

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let config = CaptureConfig::from_cli(&cli)?;

    if let Some(path) = &cli.save_config {
        config.save_to_file(path)?;
        info!("Configuration written to {:?}", path);
        println!("✓ Configuration saved to {:?}", path);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    let shutdown = ShutdownFlag::new();
    if let Err(e) = shutdown::install_handler(&shutdown) {
        // Without the handler Ctrl+C still terminates the process, just not between steps.
        warn!("Failed to install interrupt handler: {}", e);
    }

    let driver = create_driver(cli.dry_run)?;
    info!("Using {} pointer driver", driver.name());

    println!(
        "Saving to {} every {} seconds.",
        config.output_path.display(),
        config.interval_secs
    );

    let mut capture = CaptureLoop::new(config, driver, SystemClock::new(), shutdown);
    let summary = capture.run()?;
    report(&summary);

    Ok(())
}

fn create_driver(dry_run: bool) -> Result<Box<dyn PointerDriver>> {
    if dry_run {
        return Ok(Box::new(DryRunDriver::new()));
    }

    #[cfg(feature = "enigo")]
    {
        let driver = anno_autosave::EnigoDriver::new()
            .context("Could not set up mouse input (grant accessibility access or use --dry-run)")?;
        Ok(Box::new(driver))
    }

    #[cfg(not(feature = "enigo"))]
    {
        anyhow::bail!("built without mouse input support; rerun with --dry-run")
    }
}

fn report(summary: &CaptureSummary) {
    let reason = match summary.stop_reason {
        StopReason::CountReached => "requested count reached",
        StopReason::Interrupted => "interrupted",
    };
    info!(
        "Stopped ({}): {} capture(s), {} bytes copied, next index {}",
        reason, summary.captures, summary.bytes_copied, summary.next_index
    );
    if let Some(last) = &summary.last_snapshot {
        println!("✓ {} savegame(s) captured, last: {}", summary.captures, last.display());
    } else {
        println!("No savegames captured");
    }
}
