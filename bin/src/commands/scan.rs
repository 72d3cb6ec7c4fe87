//! Scan command implementation.
//!
//! Loads a candidate manifest, hands it to a scheduling controller and waits
//! for the delayed scan to finish. Ctrl-C stops the controller.

use crate::display::{Format, print_scan};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use orecheck_lib::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

/// Run one scheduled availability scan and print the checkable set.
pub(crate) async fn scan(
    manifest: &Path,
    probe_config: ProbeConfig,
    scan_config: ScanConfig,
    delay: Duration,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let candidates = load_manifest(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;
    let count = candidates.len();
    info!(count, manifest = %manifest.display(), "Loaded candidates");

    let client = ProbeClient::new(probe_config).context("Failed to create HTTP client")?;
    let controller = SchedulingController::new(
        Handle::current(),
        Arc::new(client),
        scan_config,
        ScheduleConfig {
            startup_delay: delay,
            ..Default::default()
        },
    );

    controller
        .start(candidates)
        .context("Failed to schedule the availability scan")?;
    let scanner = controller
        .scanner()
        .context("Controller has no scanner after start")?;
    let mut state = scanner.subscribe();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    loop {
        let current = *state.borrow_and_update();
        match current {
            ScanState::NotStarted => progress.set_message(format!(
                "Scan of {count} plugins starts in {}s",
                delay.as_secs()
            )),
            ScanState::InProgress => progress.set_message(format!("Probing {count} plugins")),
            ScanState::Completed => break,
        }

        tokio::select! {
            changed = state.changed() => changed.context("Scanner went away")?,
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                progress.abandon_with_message("Interrupted");
                controller.stop();
                return Ok(());
            }
        }
    }

    progress.finish_and_clear();
    controller.shutdown().await?;

    let checkable = scanner
        .checkable()
        .context("Scan completed without a checkable set")?;
    let report = scanner
        .report()
        .context("Scan completed without a report")?;

    print_scan(&checkable, &report, format)
}
