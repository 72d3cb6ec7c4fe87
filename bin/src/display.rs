//! Display utilities and output formatting for the orecheck CLI.

use anyhow::Result;
use clap::ValueEnum;
use orecheck_lib::prelude::*;
use serde::Serialize;

/// Output format for command results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
}

/// Availability of a single plugin id.
#[derive(Serialize)]
pub(crate) struct Availability {
    pub(crate) id: PackageId,
    pub(crate) available: bool,
}

/// Print the result of `orecheck check`.
pub(crate) fn print_availability(results: &[Availability], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(results)?),
        Format::Table => {
            println!("{:<30} {:<10}", "ID", "ON ORE");
            println!("{}", "-".repeat(41));

            for result in results {
                let on_ore = if result.available { "yes" } else { "no" };
                println!("{:<30} {:<10}", result.id, on_ore);
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    report: &'a ScanReport,
    checkable: &'a [PackageCandidate],
}

/// Print the checkable set and report of a finished scan.
pub(crate) fn print_scan(
    checkable: &CheckableSet,
    report: &ScanReport,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let output = ScanOutput {
                report,
                checkable: checkable.as_slice(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Table => {
            if checkable.is_empty() {
                println!("No plugins available for update checks.");
            } else {
                println!("{:<30} {:<30} {:<15}", "ID", "NAME", "VERSION");
                println!("{}", "-".repeat(77));

                for candidate in checkable {
                    println!(
                        "{:<30} {:<30} {:<15}",
                        candidate.id(),
                        candidate.name(),
                        candidate.version().unwrap_or("-")
                    );
                }
            }

            println!(
                "\nProbed {} plugins in {} ms: {} available, {} failed requests",
                report.probed,
                report.elapsed().num_milliseconds(),
                report.available,
                report.errors
            );

            if report.connectivity_down {
                println!(
                    "Every request failed. Check your internet connection and run the scan again."
                );
            }
        }
    }

    Ok(())
}
