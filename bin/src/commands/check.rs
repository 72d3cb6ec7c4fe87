//! Check command implementation.
//!
//! Probes a handful of plugin ids right away, without scheduling.

use crate::display::{Availability, Format, print_availability};
use anyhow::{Context, Result};
use futures::future::join_all;
use orecheck_lib::prelude::*;
use orecheck_lib::{ErrorCounter, check};

/// Probe each id once and print whether it exists on Ore.
pub(crate) async fn check_ids(ids: &[String], config: ProbeConfig, format: Format) -> Result<()> {
    let client = ProbeClient::new(config).context("Failed to create HTTP client")?;
    let errors = ErrorCounter::new();

    let candidates: Vec<PackageCandidate> = ids
        .iter()
        .map(|id| PackageCandidate::new(id.as_str(), id.as_str()))
        .collect();

    let results = join_all(candidates.iter().map(|candidate| {
        let client = &client;
        let errors = &errors;
        async move {
            Availability {
                id: candidate.id().clone(),
                available: check(client, candidate, errors).await,
            }
        }
    }))
    .await;

    print_availability(&results, format)?;

    if errors.get() > 0 {
        eprintln!("{} of {} requests failed", errors.get(), results.len());
    }

    Ok(())
}
