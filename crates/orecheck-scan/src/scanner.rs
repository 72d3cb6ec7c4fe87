//! One availability discovery cycle.

use chrono::{DateTime, Utc};
use futures::future;
use futures::stream::{self, StreamExt};
use orecheck_probe::{ErrorCounter, RepositoryProbe, check};
use orecheck_types::{CheckableSet, PackageCandidate, ScanState};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Configuration for an availability scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of probes in flight at once.
    pub concurrency: usize,
}

impl ScanConfig {
    /// Default fan-out bound.
    pub const DEFAULT_CONCURRENCY: usize = 64;
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }
}

/// Summary of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Number of distinct candidates probed.
    pub probed: usize,
    /// Number of candidates found on the repository.
    pub available: usize,
    /// Number of probes that failed at the transport level.
    pub errors: usize,
    /// True if every probe failed, which usually means the host is offline.
    pub connectivity_down: bool,
    /// When probing started.
    pub started_at: DateTime<Utc>,
    /// When the checkable set was finalized.
    pub finished_at: DateTime<Utc>,
}

impl ScanReport {
    /// Returns the wall-clock duration of the scan.
    #[must_use]
    pub fn elapsed(&self) -> chrono::TimeDelta {
        self.finished_at - self.started_at
    }
}

/// Result of [`AvailabilityScanner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// This call performed the scan.
    Completed(ScanReport),
    /// An earlier call already performed the scan; nothing was probed.
    AlreadyChecked,
}

impl ScanOutcome {
    /// Returns the report if this call performed the scan.
    #[must_use]
    pub const fn report(&self) -> Option<&ScanReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::AlreadyChecked => None,
        }
    }
}

/// Determines which candidates are published on the repository.
///
/// A scanner runs its scan at most once. The result is exposed through
/// [`checkable`](Self::checkable) once the state reaches
/// [`ScanState::Completed`].
#[derive(Debug)]
pub struct AvailabilityScanner {
    candidates: Vec<PackageCandidate>,
    probe: Arc<dyn RepositoryProbe>,
    config: ScanConfig,
    errors: ErrorCounter,
    run_lock: Mutex<()>,
    state: watch::Sender<ScanState>,
    checkable: OnceLock<CheckableSet>,
    report: OnceLock<ScanReport>,
}

impl AvailabilityScanner {
    /// Creates a scanner over a fixed candidate collection.
    #[must_use]
    pub fn new(
        candidates: Vec<PackageCandidate>,
        probe: Arc<dyn RepositoryProbe>,
        config: ScanConfig,
    ) -> Self {
        let (state, _) = watch::channel(ScanState::NotStarted);
        Self {
            candidates,
            probe,
            config,
            errors: ErrorCounter::new(),
            run_lock: Mutex::new(()),
            state,
            checkable: OnceLock::new(),
            report: OnceLock::new(),
        }
    }

    /// Probes every candidate and builds the checkable set.
    ///
    /// Calling this again after completion is a no-op that returns
    /// [`ScanOutcome::AlreadyChecked`]. Concurrent calls are serialized, so
    /// only one of them probes.
    pub async fn run(&self) -> ScanOutcome {
        debug!("Start checking packages for availability on Ore...");

        let _guard = self.run_lock.lock().await;

        if self.state().is_completed() {
            info!("Already checked packages for availability!");
            return ScanOutcome::AlreadyChecked;
        }

        let started_at = Utc::now();
        self.state.send_replace(ScanState::InProgress);
        self.errors.reset();

        let distinct = self.distinct_candidates();
        let probed = distinct.len();
        let probe = self.probe.as_ref();
        let errors = &self.errors;

        let available: Vec<PackageCandidate> = stream::iter(distinct)
            .map(move |candidate: PackageCandidate| async move {
                check(probe, &candidate, errors).await.then_some(candidate)
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .filter_map(future::ready)
            .collect()
            .await;

        let checkable = CheckableSet::new(available);
        let error_count = self.errors.get();
        let connectivity_down = probed > 0 && error_count >= probed;

        if connectivity_down {
            warn!(
                errors = error_count,
                "It appears that your internet connection is down or not working properly, \
                 because all HTTPS requests failed"
            );
            info!("Once it is working again, reload orecheck to re-enable update checking");
        }

        let report = ScanReport {
            probed,
            available: checkable.len(),
            errors: error_count,
            connectivity_down,
            started_at,
            finished_at: Utc::now(),
        };

        // Only reachable once per scanner: `run_lock` is held and the state
        // was not yet completed.
        let stored_set = self.checkable.set(checkable).is_ok();
        let stored_report = self.report.set(report.clone()).is_ok();
        debug_assert!(stored_set && stored_report, "scan result stored twice");
        self.state.send_replace(ScanState::Completed);

        debug!("Finished checking packages for availability on Ore!");
        debug!(
            available = report.available,
            "{} packages available for update checks!",
            report.available
        );

        ScanOutcome::Completed(report)
    }

    /// Returns the candidates with duplicate ids removed, first occurrence kept.
    fn distinct_candidates(&self) -> Vec<PackageCandidate> {
        let mut seen = HashSet::new();
        self.candidates
            .iter()
            .filter(|candidate| {
                let first = seen.insert(candidate.id());
                if !first {
                    debug!(candidate = %candidate, "Skipping duplicate candidate");
                }
                first
            })
            .cloned()
            .collect()
    }

    /// Returns the current scan state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        *self.state.borrow()
    }

    /// Returns a receiver that observes every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state.subscribe()
    }

    /// Returns the checkable set, or `None` while the scan has not completed.
    #[must_use]
    pub fn checkable(&self) -> Option<CheckableSet> {
        self.checkable.get().cloned()
    }

    /// Returns the report of the completed scan, or `None` before completion.
    #[must_use]
    pub fn report(&self) -> Option<ScanReport> {
        self.report.get().cloned()
    }

    /// Returns the number of transport failures in the current scan.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.get()
    }

    /// Returns the candidates this scanner was created with.
    #[must_use]
    pub fn candidates(&self) -> &[PackageCandidate] {
        &self.candidates
    }
}
