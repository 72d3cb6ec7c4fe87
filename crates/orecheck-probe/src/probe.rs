//! Availability checks with transport failure accounting.

use crate::{ProbeClient, ProbeError};
use async_trait::async_trait;
use orecheck_types::{PackageCandidate, PackageId};
use reqwest::StatusCode;
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace, warn};

/// A remote repository that can be asked whether a project exists.
#[async_trait]
pub trait RepositoryProbe: Send + Sync + std::fmt::Debug {
    /// Looks up a project and returns the response status.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure, i.e. when no status could
    /// be obtained at all.
    async fn status(&self, id: &PackageId) -> Result<StatusCode, ProbeError>;
}

#[async_trait]
impl RepositoryProbe for ProbeClient {
    async fn status(&self, id: &PackageId) -> Result<StatusCode, ProbeError> {
        self.project_status(id).await
    }
}

/// Count of failed probe attempts within one scan.
///
/// Shared by every probe of a scan; increments are atomic so none is lost
/// under concurrent execution.
#[derive(Debug, Default)]
pub struct ErrorCounter(AtomicUsize);

impl ErrorCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    /// Returns the current number of failures.
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Sets the counter back to zero.
    pub fn reset(&self) {
        self.0.store(0, Ordering::SeqCst);
    }

    /// Records one failure and returns the count before it.
    pub fn record(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Checks whether a candidate is published on the repository.
///
/// Returns `true` iff the repository answered `200 OK`. Any other status is a
/// clean "not available". Transport failures are recorded on `errors`, logged
/// and reported as `false`; they never reach the caller. Only the first
/// failure since the last reset is logged with its full error chain, later
/// ones log the failure kind so a global outage does not flood the log.
pub async fn check<P>(probe: &P, candidate: &PackageCandidate, errors: &ErrorCounter) -> bool
where
    P: RepositoryProbe + ?Sized,
{
    trace!(candidate = %candidate, "Started checking if package is available on Ore");

    match probe.status(candidate.id()).await {
        Ok(status) if status == StatusCode::OK => {
            debug!(candidate = %candidate, "Package is available on Ore");
            true
        }
        Ok(status) => {
            trace!(candidate = %candidate, %status, "Package is NOT available on Ore");
            false
        }
        Err(e) => {
            if errors.record() == 0 {
                warn!(
                    candidate = %candidate,
                    error = %error_chain(&e),
                    "Could not contact the Ore repository API"
                );
            } else {
                warn!(
                    candidate = %candidate,
                    kind = e.kind(),
                    "Could not contact the Ore repository API"
                );
            }
            false
        }
    }
}

/// Renders an error with all of its sources, outermost first.
fn error_chain(error: &ProbeError) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
