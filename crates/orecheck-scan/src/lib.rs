//! Availability scanning and background scheduling for orecheck.
//!
//! - [`AvailabilityScanner`] - Runs one discovery cycle over a candidate set
//! - [`ScanConfig`] - Fan-out bound for a scan
//! - [`ScanReport`] / [`ScanOutcome`] - Result of a `run` call
//! - [`SchedulingController`] - Delayed, cancellable background scans
//! - [`ScheduleConfig`] - Startup delay and task naming
//! - [`TaskId`] - Identifier of a scheduled task

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/AuraDevelopmentTeam/orecheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod scanner;
mod scheduler;
mod task;
#[cfg(test)]
mod testing;

pub use scanner::{AvailabilityScanner, ScanConfig, ScanOutcome, ScanReport};
pub use scheduler::{ScheduleConfig, SchedulingController};
pub use task::TaskId;
