//! Discovers which installed Sponge plugins are published on the Ore repository.
//!
//! This is a facade crate that re-exports functionality from the orecheck
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use orecheck_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let probe = Arc::new(ProbeClient::with_defaults()?);
//!     let candidates = load_manifest("plugins.json".as_ref())?;
//!
//!     let scanner = AvailabilityScanner::new(candidates, probe, ScanConfig::default());
//!     scanner.run().await;
//!
//!     for candidate in &scanner.checkable().unwrap_or_default() {
//!         println!("{candidate} can be checked for updates");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/AuraDevelopmentTeam/orecheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use orecheck_types::*;

// Re-export probing
#[cfg(feature = "probe")]
pub use orecheck_probe::{
    ErrorCounter, ProbeClient, ProbeConfig, ProbeError, RepositoryProbe, StatusCode, check, url,
};

// Re-export scanning and scheduling
#[cfg(feature = "scan")]
pub use orecheck_scan::{
    AvailabilityScanner, ScanConfig, ScanOutcome, ScanReport, ScheduleConfig,
    SchedulingController, TaskId,
};

/// Prelude module for convenient imports.
///
/// ```
/// use orecheck_lib::prelude::*;
/// ```
pub mod prelude {
    pub use orecheck_types::{
        CheckableSet, OrecheckError, PackageCandidate, PackageId, Result, ScanState,
        load_manifest, parse_manifest,
    };

    #[cfg(feature = "probe")]
    pub use orecheck_probe::{ProbeClient, ProbeConfig, RepositoryProbe};

    #[cfg(feature = "scan")]
    pub use orecheck_scan::{
        AvailabilityScanner, ScanConfig, ScanOutcome, ScanReport, ScheduleConfig,
        SchedulingController,
    };
}
