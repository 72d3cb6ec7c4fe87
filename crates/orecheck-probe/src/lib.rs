//! Repository API probing for the orecheck package availability scanner.
//!
//! This crate provides the per-package existence check:
//!
//! - [`url::project_url`] - Constructs Ore project API URLs
//! - [`ProbeClient`] - HTTP client with the probe's fixed timeouts
//! - [`RepositoryProbe`] - Seam over the remote repository
//! - [`ErrorCounter`] - Scan-scoped count of transport failures
//! - [`check`] - Infallible availability check for one candidate

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/AuraDevelopmentTeam/orecheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod probe;
pub mod url;

pub use client::{ProbeClient, ProbeConfig, ProbeError};
pub use probe::{ErrorCounter, RepositoryProbe, check};
pub use reqwest::StatusCode;
