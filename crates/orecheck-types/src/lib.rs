//! Core types for the orecheck package availability scanner.
//!
//! This crate provides the data structures shared across orecheck:
//!
//! - [`PackageId`] - Opaque identifier of a package within its ecosystem
//! - [`PackageCandidate`] - A known package eligible for an availability probe
//! - [`CheckableSet`] - Candidates confirmed available on the repository
//! - [`ScanState`] - Lifecycle of a single availability scan
//! - [`load_manifest`] - Reads a candidate list from a JSON manifest

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/AuraDevelopmentTeam/orecheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candidate;
mod checkable;
mod error;
mod manifest;
mod state;

pub use candidate::{PackageCandidate, PackageId};
pub use checkable::CheckableSet;
pub use error::{OrecheckError, Result};
pub use manifest::{load_manifest, parse_manifest};
pub use state::ScanState;
