//! Error types for orecheck.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for orecheck operations.
pub type Result<T> = std::result::Result<T, OrecheckError>;

/// Errors that can occur while preparing or running an availability scan.
#[derive(Error, Debug)]
pub enum OrecheckError {
    /// Failed to read a candidate manifest.
    #[error("Failed to read manifest '{path}': {source}")]
    ReadManifest {
        /// The manifest path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or has the wrong shape.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    /// A candidate in the manifest has an empty id.
    #[error("Candidate #{index} has an empty id")]
    EmptyId {
        /// Zero-based position of the candidate in the manifest.
        index: usize,
    },

    /// A background task failed to run to completion.
    #[error("Background task failed: {0}")]
    Task(String),
}
