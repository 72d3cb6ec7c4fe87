//! Availability scan lifecycle.

use serde::{Deserialize, Serialize};

/// State of a single availability scan.
///
/// A scan moves `NotStarted -> InProgress -> Completed` and never leaves
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    /// The scan has not run yet.
    #[default]
    NotStarted,
    /// Probes are in flight.
    InProgress,
    /// The checkable set has been built.
    Completed,
}

impl ScanState {
    /// Returns true if the checkable set has been built.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the state as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
