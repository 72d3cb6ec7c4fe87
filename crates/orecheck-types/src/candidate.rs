//! Package candidate definitions.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Unique identifier of a package within its host ecosystem (e.g., "nucleus").
///
/// The identifier is opaque to orecheck; it is only ever substituted into
/// repository URLs and compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Creates a new package identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PackageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A package known to the host, eligible for an availability probe.
///
/// Candidates are handed to orecheck as a fixed collection and are never
/// mutated by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCandidate {
    /// Unique identifier (e.g., "nucleus").
    id: PackageId,
    /// Human-readable name (e.g., "Nucleus").
    name: String,
    /// Installed version, if the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl PackageCandidate {
    /// Creates a new candidate without version information.
    #[must_use]
    pub fn new(id: impl Into<PackageId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Sets the installed version of the candidate.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns the package identifier.
    #[must_use]
    pub const fn id(&self) -> &PackageId {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the installed version, if known.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Renders the label used in log lines, e.g. `Nucleus 2.1.4 (nucleus)`.
impl std::fmt::Display for PackageCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {} ({})", self.name, version, self.id),
            None => write!(f, "{} ({})", self.name, self.id),
        }
    }
}
