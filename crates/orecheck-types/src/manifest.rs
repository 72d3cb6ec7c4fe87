//! Candidate manifest loading.
//!
//! A manifest is a JSON array of candidates:
//!
//! ```json
//! [
//!   { "id": "nucleus", "name": "Nucleus", "version": "2.1.4" },
//!   { "id": "luckperms", "name": "LuckPerms" }
//! ]
//! ```

use crate::{OrecheckError, PackageCandidate, Result};
use std::fs;
use std::path::Path;

/// Parses a candidate manifest from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a candidate has an empty id.
///
/// # Example
///
/// ```
/// use orecheck_types::parse_manifest;
///
/// let candidates = parse_manifest(r#"[{"id": "nucleus", "name": "Nucleus"}]"#).unwrap();
/// assert_eq!(candidates[0].id().as_str(), "nucleus");
/// ```
pub fn parse_manifest(json: &str) -> Result<Vec<PackageCandidate>> {
    let candidates: Vec<PackageCandidate> = serde_json::from_str(json)?;

    if let Some(index) = candidates
        .iter()
        .position(|c| c.id().as_str().trim().is_empty())
    {
        return Err(OrecheckError::EmptyId { index });
    }

    Ok(candidates)
}

/// Reads and parses a candidate manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid manifest.
pub fn load_manifest(path: &Path) -> Result<Vec<PackageCandidate>> {
    let json = fs::read_to_string(path).map_err(|e| OrecheckError::ReadManifest {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_manifest(&json)
}
