//! Ore repository URL construction.

use orecheck_types::PackageId;

/// Base URL of the Ore repository API.
pub const API_BASE: &str = "https://ore.spongepowered.org/api";

/// Builds the project lookup URL for a package.
///
/// URL format: `{base}/projects/{id}`
///
/// The id is percent-encoded as a single path segment, so `/`, `?` and `#`
/// inside an id can never address another resource.
///
/// # Example
///
/// ```
/// use orecheck_probe::url::{API_BASE, project_url};
/// use orecheck_types::PackageId;
///
/// let url = project_url(API_BASE, &PackageId::new("nucleus"));
/// assert_eq!(url, "https://ore.spongepowered.org/api/projects/nucleus");
/// ```
#[must_use]
pub fn project_url(base: &str, id: &PackageId) -> String {
    format!(
        "{}/projects/{}",
        base.trim_end_matches('/'),
        path_segment(id.as_str())
    )
}

/// Percent-encodes `raw` for use as exactly one path segment.
fn path_segment(raw: &str) -> String {
    match raw {
        // Dot segments are collapsed by URL normalization
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => urlencoding::encode(raw).into_owned(),
    }
}
