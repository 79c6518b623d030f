//! Manifest and project-index parsing.
//!
//! The manifest is deliberately minimal: an ordered JSON array of Markdown
//! filenames. The project index is a JSON array of [`Project`] objects with
//! camelCase field names on the wire; both are plain serde targets.

use crate::catalog::Project;
use crate::error::FolioError;

/// Parse the manifest into the ordered list of content filenames.
pub fn parse_manifest(raw: &str) -> Result<Vec<String>, FolioError> {
    serde_json::from_str(raw).map_err(|e| FolioError::ManifestParseFailed {
        detail: e.to_string(),
    })
}

/// Parse the project index.
///
/// Callers treat a parse failure as non-fatal (empty project list); the
/// error is still typed so the CLI can surface the detail when asked.
pub fn parse_project_index(raw: &str) -> Result<Vec<Project>, FolioError> {
    serde_json::from_str(raw).map_err(|e| FolioError::ManifestParseFailed {
        detail: e.to_string(),
    })
}
