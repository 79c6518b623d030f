//! Error types for the foliogen library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`FolioError`] — **Fatal**: the catalog cannot be loaded at all
//!   (manifest missing, content root invalid, every document failed).
//!   Returned as `Err(FolioError)` from the top-level `load_*` functions.
//!
//! * [`DocumentError`] — **Non-fatal**: a single content file failed (network
//!   blip, missing file) but the rest of the catalog is fine. Collected in
//!   [`crate::catalog::Catalog::failures`] so callers can inspect partial
//!   success rather than losing the whole catalog to one bad file.
//!
//! Malformed frontmatter and malformed Markdown are deliberately *not* errors
//! anywhere in this crate: both degrade to a best-effort result (empty
//! metadata, imperfect HTML). Unknown slugs are rendered as a not-found
//! notice by the `site` templates, never raised.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the foliogen library.
///
/// Per-document failures use [`DocumentError`] and are stored in
/// [`crate::catalog::Catalog::failures`] rather than propagated here.
#[derive(Debug, Error)]
pub enum FolioError {
    // ── Content-root errors ───────────────────────────────────────────────
    /// The content root is neither an existing directory nor an HTTP(S) URL.
    #[error("Invalid content root '{input}': not a directory or a valid HTTP/HTTPS URL")]
    InvalidContentRoot { input: String },

    // ── Manifest errors ───────────────────────────────────────────────────
    /// The manifest file was not found at the local content root.
    #[error("Manifest not found: '{path}'\nExpected a JSON list of Markdown filenames at the content root.")]
    ManifestNotFound { path: PathBuf },

    /// Fetching the manifest from a remote content root failed.
    #[error("Failed to fetch manifest '{url}': {reason}\nCheck the content root URL and your connection.")]
    ManifestFetchFailed { url: String, reason: String },

    /// The manifest was fetched but is not a JSON array of strings.
    #[error("Manifest is not a JSON array of filenames: {detail}")]
    ManifestParseFailed { detail: String },

    // ── Load errors ───────────────────────────────────────────────────────
    /// Every listed document failed to load; the catalog would be empty.
    #[error("All {total} content files failed to load.\nFirst error: {first_error}")]
    AllDocumentsFailed { total: usize, first_error: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single content file.
///
/// Stored in [`crate::catalog::Catalog::failures`] when a document fails.
/// The overall load continues unless ALL documents fail.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// Fetching or reading the file failed.
    #[error("'{filename}': fetch failed: {detail}")]
    FetchFailed { filename: String, detail: String },

    /// The fetch exceeded the configured timeout.
    #[error("'{filename}': fetch timed out after {secs}s")]
    Timeout { filename: String, secs: u64 },
}

impl DocumentError {
    /// The content filename this error refers to.
    pub fn filename(&self) -> &str {
        match self {
            DocumentError::FetchFailed { filename, .. } => filename,
            DocumentError::Timeout { filename, .. } => filename,
        }
    }

    /// Rewrite the filename; loaders report manifest-relative names rather
    /// than the fetch path.
    pub(crate) fn with_filename(mut self, name: &str) -> Self {
        match &mut self {
            DocumentError::FetchFailed { filename, .. } => *filename = name.to_string(),
            DocumentError::Timeout { filename, .. } => *filename = name.to_string(),
        }
        self
    }
}
