//! Progress-callback trait for per-document load events.
//!
//! Inject an [`Arc<dyn LoadProgressCallback>`] via
//! [`crate::config::EngineConfigBuilder::progress_callback`] to receive
//! real-time events as the catalog loader fetches each content file.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a log sink, or a terminal progress bar without
//! the library knowing anything about how the host application communicates.
//! The trait is `Send + Sync` so it works correctly when documents are fetched
//! concurrently.

use std::sync::Arc;

/// Called by the catalog loader as it fetches each content file.
///
/// Implementations must be `Send + Sync` (documents are fetched concurrently).
/// All methods have default no-op implementations so callers only override
/// what they care about.
///
/// # Thread safety
///
/// `on_document_start`, `on_document_loaded`, and `on_document_failed` may be
/// called concurrently from different tasks. Implementations must protect
/// shared mutable state with appropriate synchronisation primitives.
pub trait LoadProgressCallback: Send + Sync {
    /// Called once after the manifest is parsed, before any document fetch.
    fn on_load_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called just before a document fetch is issued.
    fn on_document_start(&self, filename: &str, total_documents: usize) {
        let _ = (filename, total_documents);
    }

    /// Called when a document is fetched and parsed.
    ///
    /// `body_len` is the byte length of the frontmatter-stripped body.
    fn on_document_loaded(&self, filename: &str, total_documents: usize, body_len: usize) {
        let _ = (filename, total_documents, body_len);
    }

    /// Called when a document fetch fails.
    fn on_document_failed(&self, filename: &str, total_documents: usize, error: &str) {
        let _ = (filename, total_documents, error);
    }

    /// Called once after every listed document has been attempted.
    fn on_load_complete(&self, total_documents: usize, loaded_count: usize) {
        let _ = (total_documents, loaded_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopLoadProgress;

impl LoadProgressCallback for NoopLoadProgress {}

/// Convenience alias matching the type stored in [`crate::config::EngineConfig`].
pub type ProgressCallback = Arc<dyn LoadProgressCallback>;
