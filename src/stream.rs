//! Streaming load API: emit products as they complete.
//!
//! ## Why stream?
//!
//! Large catalogs over a slow origin take a while. A streams-based API lets
//! callers surface cards immediately or feed a progress display instead of
//! waiting for the whole fan-in. Unlike the eager
//! [`crate::load::load_catalog`], which returns only after all files finish,
//! [`load_products_stream`] yields each [`Product`] via a `Stream` as its
//! fetch completes. Products arrive in completion order, not manifest order —
//! re-sort by [`Product::date_key`] if order matters.

use crate::catalog::Product;
use crate::config::EngineConfig;
use crate::error::{DocumentError, FolioError};
use crate::pipeline::{manifest, source::ContentSource};
use futures::stream::{self, StreamExt};
use std::pin::Pin;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of per-document load results.
pub type ProductStream = Pin<Box<dyn Stream<Item = Result<Product, DocumentError>> + Send>>;

/// Load the manifest eagerly, then stream each listed document as it loads.
///
/// # Returns
/// - `Ok(ProductStream)` — a stream of `Result<Product, DocumentError>`
/// - `Err(FolioError)` — fatal error (manifest missing or unparsable)
pub async fn load_products_stream(
    source: &ContentSource,
    config: &EngineConfig,
) -> Result<ProductStream, FolioError> {
    info!("Starting streaming load from {}", source.locate(""));

    // ── Fetch and parse the manifest ─────────────────────────────────────
    let manifest_raw = source
        .fetch_text(&config.manifest_file)
        .await
        .map_err(|e| source.manifest_error(&config.manifest_file, e))?;
    let files = manifest::parse_manifest(&manifest_raw)?;

    // ── Build the stream ─────────────────────────────────────────────────
    let source = source.clone();
    let products_dir = config.products_dir.clone();
    let concurrency = config.concurrency;

    let s = stream::iter(files.into_iter().map(move |filename| {
        let source = source.clone();
        let rel = format!("{products_dir}/{filename}");
        async move {
            let raw = source
                .fetch_text(&rel)
                .await
                .map_err(|e| e.with_filename(&filename))?;
            Ok(Product::from_raw(filename, &raw))
        }
    }))
    .buffer_unordered(concurrency);

    Ok(Box::pin(s))
}
