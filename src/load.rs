//! Eager catalog loading: fetch the manifest, fan out all content fetches
//! concurrently, and return the fully assembled [`Catalog`].
//!
//! ## Why eager vs. streaming?
//!
//! This module provides the simpler API: wait for every file, then return.
//! The whole catalog is needed before any page can be rendered (cards are
//! sorted by date across all products), so eager loading is the right default.
//! Use [`crate::stream::load_products_stream`] when products should surface
//! progressively instead.

use crate::catalog::{Catalog, Document, LoadStats, Product, Project};
use crate::config::EngineConfig;
use crate::error::{DocumentError, FolioError};
use crate::pipeline::{frontmatter, manifest, source::ContentSource};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Load the full content catalog from a content root.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(Catalog)` on success, even if some documents failed
/// (check `catalog.failures` / `catalog.stats.failed`).
///
/// # Errors
/// Returns `Err(FolioError)` only for fatal conditions:
/// - Manifest missing, unfetchable, or not a JSON array of filenames
/// - Every listed document failed to load
pub async fn load_catalog(
    source: &ContentSource,
    config: &EngineConfig,
) -> Result<Catalog, FolioError> {
    let total_start = Instant::now();
    info!("Loading catalog from {}", source.locate(""));

    // ── Step 1: Fetch and parse the manifest ─────────────────────────────
    let manifest_raw = source
        .fetch_text(&config.manifest_file)
        .await
        .map_err(|e| source.manifest_error(&config.manifest_file, e))?;
    let files = manifest::parse_manifest(&manifest_raw)?;
    info!("Manifest lists {} content files", files.len());

    if let Some(ref cb) = config.progress_callback {
        cb.on_load_start(files.len());
    }

    // ── Step 2: Fan out all document fetches ─────────────────────────────
    let fetch_start = Instant::now();
    let results = fetch_all(source, config, &files).await;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;

    // ── Step 3: Partition successes from failures ────────────────────────
    let mut products: Vec<Product> = Vec::with_capacity(results.len());
    let mut failures: Vec<DocumentError> = Vec::new();
    for result in results {
        match result {
            Ok(product) => products.push(product),
            Err(e) => failures.push(e),
        }
    }

    if !files.is_empty() && products.is_empty() {
        let first_error = failures
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(FolioError::AllDocumentsFailed {
            total: files.len(),
            first_error,
        });
    }

    // ── Step 4: Sort newest-first ────────────────────────────────────────
    // Undated or unparsable dates sort after every dated product.
    products.sort_by(|a, b| b.date_key().cmp(&a.date_key()));

    // ── Step 5: Load the optional project index ──────────────────────────
    let projects = load_projects(source, config).await;

    // ── Step 6: Assemble stats ───────────────────────────────────────────
    let stats = LoadStats {
        listed: files.len(),
        loaded: products.len(),
        failed: failures.len(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        fetch_duration_ms,
    };

    info!(
        "Catalog loaded: {}/{} documents, {} projects, {}ms total",
        stats.loaded,
        stats.listed,
        projects.len(),
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_load_complete(stats.listed, stats.loaded);
    }

    Ok(Catalog {
        products,
        projects,
        failures,
        stats,
    })
}

/// Load the catalog, downgrading any fatal error to an empty catalog.
///
/// This is the load-boundary propagation policy: nothing escapes to the
/// caller as a fault; the site degrades to its "no content" fallback and the
/// failure is reported through the log.
pub async fn load_catalog_or_empty(source: &ContentSource, config: &EngineConfig) -> Catalog {
    match load_catalog(source, config).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Catalog load failed, continuing with empty content set: {e}");
            Catalog::default()
        }
    }
}

/// Fetch and parse a single content file into a [`Document`].
///
/// Used for blog-post bodies, which are referenced by path from the project
/// index and loaded on demand rather than through the manifest.
pub async fn load_document(
    source: &ContentSource,
    rel: &str,
) -> Result<Document, DocumentError> {
    let raw = source.fetch_text(rel).await?;
    Ok(frontmatter::split_document(&raw))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Issue every document fetch through one `buffer_unordered` fan-out and
/// wait for the whole batch.
///
/// One future per file; each failure stays local to its file so a single bad
/// fetch cannot sink the batch.
async fn fetch_all(
    source: &ContentSource,
    config: &EngineConfig,
    files: &[String],
) -> Vec<Result<Product, DocumentError>> {
    let total = files.len();
    stream::iter(files.iter().map(|filename| {
        let source = source.clone();
        let filename = filename.clone();
        let rel = format!("{}/{}", config.products_dir, filename);
        let cb = config.progress_callback.clone();
        async move {
            if let Some(ref cb) = cb {
                cb.on_document_start(&filename, total);
            }
            debug!("Loading {rel}");
            let result = source
                .fetch_text(&rel)
                .await
                .map_err(|e| e.with_filename(&filename))
                .map(|raw| Product::from_raw(filename.clone(), &raw));
            if let Some(ref cb) = cb {
                match &result {
                    Ok(product) => cb.on_document_loaded(&filename, total, product.body.len()),
                    Err(e) => cb.on_document_failed(&filename, total, &e.to_string()),
                }
            }
            if let Err(ref e) = result {
                warn!("Failed to load {rel}: {e}");
            }
            result
        }
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await
}

/// Load the project index, degrading to an empty list when the file is
/// missing or unparsable. A products-only site carries no index.
async fn load_projects(source: &ContentSource, config: &EngineConfig) -> Vec<Project> {
    let raw = match source.fetch_text(&config.project_index).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!("No project index ({e}); continuing without projects");
            return Vec::new();
        }
    };
    match manifest::parse_project_index(&raw) {
        Ok(projects) => projects,
        Err(e) => {
            warn!("Project index unparsable ({e}); continuing without projects");
            Vec::new()
        }
    }
}
