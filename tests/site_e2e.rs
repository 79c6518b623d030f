//! End-to-end tests for foliogen: build a content root on disk, load the
//! catalog through the real fan-out, and render every page kind.
//!
//! Everything runs against `tempfile` directories, so the suite is hermetic
//! and needs no network or fixtures checked into the repo.

use foliogen::{
    load_catalog, load_catalog_or_empty, render_page, site, Catalog, ContentSource, EngineConfig,
    FolioError, LoadProgressCallback, PageKind,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const CHECKOUT_MD: &str = "---\n\
title: Checkout Redesign\n\
slug: checkout-redesign\n\
date: 2025-03-04\n\
category: Fintech\n\
description: Rebuilt the checkout flow.\n\
tags: [ux, payments]\n\
---\n\
# Checkout Redesign\n\
\n\
## Context\n\
Where we started.\n\
\n\
## Problem\n\
Key friction:\n\
- Drop-off at step 3\n\
- No saved cards\n\
\n\
## Solution\n\
One-page flow.\n";

const ATLAS_MD: &str = "---\n\
title: Atlas Launch\n\
slug: atlas-launch\n\
date: 2024-11-20\n\
---\n\
## Context\n\
Old platform.\n";

const PROJECTS_JSON: &str = r#"[{
    "slug": "atlas",
    "title": "Atlas",
    "description": "Internal data platform",
    "overview": {"challenge": "Silos", "solution": "One platform", "impact": "3x faster"},
    "blogPosts": [{
        "slug": "kickoff",
        "title": "Kickoff",
        "excerpt": "How it began",
        "date": "2024-10-01",
        "readTime": "4 min read",
        "content": "posts/kickoff.md"
    }]
}]"#;

/// Write a complete content root: manifest, two products, a project index,
/// and one blog post body.
fn write_content_root(dir: &Path) {
    fs::create_dir(dir.join("products")).unwrap();
    fs::create_dir(dir.join("posts")).unwrap();
    fs::write(
        dir.join("products-list.json"),
        r#"["atlas-launch.md", "checkout-redesign.md"]"#,
    )
    .unwrap();
    fs::write(dir.join("products/checkout-redesign.md"), CHECKOUT_MD).unwrap();
    fs::write(dir.join("products/atlas-launch.md"), ATLAS_MD).unwrap();
    fs::write(dir.join("projects.json"), PROJECTS_JSON).unwrap();
    fs::write(
        dir.join("posts/kickoff.md"),
        "# Kickoff\n\nFirst **real** week.\n\n- hired\n- shipped\n",
    )
    .unwrap();
}

fn source_for(dir: &TempDir) -> ContentSource {
    ContentSource::resolve(dir.path().to_str().unwrap(), 30).unwrap()
}

async fn loaded_catalog(dir: &TempDir) -> Catalog {
    load_catalog(&source_for(dir), &EngineConfig::default())
        .await
        .unwrap()
}

// ── Loading ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_loads_and_sorts_newest_first() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());

    let catalog = loaded_catalog(&dir).await;

    assert_eq!(catalog.stats.listed, 2);
    assert_eq!(catalog.stats.loaded, 2);
    assert_eq!(catalog.stats.failed, 0);
    assert!(catalog.failures.is_empty());

    // Manifest order is atlas-first; dates say checkout (2025) is newer.
    let titles: Vec<&str> = catalog.products.iter().map(|p| p.title()).collect();
    assert_eq!(titles, ["Checkout Redesign", "Atlas Launch"]);

    assert_eq!(catalog.projects.len(), 1);
    assert_eq!(catalog.projects[0].slug, "atlas");
}

#[tokio::test]
async fn one_bad_file_does_not_sink_the_batch() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    fs::write(
        dir.path().join("products-list.json"),
        r#"["atlas-launch.md", "missing.md", "checkout-redesign.md"]"#,
    )
    .unwrap();

    let catalog = loaded_catalog(&dir).await;

    assert_eq!(catalog.stats.listed, 3);
    assert_eq!(catalog.stats.loaded, 2);
    assert_eq!(catalog.stats.failed, 1);
    assert_eq!(catalog.failures.len(), 1);
    assert_eq!(catalog.failures[0].filename(), "missing.md");
}

#[tokio::test]
async fn all_files_failing_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("products-list.json"), r#"["ghost.md"]"#).unwrap();

    let err = load_catalog(&source_for(&dir), &EngineConfig::default())
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        FolioError::AllDocumentsFailed { total: 1, .. }
    ));
}

#[tokio::test]
async fn empty_manifest_loads_an_empty_catalog() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("products-list.json"), "[]").unwrap();

    let catalog = loaded_catalog(&dir).await;
    assert_eq!(catalog.stats.listed, 0);
    assert!(catalog.products.is_empty());
}

#[tokio::test]
async fn missing_manifest_downgrades_to_empty_at_the_boundary() {
    let dir = TempDir::new().unwrap();

    let err = load_catalog(&source_for(&dir), &EngineConfig::default()).await;
    assert!(matches!(err, Err(FolioError::ManifestNotFound { .. })));

    let catalog = load_catalog_or_empty(&source_for(&dir), &EngineConfig::default()).await;
    assert!(catalog.products.is_empty());
    assert!(catalog.projects.is_empty());
}

#[tokio::test]
async fn broken_project_index_degrades_to_no_projects() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    fs::write(dir.path().join("projects.json"), "{ not json").unwrap();

    let catalog = loaded_catalog(&dir).await;
    assert_eq!(catalog.stats.loaded, 2);
    assert!(catalog.projects.is_empty());
}

#[tokio::test]
async fn progress_callback_sees_every_file() {
    struct Counting {
        started: AtomicUsize,
        loaded: AtomicUsize,
        failed: AtomicUsize,
    }
    impl LoadProgressCallback for Counting {
        fn on_document_start(&self, _f: &str, _t: usize) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }
        fn on_document_loaded(&self, _f: &str, _t: usize, _n: usize) {
            self.loaded.fetch_add(1, Ordering::SeqCst);
        }
        fn on_document_failed(&self, _f: &str, _t: usize, _e: &str) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    fs::write(
        dir.path().join("products-list.json"),
        r#"["atlas-launch.md", "missing.md", "checkout-redesign.md"]"#,
    )
    .unwrap();

    let counting = Arc::new(Counting {
        started: AtomicUsize::new(0),
        loaded: AtomicUsize::new(0),
        failed: AtomicUsize::new(0),
    });
    let config = EngineConfig::builder()
        .progress_callback(counting.clone() as Arc<dyn LoadProgressCallback>)
        .build()
        .unwrap();

    load_catalog(&source_for(&dir), &config).await.unwrap();

    assert_eq!(counting.started.load(Ordering::SeqCst), 3);
    assert_eq!(counting.loaded.load(Ordering::SeqCst), 2);
    assert_eq!(counting.failed.load(Ordering::SeqCst), 1);
}

// ── Rendering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn work_index_renders_every_card() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    let catalog = loaded_catalog(&dir).await;

    let html = render_page(
        &source_for(&dir),
        &catalog,
        &PageKind::Work,
        &EngineConfig::default(),
    )
    .await;

    assert!(html.contains("slug=checkout-redesign"));
    assert!(html.contains("slug=atlas-launch"));
    assert!(html.contains("March 2025"));
}

#[tokio::test]
async fn product_page_renders_section_cards() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    let catalog = loaded_catalog(&dir).await;

    let html = render_page(
        &source_for(&dir),
        &catalog,
        &PageKind::Product {
            slug: "checkout-redesign".into(),
        },
        &EngineConfig::default(),
    )
    .await;

    // Hero block from the frontmatter.
    assert!(html.contains("Checkout Redesign"));
    assert!(html.contains("Fintech"));
    // Three sections: Context full-width, Problem + Solution in the grid.
    assert!(html.contains("full-width"));
    assert!(html.contains("📋"));
    assert!(html.contains("⚠️"));
    assert!(html.contains("💡"));
    // The bullet list inside Problem carries the section color.
    assert!(html.contains("project-bullet-list"));
    assert!(html.contains("<span>Drop-off at step 3</span>"));
    // The subsection header line survives with its colon.
    assert!(html.contains("Key friction:"));
}

#[tokio::test]
async fn project_page_renders_overview_and_series() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    let catalog = loaded_catalog(&dir).await;

    let html = render_page(
        &source_for(&dir),
        &catalog,
        &PageKind::Project {
            slug: "atlas".into(),
        },
        &EngineConfig::default(),
    )
    .await;

    assert!(html.contains("<p>Silos</p>"));
    assert!(html.contains("<p>One platform</p>"));
    assert!(html.contains("<p>3x faster</p>"));
    assert!(html.contains("post.html?project=atlas&post=kickoff"));
}

#[tokio::test]
async fn post_page_renders_fetched_markdown() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    let catalog = loaded_catalog(&dir).await;

    let html = render_page(
        &source_for(&dir),
        &catalog,
        &PageKind::Post {
            project_slug: "atlas".into(),
            post_slug: "kickoff".into(),
        },
        &EngineConfig::default(),
    )
    .await;

    assert!(html.contains("breadcrumb"));
    assert!(html.contains("<h1>Kickoff</h1>"));
    assert!(html.contains("<strong>real</strong>"));
    assert!(html.contains("<li>hired</li>"));
    assert!(html.contains("4 min read"));
}

#[tokio::test]
async fn post_with_missing_body_renders_not_found() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    fs::remove_file(dir.path().join("posts/kickoff.md")).unwrap();
    let catalog = loaded_catalog(&dir).await;

    let html = render_page(
        &source_for(&dir),
        &catalog,
        &PageKind::Post {
            project_slug: "atlas".into(),
            post_slug: "kickoff".into(),
        },
        &EngineConfig::default(),
    )
    .await;

    assert!(html.contains("Post not found."));
}

#[tokio::test]
async fn home_page_caps_featured_products() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    let catalog = loaded_catalog(&dir).await;

    let config = EngineConfig::builder().featured_limit(1).build().unwrap();
    let html = render_page(&source_for(&dir), &catalog, &PageKind::Home, &config).await;

    // Only the newest product makes the strip.
    assert!(html.contains("slug=checkout-redesign"));
    assert!(!html.contains("slug=atlas-launch"));
}

#[tokio::test]
async fn render_to_file_writes_the_fragment() {
    let dir = TempDir::new().unwrap();
    write_content_root(dir.path());
    let catalog = loaded_catalog(&dir).await;

    let out = dir.path().join("out/my-work.html");
    site::pages::render_page_to_file(
        &source_for(&dir),
        &catalog,
        &PageKind::Work,
        &EngineConfig::default(),
        &out,
    )
    .await
    .unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("slug=checkout-redesign"));
    // No temp file left behind.
    assert!(!out.with_extension("html.tmp").exists());
}

#[tokio::test]
async fn empty_catalog_renders_the_fallback_fragment() {
    let dir = TempDir::new().unwrap();

    let catalog = load_catalog_or_empty(&source_for(&dir), &EngineConfig::default()).await;
    let html = render_page(
        &source_for(&dir),
        &catalog,
        &PageKind::Work,
        &EngineConfig::default(),
    )
    .await;

    assert!(html.contains("Unable to load products"));
}
