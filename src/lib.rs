//! # foliogen
//!
//! Render portfolio content — Markdown case studies and project journals —
//! into HTML page fragments.
//!
//! ## Why this crate?
//!
//! A portfolio site's content layer keeps reinventing the same three things:
//! a frontmatter splitter, a small Markdown-to-HTML converter, and the
//! templating that turns documents into cards and detail pages. This crate
//! implements all three once, as one pipeline with two rendering
//! capabilities: flat HTML for prose pages and icon/color-tagged section
//! cards for case studies. Conversion is permissive: malformed frontmatter
//! or Markdown degrades to a best-effort result, never an error.
//!
//! ## Pipeline Overview
//!
//! ```text
//! content root (dir or URL)
//!  │
//!  ├─ 1. Manifest     products-list.json → ordered file list
//!  ├─ 2. Fan-out      concurrent fetch of every content file
//!  ├─ 3. Frontmatter  leading --- block → metadata + body
//!  ├─ 4. Render       body → flat HTML, or ## sections → styled cards
//!  └─ 5. Site         catalog + PageKind → HTML page fragment
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foliogen::{load_catalog, render_page, ContentSource, EngineConfig, PageKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let source = ContentSource::resolve("site/data", config.fetch_timeout_secs)?;
//!     let catalog = load_catalog(&source, &config).await?;
//!     let html = render_page(&source, &catalog, &PageKind::Work, &config).await;
//!     println!("{html}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `foliogen` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! foliogen = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod progress;
pub mod site;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::{Catalog, Document, FieldValue, LoadStats, Metadata, Product, Project};
pub use config::{EngineConfig, EngineConfigBuilder, RenderMode};
pub use error::{DocumentError, FolioError};
pub use load::{load_catalog, load_catalog_or_empty, load_document};
pub use pipeline::frontmatter::split_document;
pub use pipeline::markdown::to_html;
pub use pipeline::sections::{segment, RenderedSection, SectionColor};
pub use pipeline::source::ContentSource;
pub use progress::{LoadProgressCallback, NoopLoadProgress, ProgressCallback};
pub use site::pages::{render_page, PageKind};
pub use stream::load_products_stream;

/// Render one Markdown document body with the chosen mode.
///
/// `Flat` produces the full-rule HTML; `Sections` segments on `##` headers
/// and renders each section as a styled card body, concatenated in order.
pub fn render_body(body: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::Flat => pipeline::markdown::to_html(body),
        RenderMode::Sections => pipeline::sections::segment(body)
            .iter()
            .map(|section| {
                format!(
                    "<h2 class=\"project-section-title\">{} {}</h2>\n{}\n",
                    section.icon,
                    section.title,
                    pipeline::styled::render(&section.lines, section.color)
                )
            })
            .collect(),
    }
}
