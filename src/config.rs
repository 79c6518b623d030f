//! Configuration types for catalog loading and page rendering.
//!
//! All engine behaviour is controlled through [`EngineConfig`], built via its
//! [`EngineConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share configs across tasks and to diff two runs to understand why their
//! outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::FolioError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for catalog loading and page rendering.
///
/// Built via [`EngineConfig::builder()`] or using
/// [`EngineConfig::default()`].
///
/// # Example
/// ```rust
/// use foliogen::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .concurrency(4)
///     .featured_limit(6)
///     .site_title("Simon Tadeu")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct EngineConfig {
    /// Manifest filename at the content root. Default: `products-list.json`.
    ///
    /// The manifest is an ordered JSON array of Markdown filenames; ordering
    /// only matters for load scheduling, since products are re-sorted by date
    /// after the batch completes.
    pub manifest_file: String,

    /// Directory under the content root holding the listed Markdown files.
    /// Default: `products`.
    pub products_dir: String,

    /// Project-index filename at the content root. Default: `projects.json`.
    ///
    /// The index is optional: a missing or unparsable file degrades to an
    /// empty project list so a products-only site needs no extra setup.
    pub project_index: String,

    /// Number of concurrent content fetches. Default: 8.
    ///
    /// Content fetches are network/disk-bound, not CPU-bound, so the whole
    /// batch is issued through one `buffer_unordered` fan-out. Lower this if
    /// a slow origin server starts refusing connections.
    pub concurrency: usize,

    /// Per-fetch timeout in seconds for remote content roots. Default: 30.
    ///
    /// There is no retry: a timed-out file is recorded as a per-document
    /// failure and the rest of the batch continues.
    pub fetch_timeout_secs: u64,

    /// Number of products shown on the home page's featured strip. Default: 3.
    pub featured_limit: usize,

    /// Site title used in page `<title>` fragments. Default: `Portfolio`.
    pub site_title: String,

    /// Optional per-document progress callback (drives the CLI progress bar).
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            manifest_file: "products-list.json".to_string(),
            products_dir: "products".to_string(),
            project_index: "projects.json".to_string(),
            concurrency: 8,
            fetch_timeout_secs: 30,
            featured_limit: 3,
            site_title: "Portfolio".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("manifest_file", &self.manifest_file)
            .field("products_dir", &self.products_dir)
            .field("project_index", &self.project_index)
            .field("concurrency", &self.concurrency)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("featured_limit", &self.featured_limit)
            .field("site_title", &self.site_title)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn LoadProgressCallback>"),
            )
            .finish()
    }
}

impl EngineConfig {
    /// Create a new builder for `EngineConfig`.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`EngineConfig`].
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn manifest_file(mut self, name: impl Into<String>) -> Self {
        self.config.manifest_file = name.into();
        self
    }

    pub fn products_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.products_dir = dir.into();
        self
    }

    pub fn project_index(mut self, name: impl Into<String>) -> Self {
        self.config.project_index = name.into();
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    pub fn featured_limit(mut self, n: usize) -> Self {
        self.config.featured_limit = n;
        self
    }

    pub fn site_title(mut self, title: impl Into<String>) -> Self {
        self.config.site_title = title.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<EngineConfig, FolioError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(FolioError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        if c.manifest_file.trim().is_empty() {
            return Err(FolioError::InvalidConfig(
                "Manifest filename must not be empty".into(),
            ));
        }
        if c.fetch_timeout_secs == 0 {
            return Err(FolioError::InvalidConfig(
                "Fetch timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How a single Markdown document is rendered to HTML.
///
/// The two modes are the crate's two entry capabilities over one shared
/// parsing pipeline: callers pick by intent instead of duplicating logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Flat HTML: the full renderer (headers, emphasis, links, lists,
    /// blockquotes, fenced code, paragraphs). (default)
    #[default]
    Flat,
    /// Card sections: split on `##` headers into icon/color-tagged sections,
    /// each body rendered by the lighter styled renderer.
    Sections,
}
