//! Catalog data model: documents, products, projects, and load statistics.
//!
//! Everything here is plain data. The catalog is written exactly once by
//! [`crate::load::load_catalog`] and only read afterwards, so none of these
//! types need interior mutability or locking.

use crate::error::DocumentError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Frontmatter metadata ─────────────────────────────────────────────────

/// A single frontmatter value: either a scalar string or a bracketed list.
///
/// `tags: [rust, cli]` parses to `List(["rust", "cli"])`; every other value
/// is the trimmed string as-is. Serialises untagged so `--json` output reads
/// like the frontmatter did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The scalar string, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// The list elements, if this value is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

/// Key/value mapping parsed from a frontmatter block.
///
/// Keys are not validated against a schema; any key becomes an entry.
/// Inserting a duplicate key replaces the previous value (last wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata(HashMap<String, FieldValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; a duplicate key overwrites the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Scalar value for `key`, if present and scalar.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(FieldValue::as_str)
    }

    /// List value for `key`, if present and a list.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).and_then(FieldValue::as_list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A content file split into frontmatter metadata and body text.
///
/// Produced once per loaded file by [`crate::pipeline::frontmatter::split_document`];
/// immutable after parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

// ── Products ─────────────────────────────────────────────────────────────

/// One case-study document from the manifest: its filename, frontmatter
/// metadata, and Markdown body.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Filename as listed in the manifest (e.g. `checkout-redesign.md`).
    pub filename: String,
    pub metadata: Metadata,
    pub body: String,
}

impl Product {
    /// Build a product from a raw fetched file.
    pub fn from_raw(filename: impl Into<String>, raw: &str) -> Self {
        let doc = crate::pipeline::frontmatter::split_document(raw);
        Self {
            filename: filename.into(),
            metadata: doc.metadata,
            body: doc.body,
        }
    }

    pub fn title(&self) -> &str {
        self.metadata.str("title").unwrap_or("Untitled")
    }

    pub fn slug(&self) -> Option<&str> {
        self.metadata.str("slug")
    }

    pub fn category(&self) -> &str {
        self.metadata.str("category").unwrap_or("Product")
    }

    pub fn description(&self) -> &str {
        self.metadata.str("description").unwrap_or("")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.metadata.str("thumbnail").filter(|s| !s.is_empty())
    }

    /// Tags, tolerating a scalar `tags:` value by treating it as no tags.
    pub fn tags(&self) -> &[String] {
        self.metadata.list("tags").unwrap_or(&[])
    }

    /// Raw `date:` value from the frontmatter, if any.
    pub fn date(&self) -> Option<&str> {
        self.metadata.str("date")
    }

    /// Parsed date used as the catalog sort key. `None` for missing or
    /// unparsable dates, which sort after every dated product.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.date().and_then(parse_date)
    }

    /// Display date for product cards, e.g. `March 2025`.
    pub fn formatted_date(&self) -> String {
        format_month_year(self.date().unwrap_or(""))
    }
}

// ── Projects and blog posts ──────────────────────────────────────────────

/// Challenge / solution / impact summary shown on a project detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub challenge: String,
    pub solution: String,
    pub impact: String,
}

/// One entry in a project's case-study series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    /// Content-root-relative path to the post's Markdown file.
    pub content: String,
}

impl BlogPost {
    /// Display date for post cards and headers, e.g. `March 4, 2025`.
    pub fn formatted_date(&self) -> String {
        format_long_date(&self.date)
    }
}

/// A project from the project index, with its blog-post series.
///
/// All fields default so a sparse index entry still deserialises; the
/// templates tolerate empty strings the same way they tolerate missing
/// frontmatter keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail: String,
    pub date: String,
    pub tags: Vec<String>,
    pub overview: Overview,
    pub blog_posts: Vec<BlogPost>,
}

impl Project {
    pub fn formatted_date(&self) -> String {
        format_long_date(&self.date)
    }

    pub fn post(&self, post_slug: &str) -> Option<&BlogPost> {
        self.blog_posts.iter().find(|p| p.slug == post_slug)
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────

/// Timing and count statistics for one catalog load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    /// Documents listed in the manifest.
    pub listed: usize,
    /// Documents fetched and parsed.
    pub loaded: usize,
    /// Documents that failed to fetch.
    pub failed: usize,
    /// Wall-clock time for the whole load, manifest included.
    pub total_duration_ms: u64,
    /// Wall-clock time for the concurrent document fan-out alone.
    pub fetch_duration_ms: u64,
}

/// The loaded content set: products sorted newest-first, the project index,
/// per-document failures, and load statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub projects: Vec<Project>,
    pub failures: Vec<DocumentError>,
    pub stats: LoadStats,
}

impl Catalog {
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug() == Some(slug))
    }

    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    /// Look up a blog post inside a project, matching both slugs exactly.
    pub fn post_from_project(&self, project_slug: &str, post_slug: &str) -> Option<&BlogPost> {
        self.project_by_slug(project_slug)?.post(post_slug)
    }

    /// The most recent products, capped at `limit`.
    pub fn featured(&self, limit: usize) -> &[Product] {
        &self.products[..self.products.len().min(limit)]
    }
}

// ── Date helpers ─────────────────────────────────────────────────────────

/// Parse an ISO `YYYY-MM-DD` date, tolerating a trailing time component.
///
/// Returns `None` on anything unparsable; callers fall back to the raw
/// string for display and to end-of-list ordering for sorting.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next().unwrap_or("");
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// `2025-03-04` → `March 2025`; unparsable input is returned as-is.
pub fn format_month_year(raw: &str) -> String {
    match parse_date(raw) {
        Some(d) => d.format("%B %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `2025-03-04` → `March 4, 2025`; unparsable input is returned as-is.
pub fn format_long_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(d) => format!("{} {}, {}", d.format("%B"), d.format("%-d"), d.format("%Y")),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(frontmatter: &str) -> Product {
        Product::from_raw("x.md", &format!("---\n{frontmatter}\n---\nbody"))
    }

    #[test]
    fn accessors_fall_back_when_keys_missing() {
        let p = Product::from_raw("x.md", "no frontmatter here");
        assert_eq!(p.title(), "Untitled");
        assert_eq!(p.category(), "Product");
        assert_eq!(p.description(), "");
        assert!(p.slug().is_none());
        assert!(p.thumbnail().is_none());
        assert!(p.tags().is_empty());
        assert_eq!(p.body, "no frontmatter here");
    }

    #[test]
    fn accessors_read_frontmatter() {
        let p = product("title: Checkout\nslug: checkout\ncategory: Fintech\ntags: [ux, data]");
        assert_eq!(p.title(), "Checkout");
        assert_eq!(p.slug(), Some("checkout"));
        assert_eq!(p.category(), "Fintech");
        assert_eq!(p.tags(), ["ux".to_string(), "data".to_string()]);
    }

    #[test]
    fn date_key_handles_bad_dates() {
        assert!(product("date: 2025-03-04").date_key().is_some());
        assert!(product("date: sometime in march").date_key().is_none());
        assert!(product("title: undated").date_key().is_none());
    }

    #[test]
    fn month_year_formatting() {
        assert_eq!(format_month_year("2025-03-04"), "March 2025");
        assert_eq!(format_month_year("not a date"), "not a date");
    }

    #[test]
    fn long_date_formatting_has_no_zero_padding() {
        assert_eq!(format_long_date("2025-03-04"), "March 4, 2025");
        assert_eq!(format_long_date("2024-12-25"), "December 25, 2024");
    }

    #[test]
    fn parse_date_tolerates_time_suffix() {
        assert_eq!(
            parse_date("2025-03-04T10:00:00"),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
    }

    #[test]
    fn featured_caps_at_limit() {
        let catalog = Catalog {
            products: vec![product("title: A"), product("title: B")],
            ..Catalog::default()
        };
        assert_eq!(catalog.featured(1).len(), 1);
        assert_eq!(catalog.featured(5).len(), 2);
    }

    #[test]
    fn project_index_deserialises_camel_case() {
        let json = r#"[{
            "slug": "atlas",
            "title": "Atlas",
            "blogPosts": [{"slug": "p1", "title": "Post", "readTime": "4 min read", "content": "posts/p1.md"}]
        }]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        assert_eq!(projects[0].blog_posts.len(), 1);
        assert_eq!(projects[0].blog_posts[0].read_time, "4 min read");
        assert!(projects[0].overview.challenge.is_empty());
    }

    #[test]
    fn post_lookup_requires_both_slugs() {
        let projects: Vec<Project> = serde_json::from_str(
            r#"[{"slug": "atlas", "blogPosts": [{"slug": "p1"}]}]"#,
        )
        .unwrap();
        let catalog = Catalog {
            projects,
            ..Catalog::default()
        };
        assert!(catalog.post_from_project("atlas", "p1").is_some());
        assert!(catalog.post_from_project("atlas", "p2").is_none());
        assert!(catalog.post_from_project("nope", "p1").is_none());
    }
}
