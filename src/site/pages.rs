//! Page fragment assembly: one function per page kind, plus the explicit
//! [`render_page`] entry point.
//!
//! Which page to render is always passed in as a [`PageKind`] — there is no
//! URL sniffing or load-time auto-render here, so every page path can be
//! invoked directly from tests without simulating navigation.

use crate::catalog::{BlogPost, Catalog, Product, Project};
use crate::config::EngineConfig;
use crate::error::DocumentError;
use crate::load;
use crate::pipeline::source::ContentSource;
use crate::pipeline::{markdown, sections, styled};
use crate::site::{cards, icons};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The page to render, with its route parameters made explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    /// Home page: the featured strip of most recent products.
    Home,
    /// Work index: the full product card grid.
    Work,
    /// One product's detail page, by slug.
    Product { slug: String },
    /// One project's detail page, by slug.
    Project { slug: String },
    /// One blog post inside a project, by both slugs.
    Post {
        project_slug: String,
        post_slug: String,
    },
}

/// Render the requested page fragment.
///
/// Unknown slugs render a not-found notice, never an error; only a blog
/// post's body requires a fetch, and a failed one degrades to the notice as
/// well (the load boundary already reported it).
pub async fn render_page(
    source: &ContentSource,
    catalog: &Catalog,
    kind: &PageKind,
    config: &EngineConfig,
) -> String {
    match kind {
        PageKind::Home => render_home_featured(catalog, config),
        PageKind::Work => render_work_index(catalog),
        PageKind::Product { slug } => match catalog.product_by_slug(slug) {
            Some(product) => render_product_page(product),
            None => cards::not_found_notice("Product"),
        },
        PageKind::Project { slug } => match catalog.project_by_slug(slug) {
            Some(project) => render_project_page(project),
            None => cards::not_found_notice("Project"),
        },
        PageKind::Post {
            project_slug,
            post_slug,
        } => {
            let Some(project) = catalog.project_by_slug(project_slug) else {
                return cards::not_found_notice("Post");
            };
            let Some(post) = project.post(post_slug) else {
                return cards::not_found_notice("Post");
            };
            match load_post_html(source, post).await {
                Ok(content_html) => render_post_page(project, post, &content_html),
                Err(e) => {
                    warn!("Post content failed to load: {e}");
                    cards::not_found_notice("Post")
                }
            }
        }
    }
}

/// Render the requested page fragment and write it to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial fragments.
pub async fn render_page_to_file(
    source: &ContentSource,
    catalog: &Catalog,
    kind: &PageKind,
    config: &EngineConfig,
    output_path: impl AsRef<std::path::Path>,
) -> Result<(), crate::error::FolioError> {
    use crate::error::FolioError;

    let html = render_page(source, catalog, kind, config).await;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FolioError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &html)
        .await
        .map_err(|e| FolioError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| FolioError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Fetch a post's Markdown body and render it flat.
pub async fn load_post_html(
    source: &ContentSource,
    post: &BlogPost,
) -> Result<String, DocumentError> {
    let doc = load::load_document(source, &post.content).await?;
    Ok(markdown::to_html(&doc.body))
}

/// Browser-tab title for a detail page, e.g. `Checkout Redesign | Portfolio`.
pub fn document_title(item_title: &str, config: &EngineConfig) -> String {
    format!("{item_title} | {}", config.site_title)
}

// ── Listing pages ────────────────────────────────────────────────────────

/// The full product grid, or the no-content alert for an empty catalog.
pub fn render_work_index(catalog: &Catalog) -> String {
    if catalog.products.is_empty() {
        return cards::no_content_alert();
    }
    catalog.products.iter().map(cards::product_card).collect()
}

/// The home page's featured strip: most recent products, capped by config.
pub fn render_home_featured(catalog: &Catalog, config: &EngineConfig) -> String {
    let featured = catalog.featured(config.featured_limit);
    if featured.is_empty() {
        return concat!(
            "<p style=\"text-align: center; color: var(--muted-foreground); grid-column: 1 / -1;\">\n",
            "    No products available yet.\n",
            "</p>\n"
        )
        .to_string();
    }
    featured.iter().map(cards::product_card).collect()
}

// ── Product detail ───────────────────────────────────────────────────────

/// A product's detail page: hero block, then the first section as a
/// full-width card and the rest in a two-column grid of color-bordered
/// cards.
pub fn render_product_page(product: &Product) -> String {
    let sections = sections::segment(&product.body);

    let mut html = render_product_hero(product);

    if let Some((first, rest)) = sections.split_first() {
        html.push_str(&format!(
            r#"<section style="padding-top: 2rem; padding-bottom: 1.5rem;">
    <div class="container">
        <div class="project-section-card full-width" style="border: 1px solid {border};">
            {card}
        </div>
    </div>
</section>
"#,
            border = first.color.border_hsla(),
            card = section_card_body(first),
        ));

        if !rest.is_empty() {
            let grid: String = rest
                .iter()
                .map(|section| {
                    format!(
                        r#"<div class="project-section-card" style="border: 1px solid {border}">
    {card}
</div>
"#,
                        border = section.color.border_hsla(),
                        card = section_card_body(section),
                    )
                })
                .collect();
            html.push_str(&format!(
                r#"<section style="padding-top: 0; padding-bottom: 4rem;">
    <div class="container">
        <div class="project-sections-grid">
            {grid}
        </div>
    </div>
</section>
"#,
            ));
        }
    }

    html.push_str(&format!(
        r#"<section class="section-padding" style="padding-bottom: 4rem;">
    <div class="container">
        <div class="product-footer">
            <a href="my-work.html" class="btn btn-outline">{arrow_left} Back to My Work</a>
        </div>
    </div>
</section>
"#,
        arrow_left = icons::ARROW_LEFT,
    ));

    html
}

fn render_product_hero(product: &Product) -> String {
    let tag_chips: String = product
        .tags()
        .iter()
        .map(|tag| format!("<span class=\"project-detail-tag\">{} {tag}</span>", icons::TAG))
        .collect();

    let mut html = format!(
        r#"<section class="project-detail-hero section-padding">
    <div class="container">
        <a href="my-work.html" class="back-link">{arrow_left} Back to Projects</a>
        <div class="project-detail-meta">
            <span class="project-detail-badge">{category}</span>
            <span class="project-detail-date">{calendar} {date}</span>
        </div>
        <h1 class="project-detail-title">{title}</h1>
        <p class="project-detail-description">{description}</p>
        <div class="project-detail-tags">{tag_chips}</div>
    </div>
</section>
"#,
        arrow_left = icons::ARROW_LEFT,
        category = product.category(),
        calendar = icons::CALENDAR,
        date = product.formatted_date(),
        title = product.title(),
        description = product.description(),
        tag_chips = tag_chips,
    );

    if let Some(thumbnail) = product.thumbnail() {
        html.push_str(&format!(
            r#"<section class="project-detail-image">
    <div class="container">
        <div class="project-detail-image-wrapper">
            <img src="{thumbnail}" alt="{title}">
            <div class="project-detail-image-overlay"></div>
        </div>
    </div>
</section>
"#,
            title = product.title(),
        ));
    }

    html
}

/// Header plus styled body for one section card.
fn section_card_body(section: &sections::RenderedSection) -> String {
    format!(
        r#"<div class="project-section-header color-{color}">
    <div class="project-section-icon">{icon}</div>
    <h2 class="project-section-title">{title}</h2>
</div>
<div class="project-section-content">{content}</div>"#,
        color = section.color.as_str(),
        icon = section.icon,
        title = section.title,
        content = styled::render(&section.lines, section.color),
    )
}

// ── Project detail and blog posts ────────────────────────────────────────

/// A project's detail page: hero, challenge/solution/impact columns, and the
/// case-study series as post cards.
pub fn render_project_page(project: &Project) -> String {
    let tag_chips: String = project
        .tags
        .iter()
        .map(|tag| format!("<span class=\"badge bg-info me-2\">{tag}</span>"))
        .collect();
    let post_cards: String = project
        .blog_posts
        .iter()
        .map(|post| cards::post_card(post, &project.slug))
        .collect();

    format!(
        r#"<div class="row mb-5">
    <div class="col-12">
        <img src="{thumbnail}" class="img-fluid rounded mb-4" alt="{title}">
        <h1 class="mb-3">{title}</h1>
        <p class="lead">{description}</p>
        <div class="mb-4">{tag_chips}</div>
    </div>
</div>
<div class="row mb-5">
    <div class="col-md-4">
        <h4>Challenge</h4>
        <p>{challenge}</p>
    </div>
    <div class="col-md-4">
        <h4>Solution</h4>
        <p>{solution}</p>
    </div>
    <div class="col-md-4">
        <h4>Impact</h4>
        <p>{impact}</p>
    </div>
</div>
<div class="row">
    <div class="col-12">
        <h2 class="mb-4">Case Study Series</h2>
        <div class="row row-cols-1 row-cols-md-2 row-cols-lg-3 g-4">
            {post_cards}
        </div>
    </div>
</div>
"#,
        thumbnail = project.thumbnail,
        title = project.title,
        description = project.description,
        tag_chips = tag_chips,
        challenge = project.overview.challenge,
        solution = project.overview.solution,
        impact = project.overview.impact,
        post_cards = post_cards,
    )
}

/// One blog post: breadcrumb, header, flat-rendered content, back link.
pub fn render_post_page(project: &Project, post: &BlogPost, content_html: &str) -> String {
    format!(
        r#"<div class="row mb-4">
    <div class="col-12">
        <nav aria-label="breadcrumb">
            <ol class="breadcrumb">
                <li class="breadcrumb-item"><a href="my-work.html">My Work</a></li>
                <li class="breadcrumb-item"><a href="project.html?slug={project_slug}">{project_title}</a></li>
                <li class="breadcrumb-item active" aria-current="page">{post_title}</li>
            </ol>
        </nav>
    </div>
</div>
<article class="row">
    <div class="col-lg-8 mx-auto">
        <header class="mb-5">
            <h1 class="mb-3">{post_title}</h1>
            <div class="d-flex justify-content-between text-muted mb-4">
                <span>{date}</span>
                <span>{read_time}</span>
            </div>
        </header>
        <div class="blog-content">{content}</div>
        <footer class="mt-5 pt-4 border-top">
            <a href="project.html?slug={project_slug}" class="btn btn-outline-primary">← Back to Project</a>
        </footer>
    </div>
</article>
"#,
        project_slug = project.slug,
        project_title = project.title,
        post_title = post.title,
        date = post.formatted_date(),
        read_time = post.read_time,
        content = content_html,
    )
}
