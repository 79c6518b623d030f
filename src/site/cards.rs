//! Card templates: the repeated fragments of the work index, home page, and
//! project pages.
//!
//! These are plain string templates over catalog data. HTML-unsafe
//! characters in content are passed through untouched — content files are
//! first-party, and escaping is the host page's concern, not this crate's.

use crate::catalog::{BlogPost, Product, Project};
use crate::site::icons;

/// Placeholder image for products without a `thumbnail:` entry.
const FALLBACK_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&h=600&fit=crop";

/// One product card for the work index and the featured strip.
pub fn product_card(product: &Product) -> String {
    format!(
        r#"<a href="product.html?slug={slug}" class="project-card">
    <div class="project-image-wrapper">
        <img src="{thumbnail}" alt="{title}" class="project-image">
        <div class="project-overlay"></div>
        <span class="project-category">{category}</span>
        <div class="project-arrow">{arrow}</div>
    </div>
    <h3 class="project-title">{title}</h3>
    <p class="project-description">{description}</p>
    <div class="project-date">{calendar} {date}</div>
</a>
"#,
        slug = product.slug().unwrap_or(""),
        thumbnail = product.thumbnail().unwrap_or(FALLBACK_THUMBNAIL),
        title = product.title(),
        category = product.category(),
        arrow = icons::ARROW_UP_RIGHT,
        description = product.description(),
        calendar = icons::CALENDAR,
        date = product.formatted_date(),
    )
}

/// One blog-post card inside a project's case-study series.
pub fn post_card(post: &BlogPost, project_slug: &str) -> String {
    format!(
        r#"<div class="col">
    <div class="card h-100 shadow-sm">
        <div class="card-body">
            <h5 class="card-title">{title}</h5>
            <p class="card-text text-muted">{excerpt}</p>
            <div class="d-flex justify-content-between align-items-center">
                <small class="text-muted">{date}</small>
                <small class="text-muted">{read_time}</small>
            </div>
        </div>
        <div class="card-footer bg-transparent border-top-0">
            <a href="post.html?project={project_slug}&post={post_slug}" class="btn btn-primary btn-sm">Read Post</a>
        </div>
    </div>
</div>
"#,
        title = post.title,
        excerpt = post.excerpt,
        date = post.formatted_date(),
        read_time = post.read_time,
        project_slug = project_slug,
        post_slug = post.slug,
    )
}

/// One project card for the project listing.
pub fn project_card(project: &Project) -> String {
    format!(
        r#"<div class="col">
    <div class="project-card h-100">
        <a href="project.html?slug={slug}" class="text-decoration-none text-dark">
            <img class="rounded img-fluid d-block w-100 fit-cover" src="{thumbnail}" alt="{title}">
            <div class="py-4">
                <span class="badge bg-primary mb-2">{category}</span>
                <h4>{title}</h4>
                <p class="text-muted">{description}</p>
                <div class="d-flex justify-content-between align-items-center mt-3">
                    <small class="text-muted">{date}</small>
                    <span class="badge bg-secondary">{post_count} posts</span>
                </div>
            </div>
        </a>
    </div>
</div>
"#,
        slug = project.slug,
        thumbnail = project.thumbnail,
        title = project.title,
        category = project.category,
        description = project.description,
        date = project.formatted_date(),
        post_count = project.blog_posts.len(),
    )
}

/// Warning block shown when the catalog came back empty.
pub fn no_content_alert() -> String {
    r#"<div class="alert alert-warning" style="grid-column: 1 / -1;">
    <p><strong>Unable to load products</strong></p>
    <p>Please run a local web server to view products. Try: <code>python -m http.server 8000</code></p>
</div>
"#
    .to_string()
}

/// Notice shown when a requested slug has no matching document.
pub fn not_found_notice(kind: &str) -> String {
    format!("<div class=\"alert alert-warning\">{kind} not found.</div>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_card_links_by_slug() {
        let p = Product::from_raw(
            "a.md",
            "---\ntitle: Checkout\nslug: checkout\ndate: 2025-03-04\n---\nbody",
        );
        let html = product_card(&p);
        assert!(html.contains("product.html?slug=checkout"));
        assert!(html.contains("<h3 class=\"project-title\">Checkout</h3>"));
        assert!(html.contains("March 2025"));
    }

    #[test]
    fn product_card_falls_back_without_thumbnail_or_category() {
        let p = Product::from_raw("a.md", "---\ntitle: T\n---\nb");
        let html = product_card(&p);
        assert!(html.contains("images.unsplash.com"));
        assert!(html.contains(">Product</span>"));
    }

    #[test]
    fn post_card_links_carry_both_slugs() {
        let post = BlogPost {
            slug: "kickoff".into(),
            title: "Kickoff".into(),
            ..BlogPost::default()
        };
        let html = post_card(&post, "atlas");
        assert!(html.contains("post.html?project=atlas&post=kickoff"));
    }

    #[test]
    fn not_found_notice_names_the_kind() {
        assert!(not_found_notice("Product").contains("Product not found."));
        assert!(not_found_notice("Post").contains("Post not found."));
    }
}
