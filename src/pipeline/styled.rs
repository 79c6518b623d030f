//! Styled per-section rendering: the lighter rule set used inside product
//! section cards.
//!
//! Unlike the flat renderer, only three line classes exist — blank lines,
//! `Subsection headers:` and `- bullets` — plus paragraph accumulation.
//! Headers, emphasis, and links are not interpreted here; section bodies are
//! prose and bullet lists, and anything else passes through as text.

use crate::pipeline::sections::SectionColor;
use once_cell::sync::Lazy;
use regex::Regex;

/// A subsection header: starts with an uppercase letter, contains no hyphen
/// or bullet glyph, and ends with a colon.
static RE_SUBSECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][^-•]*:$").unwrap());

/// Render one section's content lines to HTML, weaving the section's color
/// tag into the emitted markup.
///
/// State mirrors the flat renderer's discipline: a pending paragraph buffer
/// and an open-list flag, both flushed on boundaries and at end of input.
pub fn render(lines: &[String], color: SectionColor) -> String {
    let mut html = String::new();
    let mut in_list = false;
    let mut paragraph: Vec<&str> = Vec::new();

    for line in lines {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut in_list);
            continue;
        }

        if RE_SUBSECTION.is_match(trimmed) {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut in_list);
            html.push_str(&format!(
                "<div class=\"project-subsection-header\"><span class=\"bullet-bar color-{}\"></span>{}</div>",
                color.as_str(),
                trimmed
            ));
            continue;
        }

        if trimmed.starts_with('-') || trimmed.starts_with('•') {
            flush_paragraph(&mut html, &mut paragraph);
            if !in_list {
                html.push_str("<ul class=\"project-bullet-list\">");
                in_list = true;
            }
            html.push_str(&format!(
                "<li><span class=\"bullet color-{}\"></span><span>{}</span></li>",
                color.as_str(),
                strip_bullet(trimmed)
            ));
            continue;
        }

        close_list(&mut html, &mut in_list);
        paragraph.push(trimmed);
    }

    flush_paragraph(&mut html, &mut paragraph);
    close_list(&mut html, &mut in_list);
    html
}

/// Join accumulated lines with single spaces into one `<p>`, skipping the
/// element entirely when the buffer is blank.
fn flush_paragraph(html: &mut String, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join(" ");
    let text = text.trim();
    if !text.is_empty() {
        html.push_str(&format!("<p>{text}</p>"));
    }
    paragraph.clear();
}

fn close_list(html: &mut String, in_list: &mut bool) {
    if *in_list {
        html.push_str("</ul>");
        *in_list = false;
    }
}

/// Strip one leading `-` or `•` marker plus surrounding whitespace.
fn strip_bullet(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn render_pink(items: &[&str]) -> String {
        render(&lines(items), SectionColor::Pink)
    }

    #[test]
    fn consecutive_text_lines_join_into_one_paragraph() {
        let html = render_pink(&["first line", "second line", "third line"]);
        assert_eq!(html, "<p>first line second line third line</p>");
    }

    #[test]
    fn blank_line_splits_paragraphs() {
        let html = render_pink(&["one", "", "two"]);
        assert_eq!(html, "<p>one</p><p>two</p>");
    }

    #[test]
    fn bullets_share_one_list_and_carry_the_color() {
        let html = render_pink(&["- alpha", "• beta"]);
        assert_eq!(
            html,
            "<ul class=\"project-bullet-list\">\
             <li><span class=\"bullet color-pink\"></span><span>alpha</span></li>\
             <li><span class=\"bullet color-pink\"></span><span>beta</span></li>\
             </ul>"
        );
    }

    #[test]
    fn text_after_bullets_closes_the_list() {
        let html = render_pink(&["- item", "afterword"]);
        assert!(html.contains("</ul><p>afterword</p>"), "got: {html}");
    }

    #[test]
    fn paragraph_before_bullets_is_flushed_first() {
        let html = render_pink(&["intro", "- item"]);
        assert!(html.starts_with("<p>intro</p><ul"), "got: {html}");
    }

    #[test]
    fn subsection_header_carries_color_bar() {
        let html = render(&lines(&["Key metrics:"]), SectionColor::Accent);
        assert_eq!(
            html,
            "<div class=\"project-subsection-header\">\
             <span class=\"bullet-bar color-accent\"></span>Key metrics:</div>"
        );
    }

    #[test]
    fn header_must_start_uppercase_and_end_with_colon() {
        // Lowercase start or missing colon: plain paragraph text.
        assert_eq!(render_pink(&["key metrics:"]), "<p>key metrics:</p>");
        assert_eq!(render_pink(&["Key metrics"]), "<p>Key metrics</p>");
        // A hyphen anywhere disqualifies the line (it reads as a bullet or
        // hyphenated prose, not a header).
        assert_eq!(render_pink(&["Key-metrics:"]), "<p>Key-metrics:</p>");
    }

    #[test]
    fn open_list_is_closed_at_end_of_input() {
        let html = render_pink(&["- dangling"]);
        assert!(html.ends_with("</ul>"), "got: {html}");
    }

    #[test]
    fn trailing_paragraph_is_flushed_at_end_of_input() {
        let html = render_pink(&["- item", "tail one", "tail two"]);
        assert!(html.ends_with("<p>tail one tail two</p>"), "got: {html}");
    }

    #[test]
    fn whitespace_only_lines_emit_nothing() {
        assert_eq!(render_pink(&["   ", "\t"]), "");
    }

    #[test]
    fn bullet_marker_stripping_keeps_interior_hyphens() {
        let html = render_pink(&["- self-serve onboarding"]);
        assert!(html.contains("<span>self-serve onboarding</span>"));
    }
}
