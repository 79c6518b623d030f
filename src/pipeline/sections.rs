//! Section segmentation: split a document body on `##` headers into titled,
//! icon-tagged, color-tagged sections for the card-based product page.
//!
//! Segmentation runs on raw body text (frontmatter already stripped, not yet
//! HTML-rendered); each section's lines are later rendered by
//! [`crate::pipeline::styled`].

use serde::Serialize;

/// Accent color cycled over sections by ordinal position.
///
/// Assigned `index mod 4` at section creation and immutable thereafter, so a
/// section's color depends only on where it sits in the document, never on
/// its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionColor {
    Highlight,
    Pink,
    Accent,
    Yellow,
}

const COLOR_CYCLE: [SectionColor; 4] = [
    SectionColor::Highlight,
    SectionColor::Pink,
    SectionColor::Accent,
    SectionColor::Yellow,
];

impl SectionColor {
    /// Color for the section at `index` (0-based ordinal among sections).
    pub fn cycle(index: usize) -> Self {
        COLOR_CYCLE[index % COLOR_CYCLE.len()]
    }

    /// The CSS class suffix, e.g. `color-pink`.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionColor::Highlight => "highlight",
            SectionColor::Pink => "pink",
            SectionColor::Accent => "accent",
            SectionColor::Yellow => "yellow",
        }
    }

    /// Card border color on the product detail page.
    pub fn border_hsla(self) -> &'static str {
        match self {
            SectionColor::Highlight => "hsl(270, 70%, 65%, 0.4)",
            SectionColor::Pink => "hsl(340, 85%, 65%, 0.4)",
            SectionColor::Accent => "hsl(25, 90%, 58%, 0.4)",
            SectionColor::Yellow => "hsl(45, 90%, 55%, 0.4)",
        }
    }
}

/// Icon glyph chosen by keyword containment in the lowercased section title,
/// checked in declaration order, first match wins.
///
/// `results` and `takeaways` intentionally share one glyph.
const SECTION_ICONS: [(&str, &str); 6] = [
    ("context", "📋"),
    ("problem", "⚠️"),
    ("solution", "💡"),
    ("execution", "🚀"),
    ("results", "📊"),
    ("takeaways", "📊"),
];

/// Glyph for titles matching no keyword.
const ICON_DEFAULT: &str = "📝";

fn icon_for(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    SECTION_ICONS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(ICON_DEFAULT)
}

/// A titled grouping of content lines produced by splitting body text on
/// `##` headers. Created here, consumed once by the styled renderer, then
/// discarded.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSection {
    pub title: String,
    pub icon: &'static str,
    pub color: SectionColor,
    pub lines: Vec<String>,
}

/// Split body text into sections.
///
/// * `## Title` starts a new section (the header line itself is never part
///   of any section's content).
/// * `# Title` lines and bare `---` separators are dropped unconditionally,
///   even mid-section.
/// * Lines before the first `##` header are silently discarded — there is no
///   preamble section.
/// * A section still open at end of input is flushed, never dropped.
pub fn segment(body: &str) -> Vec<RenderedSection> {
    let mut sections: Vec<RenderedSection> = Vec::new();
    let mut current: Option<RenderedSection> = None;

    for line in body.lines() {
        if let Some(title) = section_title(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(RenderedSection {
                icon: icon_for(title),
                color: SectionColor::cycle(sections.len()),
                title: title.to_string(),
                lines: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            if !line.starts_with("# ") && line != "---" {
                section.lines.push(line.to_string());
            }
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }
    sections
}

/// The trimmed title of a `## ` header line, if this is one.
fn section_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("## ")?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.trim())
}
