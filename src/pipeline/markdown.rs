//! Markdown-to-HTML conversion for the restricted dialect used by content
//! files.
//!
//! ## Why a line scanner instead of regex substitution?
//!
//! The dialect is small — headers, emphasis, links, blockquotes, rules,
//! fenced code, flat lists — but the rules interact: `**x**` must never be
//! reinterpreted as two italic markers, and fenced-code interiors must not be
//! re-processed by later passes. A sequential pile of global substitutions
//! gets those orderings wrong in subtle ways, so this module classifies the
//! input line by line and applies inline formatting to each text fragment
//! exactly once.
//!
//! ## Rule Order
//!
//! 1. Fenced code blocks are lifted out first and replaced by opaque
//!    placeholders; their raw interiors are restored verbatim at the very
//!    end, so no later rule can touch them. An unclosed fence is left as
//!    literal text.
//! 2. Each remaining line is classified: `### `/`## `/`# ` headers
//!    (longest prefix first), `> ` blockquotes, `---` horizontal rules,
//!    `- `/`* ` bullet items, `<digits>. ` numbered items, or plain text.
//! 3. Consecutive items of one list kind share a single `<ul>`/`<ol>`; a
//!    kind switch or any non-item line closes the open list first, and a
//!    list still open at end of input is closed.
//! 4. Inline formatting runs on every text fragment in a fixed order —
//!    bold, then italic, then links — each pass a non-greedy scan.
//! 5. Blank-line-separated blocks that do not already start with a
//!    structural tag are wrapped in `<p>…</p>`; empty blocks are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. (.*)$").unwrap());

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Convert Markdown body text (already frontmatter-stripped) to flat HTML.
///
/// Conversion is best-effort and never fails: malformed input renders to
/// *something* rather than an error.
pub fn to_html(body: &str) -> String {
    let (text, fences) = extract_fences(body);

    let mut lines: Vec<String> = Vec::new();
    let mut list = ListRun::default();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("### ") {
            list.close(&mut lines);
            lines.push(format!("<h3>{}</h3>", render_inline(rest)));
        } else if let Some(rest) = line.strip_prefix("## ") {
            list.close(&mut lines);
            lines.push(format!("<h2>{}</h2>", render_inline(rest)));
        } else if let Some(rest) = line.strip_prefix("# ") {
            list.close(&mut lines);
            lines.push(format!("<h1>{}</h1>", render_inline(rest)));
        } else if let Some(rest) = line.strip_prefix("> ") {
            list.close(&mut lines);
            lines.push(format!("<blockquote>{}</blockquote>", render_inline(rest)));
        } else if line == "---" {
            list.close(&mut lines);
            lines.push("<hr>".to_string());
        } else if let Some(item) = bullet_item(line) {
            list.ensure(ListKind::Unordered, &mut lines);
            lines.push(format!("<li>{}</li>", render_inline(item)));
        } else if let Some(caps) = RE_ORDERED_ITEM.captures(line) {
            list.ensure(ListKind::Ordered, &mut lines);
            lines.push(format!("<li>{}</li>", render_inline(&caps[1])));
        } else {
            list.close(&mut lines);
            lines.push(render_inline(line));
        }
    }
    list.close(&mut lines);

    let html = wrap_paragraphs(&lines.join("\n"));
    restore_fences(&html, &fences)
}

/// `- item` or `* item`; exactly one space after the marker.
fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

// ── List runs ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// Transient open-list state during the line scan. Runs never overlap two
/// kinds: switching kind closes the open run before opening the next.
#[derive(Default)]
struct ListRun {
    kind: Option<ListKind>,
}

impl ListRun {
    fn ensure(&mut self, kind: ListKind, out: &mut Vec<String>) {
        if self.kind != Some(kind) {
            self.close(out);
            out.push(kind.open_tag().to_string());
            self.kind = Some(kind);
        }
    }

    fn close(&mut self, out: &mut Vec<String>) {
        if let Some(kind) = self.kind.take() {
            out.push(kind.close_tag().to_string());
        }
    }
}

// ── Inline formatting ────────────────────────────────────────────────────

/// Apply inline substitutions to one text fragment in the fixed order
/// bold → italic → links.
///
/// Bold runs first so `**x**` is consumed as one `<strong>` span; by the
/// time the italic pass sees the text no double-asterisk pairs remain, so
/// a bold span can never be half-eaten as nested italics.
fn render_inline(text: &str) -> String {
    let text = replace_delimited(text, "**", "strong");
    let text = replace_delimited(&text, "*", "em");
    RE_LINK
        .replace_all(&text, "<a href=\"$2\">$1</a>")
        .to_string()
}

/// Replace each non-greedy `delim…delim` span with `<tag>…</tag>`.
///
/// Spans do not nest; an unmatched opening delimiter is left literal.
fn replace_delimited(text: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(delim) {
        let after = &rest[open + delim.len()..];
        let Some(close) = after.find(delim) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&format!("<{tag}>{}</{tag}>", &after[..close]));
        rest = &after[close + delim.len()..];
    }
    out.push_str(rest);
    out
}

// ── Paragraph wrapping ───────────────────────────────────────────────────

/// Tags that mark a block as already-structural HTML.
const STRUCTURAL_PREFIXES: [&str; 9] = [
    "<h1", "<h2", "<h3", "<ul", "<ol", "<blockquote", "<hr", "<pre", "<li",
];

fn is_structural(block: &str) -> bool {
    block.starts_with(FENCE_SENTINEL)
        || STRUCTURAL_PREFIXES.iter().any(|tag| block.starts_with(tag))
}

/// Split on blank-line boundaries, drop empty blocks, and wrap anything that
/// is not already structural in `<p>…</p>`.
fn wrap_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .filter_map(|block| {
            let block = block.trim();
            if block.is_empty() {
                None
            } else if is_structural(block) {
                Some(block.to_string())
            } else {
                Some(format!("<p>{block}</p>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Fenced code blocks ───────────────────────────────────────────────────

/// Sentinel delimiting a lifted code block; U+0000 cannot appear in the
/// Markdown dialect, so placeholders survive every later pass untouched.
const FENCE_SENTINEL: char = '\u{0}';

fn placeholder(index: usize) -> String {
    format!("{FENCE_SENTINEL}{index}{FENCE_SENTINEL}")
}

/// Lift every triple-backtick span out of the text, returning the text with
/// placeholders plus the stashed raw interiors. A trailing unpaired fence is
/// left in place as literal text.
fn extract_fences(input: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(input.len());
    let mut stash = Vec::new();
    let mut rest = input;
    while let Some(open) = rest.find("```") {
        let after = &rest[open + 3..];
        let Some(close) = after.find("```") else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&placeholder(stash.len()));
        stash.push(after[..close].to_string());
        rest = &after[close + 3..];
    }
    out.push_str(rest);
    (out, stash)
}

/// Swap each placeholder back for its `<pre><code>` block, raw interior
/// intact.
fn restore_fences(html: &str, fences: &[String]) -> String {
    let mut out = html.to_string();
    for (index, interior) in fences.iter().enumerate() {
        out = out.replace(
            &placeholder(index),
            &format!("<pre><code>{interior}</code></pre>"),
        );
    }
    out
}
