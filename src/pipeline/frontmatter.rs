//! Frontmatter splitting: separate a leading `---`-delimited metadata block
//! from body text and parse it into a key/value mapping.
//!
//! Parsing is deliberately permissive: there is no schema, lines without a
//! colon are skipped, and a malformed block degrades to partial or empty
//! metadata. Nothing in this module can fail.

use crate::catalog::{Document, FieldValue, Metadata};
use once_cell::sync::Lazy;
use regex::Regex;

/// The whole-input frontmatter shape: a `---` line at position 0, the block,
/// a closing `---` line, then the body.
static RE_FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap());

/// Split raw file text into frontmatter metadata and body.
///
/// If the input does not start with a delimited block, the metadata is empty
/// and the body is the full input unchanged.
pub fn split_document(raw: &str) -> Document {
    match RE_FRONTMATTER.captures(raw) {
        Some(caps) => Document {
            metadata: parse_block(caps.get(1).map_or("", |m| m.as_str())),
            body: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        },
        None => Document {
            metadata: Metadata::new(),
            body: raw.to_string(),
        },
    }
}

/// Parse the text between the delimiters into a [`Metadata`] mapping.
///
/// Each line containing a `:` contributes one entry: the substring before the
/// first `:` (trimmed) is the key, everything after (trimmed) the value. A
/// value of the form `[a, b, c]` becomes a list of trimmed elements. A
/// duplicate key keeps its last occurrence.
pub fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        metadata.insert(key, parse_value(value.trim()));
    }
    metadata
}

fn parse_value(value: &str) -> FieldValue {
    if let Some(interior) = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        FieldValue::List(interior.split(',').map(|v| v.trim().to_string()).collect())
    } else {
        FieldValue::Scalar(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_key_value_and_body() {
        let doc = split_document("---\nkey: value\n---\nBODY");
        assert_eq!(doc.metadata.str("key"), Some("value"));
        assert_eq!(doc.body, "BODY");
    }

    #[test]
    fn array_values_split_and_trim() {
        let doc = split_document("---\ntags: [a, b , c]\n---\nx");
        assert_eq!(
            doc.metadata.list("tags"),
            Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn no_frontmatter_is_passthrough() {
        let input = "# Just a heading\n\nAnd text.";
        let doc = split_document(input);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, input);
    }

    #[test]
    fn delimiter_must_start_at_position_zero() {
        let input = "\n---\nkey: value\n---\nBODY";
        let doc = split_document(input);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, input);
    }

    #[test]
    fn unclosed_block_is_all_body() {
        let input = "---\ntitle: Oops\nno closing line";
        let doc = split_document(input);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, input);
    }

    #[test]
    fn value_keeps_colons_after_the_first() {
        let doc = split_document("---\nlink: https://example.com/x\n---\n");
        assert_eq!(doc.metadata.str("link"), Some("https://example.com/x"));
    }

    #[test]
    fn colonless_lines_are_ignored() {
        let doc = split_document("---\njust some words\ntitle: Kept\n---\nb");
        assert_eq!(doc.metadata.len(), 1);
        assert_eq!(doc.metadata.str("title"), Some("Kept"));
    }

    #[test]
    fn duplicate_key_last_wins() {
        let doc = split_document("---\ntitle: First\ntitle: Second\n---\nb");
        assert_eq!(doc.metadata.str("title"), Some("Second"));
    }

    #[test]
    fn empty_value_is_kept_as_empty_scalar() {
        let doc = split_document("---\nsubtitle:\n---\nb");
        assert_eq!(doc.metadata.str("subtitle"), Some(""));
    }

    #[test]
    fn empty_block_yields_empty_metadata() {
        let doc = split_document("---\n\n---\nBODY");
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "BODY");
    }

    #[test]
    fn body_may_contain_later_rules() {
        let doc = split_document("---\na: 1\n---\nfirst\n---\nsecond");
        assert_eq!(doc.body, "first\n---\nsecond");
    }
}
