//! Directive fence line grammar.
//!
//! An opening fence is exactly three colons, a name matching
//! `[a-z][a-z0-9-]*`, and optionally whitespace plus one balanced
//! `{modifiers}` region ending the line. A closing fence is a bare `:::`.
//! Up to three spaces of indentation are tolerated, mirroring the CommonMark
//! fence rule; deeper indentation means indented code and is never scanned.

use crate::attr::{ModifierToken, tokenize_attributes};

/// A parsed opening fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOpen {
    /// Directive name, e.g. `card`.
    pub name: String,
    /// Tokenized attribute block, empty when no block was written.
    pub tokens: Vec<ModifierToken>,
}

/// Classification of one source line, outside of code fences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveLine {
    /// Opens a container directive.
    Open(DirectiveOpen),
    /// Closes the innermost open directive.
    Close,
    /// Looks like an opening fence but its attribute region is unbalanced;
    /// the line stays literal text and the scanner records a warning.
    MalformedOpen {
        /// The directive name on the broken line.
        name: String,
    },
    /// Anything else: ordinary Markdown.
    Other,
}

/// Classify one line of normalized source.
pub fn classify_line(line: &str) -> DirectiveLine {
    let trimmed = line.trim_end();
    let indent = trimmed.len() - trimmed.trim_start().len();
    if indent > 3 || trimmed.bytes().take(indent).any(|b| b == b'\t') {
        return DirectiveLine::Other;
    }
    let rest = &trimmed[indent..];

    if rest == ":::" {
        return DirectiveLine::Close;
    }

    let Some(after_colons) = rest.strip_prefix(":::") else {
        return DirectiveLine::Other;
    };
    if after_colons.starts_with(':') {
        // Four or more colons never open a directive.
        return DirectiveLine::Other;
    }

    let name_len = directive_name_len(after_colons);
    if name_len == 0 {
        return DirectiveLine::Other;
    }
    let name = &after_colons[..name_len];
    let after_name = &after_colons[name_len..];

    if after_name.is_empty() {
        return DirectiveLine::Open(DirectiveOpen {
            name: name.to_string(),
            tokens: Vec::new(),
        });
    }

    let attrs = after_name.trim_start();
    if attrs.len() == after_name.len() {
        // Junk glued to the name (the normalizer already fixed `name{`).
        return DirectiveLine::Other;
    }

    match parse_attr_region(attrs) {
        AttrRegion::Ok(inner) => DirectiveLine::Open(DirectiveOpen {
            name: name.to_string(),
            tokens: tokenize_attributes(inner),
        }),
        AttrRegion::Malformed => DirectiveLine::MalformedOpen {
            name: name.to_string(),
        },
        AttrRegion::NotARegion => DirectiveLine::Other,
    }
}

enum AttrRegion<'a> {
    Ok(&'a str),
    Malformed,
    NotARegion,
}

/// Expect one balanced `{...}` region spanning the rest of the line.
fn parse_attr_region(attrs: &str) -> AttrRegion<'_> {
    let Some(inner_and_close) = attrs.strip_prefix('{') else {
        return AttrRegion::NotARegion;
    };
    let Some(inner) = inner_and_close.strip_suffix('}') else {
        // Trailing junk after a closed region is not a fence at all;
        // a region that never closes is a malformed one.
        return if inner_and_close.contains('}') {
            AttrRegion::NotARegion
        } else {
            AttrRegion::Malformed
        };
    };
    if inner.contains('{') || inner.contains('}') {
        return AttrRegion::Malformed;
    }
    AttrRegion::Ok(inner)
}

/// Length of a leading directive name: `[a-z][a-z0-9-]*`.
pub(crate) fn directive_name_len(rest: &str) -> usize {
    let mut len = 0;
    for (i, c) in rest.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_lowercase()
        } else {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
        };
        if !valid {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}
