//! Inline-level conversion: attribute attachment and bracket spans.
//!
//! Three inline constructs extend the base grammar:
//!
//! - a trailing `{...}` after a link or image (written as the next text
//!   sibling) attaches to that node;
//! - a trailing `{...}` terminating a text run turns the run into a styled
//!   span;
//! - `:icon[name]{mods}` and `:verb[label]{mods}` spans, dispatched by the
//!   verb before the bracket against the caller-supplied inline component
//!   set (`icon` is always recognized).
//!
//! A malformed region never fails anything; the text stays literal.

use markdown::mdast;

use crate::attr::tokenize_attributes;
use crate::convert::{TreeBuilder, convert_inline_stream};
use crate::directive::directive_name_len;
use crate::error::Position;
use crate::tree::{
    IconNode, ImageNode, Inline, InlineCodeNode, InlineComponentNode, LinkNode, SpanNode,
    StyledSpan, Styling, TextNode,
};

/// Convert one mdast inline node, appending one or more tree inlines.
pub(crate) fn convert_inline(node: mdast::Node, b: &mut TreeBuilder<'_>, out: &mut Vec<Inline>) {
    let position = b.position(&node);
    match node {
        mdast::Node::Text(text) => scan_text_value(&text.value, position, b, out),
        mdast::Node::Emphasis(em) => out.push(Inline::Emphasis(SpanNode {
            children: convert_inline_stream(em.children, b),
        })),
        mdast::Node::Strong(strong) => out.push(Inline::Strong(SpanNode {
            children: convert_inline_stream(strong.children, b),
        })),
        mdast::Node::Delete(del) => out.push(Inline::Delete(SpanNode {
            children: convert_inline_stream(del.children, b),
        })),
        mdast::Node::InlineCode(code) => {
            out.push(Inline::InlineCode(InlineCodeNode { value: code.value }));
        }
        mdast::Node::Break(_) => out.push(Inline::Break),
        mdast::Node::Link(link) => out.push(Inline::Link(LinkNode {
            url: link.url,
            title: link.title,
            children: convert_inline_stream(link.children, b),
            styling: Styling::default(),
            position,
        })),
        mdast::Node::Image(image) => out.push(Inline::Image(ImageNode {
            url: image.url,
            alt: image.alt,
            title: image.title,
            styling: Styling::default(),
            position,
        })),
        other => {
            let text = mdast_text(&other);
            if !text.is_empty() {
                out.push(Inline::Text(TextNode { value: text }));
            }
        }
    }
}

/// Scan a text value for bracket spans, emitting literal pieces between them.
fn scan_text_value(value: &str, position: Position, b: &mut TreeBuilder<'_>, out: &mut Vec<Inline>) {
    let mut literal_start = 0;
    let mut cursor = 0;
    let bytes = value.as_bytes();

    while cursor < bytes.len() {
        if bytes[cursor] == b':' && at_word_boundary(value, cursor) {
            if let Some((span, end)) = parse_bracket_span(value, cursor, position, b) {
                push_text(&value[literal_start..cursor], position, out);
                out.push(span);
                literal_start = end;
                cursor = end;
                continue;
            }
        }
        cursor += 1;
    }

    push_text(&value[literal_start..], position, out);
}

fn at_word_boundary(value: &str, at: usize) -> bool {
    value[..at]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric())
}

/// Parse `:verb[label]` plus an optional glued `{mods}` starting at `at`.
fn parse_bracket_span(
    value: &str,
    at: usize,
    position: Position,
    b: &mut TreeBuilder<'_>,
) -> Option<(Inline, usize)> {
    let rest = &value[at + 1..];
    let verb_len = directive_name_len(rest);
    if verb_len == 0 {
        return None;
    }
    let verb = &rest[..verb_len];

    let after_verb = &rest[verb_len..];
    let label_body = after_verb.strip_prefix('[')?;
    let close = label_body.find(']')?;
    let label = &label_body[..close];
    if label.is_empty() || label.contains('\n') {
        return None;
    }

    let is_icon = verb == "icon";
    if !is_icon && !b.inline_verbs.contains(verb) {
        return None;
    }

    // Bytes consumed so far: ':' + verb + '[' + label + ']'.
    let mut end = at + 1 + verb_len + 1 + close + 1;

    let mut tokens = Vec::new();
    if let Some(region) = value[end..].strip_prefix('{')
        && let Some(inner_end) = region.find('}')
        && !region[..inner_end].contains(['{', '\n'])
    {
        tokens = tokenize_attributes(&region[..inner_end]);
        end += 1 + inner_end + 1;
    }

    let styling = Styling::from_tokens(tokens);
    let span = if is_icon {
        Inline::Icon(IconNode {
            name: label.to_string(),
            styling,
            position,
        })
    } else {
        Inline::InlineComponent(InlineComponentNode {
            name: verb.to_string(),
            label: label.to_string(),
            styling,
            position,
        })
    };
    Some((span, end))
}

/// Push one literal text piece, applying attribute attachment rules.
fn push_text(value: &str, position: Position, out: &mut Vec<Inline>) {
    let mut value = value;

    // A leading `{...}` attaches to an immediately preceding link or image.
    if value.starts_with('{')
        && let Some((inner, rest_start)) = leading_attr_region(value)
        && let Some(styling) = attachable(out.last_mut())
    {
        styling.raw_modifiers = tokenize_attributes(inner);
        value = &value[rest_start..];
    }

    if value.is_empty() {
        return;
    }

    // A trailing `{...}` turns the remaining run into a styled span.
    if let Some((prefix_end, inner)) = trailing_attr_region(value) {
        let prefix = value[..prefix_end].trim_end();
        if !prefix.is_empty() {
            let styling = Styling::from_tokens(tokenize_attributes(inner));
            out.push(Inline::Styled(StyledSpan {
                value: prefix.to_string(),
                styling,
                position,
            }));
            return;
        }
    }

    out.push(Inline::Text(TextNode {
        value: value.to_string(),
    }));
}

fn attachable(last: Option<&mut Inline>) -> Option<&mut Styling> {
    match last? {
        Inline::Link(link) if link.styling.raw_modifiers.is_empty() => Some(&mut link.styling),
        Inline::Image(image) if image.styling.raw_modifiers.is_empty() => Some(&mut image.styling),
        _ => None,
    }
}

/// A `{...}` region at the start of `text`: returns (inner, rest offset).
fn leading_attr_region(text: &str) -> Option<(&str, usize)> {
    let body = text.strip_prefix('{')?;
    let close = body.find('}')?;
    let inner = &body[..close];
    if inner.trim().is_empty() || inner.contains(['{', '\n']) {
        return None;
    }
    Some((inner, 1 + close + 1))
}

/// A `{...}` region terminating `text`: returns (prefix end, inner).
fn trailing_attr_region(text: &str) -> Option<(usize, &str)> {
    if !text.ends_with('}') {
        return None;
    }
    let open = text.rfind('{')?;
    let inner = &text[open + 1..text.len() - 1];
    if inner.trim().is_empty() || inner.contains(['}', '\n']) {
        return None;
    }
    Some((open, inner))
}

/// Capture a trailing attribute region from a heading's last text child,
/// before inline conversion runs.
pub(crate) fn peel_trailing_attributes(
    children: &mut Vec<mdast::Node>,
) -> Vec<crate::attr::ModifierToken> {
    let Some(mdast::Node::Text(text)) = children.last_mut() else {
        return Vec::new();
    };
    let Some((prefix_end, inner)) = trailing_attr_region(&text.value) else {
        return Vec::new();
    };
    let tokens = tokenize_attributes(inner);
    let prefix = text.value[..prefix_end].trim_end().to_string();
    if prefix.is_empty() {
        children.pop();
    } else if let Some(mdast::Node::Text(text)) = children.last_mut() {
        text.value = prefix;
    }
    tokens
}

/// Plain-text fallback for inline node kinds outside the supported grammar.
fn mdast_text(node: &mdast::Node) -> String {
    let mut buffer = String::new();
    collect_text(node, &mut buffer);
    buffer
}

fn collect_text(node: &mdast::Node, buffer: &mut String) {
    match node {
        mdast::Node::Text(text) => buffer.push_str(&text.value),
        mdast::Node::InlineCode(code) => buffer.push_str(&code.value),
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    collect_text(child, buffer);
                }
            }
        }
    }
}

/// Extract the visible text of converted inlines, for slugs and the outline.
pub(crate) fn inline_text(children: &[Inline]) -> String {
    let mut buffer = String::new();
    collect_inline_text(children, &mut buffer);
    buffer.trim().to_string()
}

fn collect_inline_text(children: &[Inline], buffer: &mut String) {
    for child in children {
        match child {
            Inline::Text(text) => buffer.push_str(&text.value),
            Inline::Styled(span) => buffer.push_str(&span.value),
            Inline::InlineCode(code) => buffer.push_str(&code.value),
            Inline::Emphasis(span) | Inline::Strong(span) | Inline::Delete(span) => {
                collect_inline_text(&span.children, buffer);
            }
            Inline::Link(link) => collect_inline_text(&link.children, buffer),
            Inline::InlineComponent(component) => buffer.push_str(&component.label),
            Inline::Image(_) | Inline::Icon(_) | Inline::Break => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_region_requires_closing_at_end() {
        assert!(trailing_attr_region("text {bold}").is_some());
        assert!(trailing_attr_region("text {bold} more").is_none());
        assert!(trailing_attr_region("text {bold").is_none());
        assert!(trailing_attr_region("text").is_none());
    }

    #[test]
    fn trailing_region_rejects_empty_or_nested() {
        assert!(trailing_attr_region("text {}").is_none());
        assert!(trailing_attr_region("text {a {b}}").is_none());
    }

    #[test]
    fn leading_region_parses_inner_and_rest() {
        let (inner, rest) = leading_attr_region("{large} tail").unwrap();
        assert_eq!(inner, "large");
        assert_eq!(&"{large} tail"[rest..], " tail");
    }

    #[test]
    fn peel_takes_heading_attributes() {
        let mut children = vec![mdast::Node::Text(mdast::Text {
            value: "Title {huge center}".to_string(),
            position: None,
        })];
        let tokens = peel_trailing_attributes(&mut children);
        assert_eq!(tokens.len(), 2);
        match &children[0] {
            mdast::Node::Text(text) => assert_eq!(text.value, "Title"),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn peel_drops_text_that_was_only_attributes() {
        let mut children = vec![
            mdast::Node::InlineCode(mdast::InlineCode {
                value: "code".to_string(),
                position: None,
            }),
            mdast::Node::Text(mdast::Text {
                value: " {large}".to_string(),
                position: None,
            }),
        ];
        let tokens = peel_trailing_attributes(&mut children);
        assert_eq!(tokens.len(), 1);
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn peel_leaves_plain_headings_alone() {
        let mut children = vec![mdast::Node::Text(mdast::Text {
            value: "Plain title".to_string(),
            position: None,
        })];
        assert!(peel_trailing_attributes(&mut children).is_empty());
        assert_eq!(children.len(), 1);
    }
}
