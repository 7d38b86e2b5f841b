//! The styled document tree.
//!
//! The tree keeps the shape the underlying Markdown grammar would produce
//! for plain input, augmented with container directive nodes and raw
//! modifier lists on attribute-bearing nodes. Everything serializes with an
//! internal `type` tag so the whole AST can be dumped as JSON fixtures.
//!
//! Nodes and their raw modifiers are created once during parsing and never
//! mutated afterwards; the style resolver fills in [`Styling::classes`] and
//! [`Styling::attributes`] exactly once, downstream of parsing.

use serde::Serialize;

use crate::attr::ModifierToken;
use crate::error::Position;

/// Final, ordered, duplicate-free class list attached to a styled node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedStyle {
    classes: Vec<String>,
}

impl ResolvedStyle {
    /// An empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class unless it is already present; the first occurrence
    /// wins, matching CSS source-order specificity.
    ///
    /// Returns `true` when the class was appended.
    pub fn push(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.classes.iter().any(|c| *c == class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Append several classes in order, deduplicating each.
    pub fn extend<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            self.push(class);
        }
    }

    /// The resolved classes in order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether no classes resolved.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of resolved classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

/// Styling state carried by every attribute-bearing node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    /// Modifier tokens in source order, exactly as tokenized.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_modifiers: Vec<ModifierToken>,
    /// Resolved class list; empty until resolution runs.
    #[serde(skip_serializing_if = "ResolvedStyle::is_empty")]
    pub classes: ResolvedStyle,
    /// Retained key/value attributes for the downstream emitter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
}

impl Styling {
    /// Styling seeded from tokenized raw modifiers.
    pub fn from_tokens(raw_modifiers: Vec<ModifierToken>) -> Self {
        Self {
            raw_modifiers,
            ..Self::default()
        }
    }

    /// Whether the node carries no modifiers and no resolution output.
    pub fn is_plain(&self) -> bool {
        self.raw_modifiers.is_empty() && self.classes.is_empty() && self.attributes.is_empty()
    }
}

/// One entry of the document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingEntry {
    /// Heading depth (1-6).
    pub depth: u8,
    /// Deduplicated URL-safe slug.
    pub slug: String,
    /// Visible heading text.
    pub text: String,
}

/// A fully parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Top-level block nodes in source order.
    pub children: Vec<Node>,
    /// Outline of every heading, in source order.
    pub headings: Vec<HeadingEntry>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// A fenced container directive.
    Directive(DirectiveNode),
    /// A heading.
    Heading(HeadingNode),
    /// A paragraph.
    Paragraph(ParagraphNode),
    /// A fenced or indented code block.
    CodeBlock(CodeBlockNode),
    /// A block quote.
    BlockQuote(BlockQuoteNode),
    /// An ordered or unordered list.
    List(ListNode),
    /// A GFM table.
    Table(TableNode),
    /// A thematic break.
    ThematicBreak,
    /// Raw HTML passed through from the source.
    Html(HtmlNode),
}

/// A fenced container directive such as `:::card {elevated}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveNode {
    /// Directive name, matching `[a-z][a-z0-9-]*`.
    pub name: String,
    /// Raw modifiers and resolved style.
    pub styling: Styling,
    /// Nested content.
    pub children: Vec<Node>,
    /// Position of the opening fence.
    pub position: Position,
}

/// A heading with an outline slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingNode {
    /// Heading depth (1-6).
    pub depth: u8,
    /// Deduplicated URL-safe slug.
    pub slug: String,
    /// Trailing-attribute styling.
    pub styling: Styling,
    /// Inline content.
    pub children: Vec<Inline>,
    /// Position of the heading.
    pub position: Position,
}

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphNode {
    /// Inline content.
    pub children: Vec<Inline>,
}

/// A code block; its contents are never scanned for directive syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlockNode {
    /// Info-string language, when present.
    pub lang: Option<String>,
    /// Info-string metadata after the language, when present.
    pub meta: Option<String>,
    /// Literal code.
    pub value: String,
}

/// A block quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockQuoteNode {
    /// Quoted blocks.
    pub children: Vec<Node>,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNode {
    /// Whether the list is ordered.
    pub ordered: bool,
    /// Starting number of an ordered list.
    pub start: Option<u32>,
    /// Whether items are loose (spread) per CommonMark.
    pub spread: bool,
    /// The items.
    pub items: Vec<ListItemNode>,
}

/// One list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemNode {
    /// Task-list checkbox state, when present.
    pub checked: Option<bool>,
    /// Item content.
    pub children: Vec<Node>,
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellAlign {
    /// No explicit alignment.
    None,
    /// Left-aligned.
    Left,
    /// Right-aligned.
    Right,
    /// Center-aligned.
    Center,
}

/// A GFM table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNode {
    /// Per-column alignment.
    pub align: Vec<CellAlign>,
    /// All rows including the header row.
    pub rows: Vec<TableRowNode>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowNode {
    /// The cells.
    pub cells: Vec<TableCellNode>,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellNode {
    /// Inline content.
    pub children: Vec<Inline>,
}

/// Raw HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlNode {
    /// The HTML text verbatim.
    pub value: String,
}

/// An inline node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    /// Plain text.
    Text(TextNode),
    /// A text run that carried a trailing attribute block.
    Styled(StyledSpan),
    /// Emphasis.
    Emphasis(SpanNode),
    /// Strong emphasis.
    Strong(SpanNode),
    /// GFM strikethrough.
    Delete(SpanNode),
    /// Inline code.
    InlineCode(InlineCodeNode),
    /// A hard line break.
    Break,
    /// A link, possibly styled by a trailing attribute block.
    Link(LinkNode),
    /// An image, possibly styled by a trailing attribute block.
    Image(ImageNode),
    /// An icon span `:icon[name]{modifiers}`.
    Icon(IconNode),
    /// A registered inline component span `:verb[label]{modifiers}`.
    InlineComponent(InlineComponentNode),
}

/// Plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    /// The text.
    pub value: String,
}

/// A styled text run, rendered as a span by the emitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledSpan {
    /// The text with the attribute block stripped.
    pub value: String,
    /// Captured styling.
    pub styling: Styling,
    /// Position of the containing text run.
    pub position: Position,
}

/// A nested inline container (emphasis, strong, strikethrough).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanNode {
    /// Inline content.
    pub children: Vec<Inline>,
}

/// Inline code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineCodeNode {
    /// The code text.
    pub value: String,
}

/// A link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkNode {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
    /// Link text.
    pub children: Vec<Inline>,
    /// Trailing-attribute styling.
    pub styling: Styling,
    /// Position of the link.
    pub position: Position,
}

/// An image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    /// Source URL.
    pub url: String,
    /// Alternative text.
    pub alt: String,
    /// Optional title.
    pub title: Option<String>,
    /// Trailing-attribute styling.
    pub styling: Styling,
    /// Position of the image.
    pub position: Position,
}

/// An icon span.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconNode {
    /// Icon name from the bracket label.
    pub name: String,
    /// Styling from the brace block.
    pub styling: Styling,
    /// Position of the containing text run.
    pub position: Position,
}

/// An inline component span.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineComponentNode {
    /// Component name (the verb before the bracket).
    pub name: String,
    /// Bracket label text.
    pub label: String,
    /// Styling from the brace block.
    pub styling: Styling,
    /// Position of the containing text run.
    pub position: Position,
}

impl Node {
    /// Count directive nodes in this subtree.
    pub fn directive_count(&self) -> usize {
        match self {
            Node::Directive(d) => {
                1 + d.children.iter().map(Node::directive_count).sum::<usize>()
            }
            Node::BlockQuote(b) => b.children.iter().map(Node::directive_count).sum(),
            Node::List(l) => l
                .items
                .iter()
                .flat_map(|item| item.children.iter())
                .map(Node::directive_count)
                .sum(),
            _ => 0,
        }
    }
}

impl Document {
    /// Count directive nodes in the whole document.
    pub fn directive_count(&self) -> usize {
        self.children.iter().map(Node::directive_count).sum()
    }
}
