//! Block-level conversion from MDAST into the styled document tree.

use std::collections::BTreeSet;

use markdown::mdast;

use crate::error::Position;
use crate::inline::{convert_inline, inline_text, peel_trailing_attributes};
use crate::slug::Slugger;
use crate::tree::{
    BlockQuoteNode, CellAlign, CodeBlockNode, HeadingEntry, HeadingNode, HtmlNode, Inline,
    ListItemNode, ListNode, Node, ParagraphNode, Styling, TableCellNode, TableNode, TableRowNode,
};

/// Shared state threaded through one segment's conversion.
pub(crate) struct TreeBuilder<'a> {
    /// Added to MDAST line numbers to make positions document-absolute.
    pub line_offset: usize,
    /// Registered inline component verbs.
    pub inline_verbs: &'a BTreeSet<String>,
    /// Document-wide slug allocator.
    pub slugger: &'a mut Slugger,
    /// Document outline accumulator.
    pub headings: &'a mut Vec<HeadingEntry>,
}

impl TreeBuilder<'_> {
    /// Document-absolute position of an MDAST node.
    pub(crate) fn position(&self, node: &mdast::Node) -> Position {
        match node.position() {
            Some(p) => Position::new(p.start.line + self.line_offset, p.start.column),
            None => Position::new(self.line_offset + 1, 1),
        }
    }
}

/// Convert a list of MDAST block nodes.
pub(crate) fn convert_blocks(nodes: Vec<mdast::Node>, b: &mut TreeBuilder<'_>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Some(block) = convert_block(node, b) {
            out.push(block);
        }
    }
    out
}

fn convert_block(node: mdast::Node, b: &mut TreeBuilder<'_>) -> Option<Node> {
    let position = b.position(&node);
    match node {
        mdast::Node::Paragraph(paragraph) => Some(Node::Paragraph(ParagraphNode {
            children: convert_inline_stream(paragraph.children, b),
        })),
        mdast::Node::Heading(heading) => Some(convert_heading(heading, position, b)),
        mdast::Node::Code(code) => Some(Node::CodeBlock(CodeBlockNode {
            lang: code.lang,
            meta: code.meta,
            value: code.value,
        })),
        mdast::Node::Blockquote(quote) => Some(Node::BlockQuote(BlockQuoteNode {
            children: convert_blocks(quote.children, b),
        })),
        mdast::Node::List(list) => Some(convert_list(list, b)),
        mdast::Node::Table(table) => Some(convert_table(table, b)),
        mdast::Node::ThematicBreak(_) => Some(Node::ThematicBreak),
        mdast::Node::Html(html) => Some(Node::Html(HtmlNode { value: html.value })),
        _ => {
            log::debug!("dropping unsupported block node at {position}");
            None
        }
    }
}

/// Convert a stream of MDAST inline nodes, applying span scanning and
/// attribute attachment.
pub(crate) fn convert_inline_stream(
    nodes: Vec<mdast::Node>,
    b: &mut TreeBuilder<'_>,
) -> Vec<Inline> {
    let mut out = Vec::new();
    for node in nodes {
        convert_inline(node, b, &mut out);
    }
    out
}

fn convert_heading(mut heading: mdast::Heading, position: Position, b: &mut TreeBuilder<'_>) -> Node {
    let tokens = peel_trailing_attributes(&mut heading.children);
    let children = convert_inline_stream(heading.children, b);
    let text = inline_text(&children);
    let slug = b.slugger.slug(&text);
    b.headings.push(HeadingEntry {
        depth: heading.depth,
        slug: slug.clone(),
        text,
    });
    Node::Heading(HeadingNode {
        depth: heading.depth,
        slug,
        styling: Styling::from_tokens(tokens),
        children,
        position,
    })
}

fn convert_list(list: mdast::List, b: &mut TreeBuilder<'_>) -> Node {
    let items = list
        .children
        .into_iter()
        .filter_map(|child| match child {
            mdast::Node::ListItem(item) => Some(ListItemNode {
                checked: item.checked,
                children: convert_blocks(item.children, b),
            }),
            _ => None,
        })
        .collect();
    Node::List(ListNode {
        ordered: list.ordered,
        start: list.start,
        spread: list.spread,
        items,
    })
}

fn convert_table(table: mdast::Table, b: &mut TreeBuilder<'_>) -> Node {
    let align = table
        .align
        .iter()
        .map(|kind| match kind {
            mdast::AlignKind::Left => CellAlign::Left,
            mdast::AlignKind::Right => CellAlign::Right,
            mdast::AlignKind::Center => CellAlign::Center,
            mdast::AlignKind::None => CellAlign::None,
        })
        .collect();
    let rows = table
        .children
        .into_iter()
        .filter_map(|child| match child {
            mdast::Node::TableRow(row) => Some(TableRowNode {
                cells: row
                    .children
                    .into_iter()
                    .filter_map(|cell| match cell {
                        mdast::Node::TableCell(cell) => Some(TableCellNode {
                            children: convert_inline_stream(cell.children, b),
                        }),
                        _ => None,
                    })
                    .collect(),
            }),
            _ => None,
        })
        .collect();
    Node::Table(TableNode { align, rows })
}
