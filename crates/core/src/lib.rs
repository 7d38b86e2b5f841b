#![deny(missing_docs)]
//! styledown core: syntax normalization, directive parsing, and the
//! document tree.
//!
//! This crate turns a Markdown superset (fenced `:::name {modifiers}`
//! component blocks, inline attribute blocks, and `:verb[label]{mods}`
//! spans) into a structured tree whose styled nodes carry raw modifier
//! tokens, ready for class resolution by `styledown-style`.
//!
//! The pipeline is forgiving by construction: the normalizer silently fixes
//! one well-defined spacing mistake, malformed attribute regions stay
//! literal text, and unterminated directives auto-close with a warning. The
//! only fatal parse error is the caller-configured nesting limit.

/// Attribute block tokenization.
pub mod attr;
/// Directive fence line grammar.
pub mod directive;
/// Positions, diagnostics, and fatal errors.
pub mod error;
/// Literal code fence tracking.
pub mod fence;
/// Adapter over the underlying Markdown grammar.
pub mod md;
/// Pre-parse syntax auto-correction.
pub mod normalize;
/// The line scanner producing the document tree.
pub mod scan;
/// Heading slug generation.
pub mod slug;
/// The styled document tree.
pub mod tree;

mod convert;
mod inline;

pub use attr::{ModifierToken, is_identifier, tokenize_attributes};
pub use directive::{DirectiveLine, DirectiveOpen, classify_line};
pub use error::{CompileError, Diagnostic, DiagnosticCode, Position};
pub use fence::CodeFenceTracker;
pub use md::MarkdownOptions;
pub use normalize::{FixRecord, NormalizeOutcome, normalize};
pub use scan::{ParseOptions, ParseOutcome, parse_document};
pub use slug::{Slugger, slugify};
pub use tree::{
    BlockQuoteNode, CellAlign, CodeBlockNode, DirectiveNode, Document, HeadingEntry, HeadingNode,
    HtmlNode, IconNode, ImageNode, Inline, InlineCodeNode, InlineComponentNode, LinkNode,
    ListItemNode, ListNode, Node, ParagraphNode, ResolvedStyle, SpanNode, StyledSpan, Styling,
    TableCellNode, TableNode, TableRowNode, TextNode,
};
