//! The line scanner: directive fences, Markdown segments, and the tree.
//!
//! Source is consumed line by line. Literal code fences are tracked first
//! and suppress directive recognition for their extent. Directive fences
//! manipulate an explicit open-fence stack, so a close fence always closes
//! exactly the innermost open directive. Everything else accumulates into
//! contiguous Markdown segments parsed through markdown-rs.

use std::collections::BTreeSet;

use crate::convert::{TreeBuilder, convert_blocks};
use crate::directive::{DirectiveLine, DirectiveOpen, classify_line};
use crate::error::{CompileError, Diagnostic, DiagnosticCode, Position};
use crate::fence::CodeFenceTracker;
use crate::md::{self, MarkdownOptions};
use crate::slug::Slugger;
use crate::tree::{
    DirectiveNode, Document, HeadingEntry, Inline, Node, ParagraphNode, Styling, TextNode,
};

/// Options for one parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Options for the underlying Markdown grammar.
    pub markdown: MarkdownOptions,
    /// Maximum directive nesting depth; exceeding it is the one fatal
    /// structural error.
    pub max_nesting_depth: usize,
    /// Names recognized as inline component verbs (`icon` is built in).
    pub inline_components: BTreeSet<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            markdown: MarkdownOptions::default(),
            max_nesting_depth: 32,
            inline_components: BTreeSet::new(),
        }
    }
}

/// A parsed document plus accumulated warnings.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The document tree with raw, unresolved modifiers.
    pub document: Document,
    /// Non-fatal findings in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse normalized source into a document tree.
///
/// The only error is the configured nesting limit; every local ambiguity
/// degrades to literal text or a warning instead.
pub fn parse_document(source: &str, options: &ParseOptions) -> Result<ParseOutcome, CompileError> {
    let mut scanner = Scanner::new(options);

    for (idx, line) in source.lines().enumerate() {
        scanner.advance(line, idx + 1)?;
    }

    Ok(scanner.finish())
}

struct Frame {
    open: DirectiveOpen,
    line: usize,
    column: usize,
    children: Vec<Node>,
}

struct Scanner<'a> {
    options: &'a ParseOptions,
    fences: CodeFenceTracker,
    stack: Vec<Frame>,
    root: Vec<Node>,
    segment_text: String,
    segment_start: Option<usize>,
    slugger: Slugger,
    headings: Vec<HeadingEntry>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            fences: CodeFenceTracker::new(),
            stack: Vec::new(),
            root: Vec::new(),
            segment_text: String::new(),
            segment_start: None,
            slugger: Slugger::new(),
            headings: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn advance(&mut self, line: &str, line_no: usize) -> Result<(), CompileError> {
        // Code fence recognition runs first and suppresses directive
        // matching for its extent.
        if self.fences.observe(line) {
            self.push_segment_line(line, line_no);
            return Ok(());
        }

        match classify_line(line) {
            DirectiveLine::Open(open) => {
                self.flush_segment();
                if self.stack.len() >= self.options.max_nesting_depth {
                    return Err(CompileError::NestingTooDeep {
                        limit: self.options.max_nesting_depth,
                        line: line_no,
                    });
                }
                let column = line.len() - line.trim_start().len() + 1;
                self.stack.push(Frame {
                    open,
                    line: line_no,
                    column,
                    children: Vec::new(),
                });
            }
            DirectiveLine::Close => {
                if self.stack.is_empty() {
                    // Stray close with nothing open: literal text.
                    self.push_segment_line(line, line_no);
                } else {
                    // Flush while the frame is still the segment's container.
                    self.flush_segment();
                    let frame = self.stack.pop().expect("stack checked non-empty");
                    let node = close_frame(frame);
                    self.current().push(node);
                }
            }
            DirectiveLine::MalformedOpen { name } => {
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::MalformedAttributes,
                    format!("unbalanced attribute block on `:::{name}`; treating the line as text"),
                    Position::new(line_no, 1),
                ));
                self.push_segment_line(line, line_no);
            }
            DirectiveLine::Other => self.push_segment_line(line, line_no),
        }
        Ok(())
    }

    fn finish(mut self) -> ParseOutcome {
        self.flush_segment();

        while let Some(frame) = self.stack.pop() {
            log::debug!(
                "auto-closing directive `:::{}` from line {}",
                frame.open.name,
                frame.line
            );
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::UnterminatedDirective,
                format!(
                    "directive `:::{}` opened at line {} was never closed",
                    frame.open.name, frame.line
                ),
                Position::new(frame.line, frame.column),
            ));
            let node = close_frame(frame);
            self.current().push(node);
        }

        self.diagnostics.sort_by_key(|d| (d.line, d.column));

        ParseOutcome {
            document: Document {
                children: self.root,
                headings: self.headings,
            },
            diagnostics: self.diagnostics,
        }
    }

    fn push_segment_line(&mut self, line: &str, line_no: usize) {
        if self.segment_start.is_none() {
            self.segment_start = Some(line_no);
        }
        self.segment_text.push_str(line);
        self.segment_text.push('\n');
    }

    fn flush_segment(&mut self) {
        let Some(start_line) = self.segment_start.take() else {
            return;
        };
        let text = std::mem::take(&mut self.segment_text);
        if text.trim().is_empty() {
            return;
        }

        let blocks = match md::parse_segment(&text, self.options.markdown) {
            Ok(markdown::mdast::Node::Root(root)) => {
                let mut builder = TreeBuilder {
                    line_offset: start_line - 1,
                    inline_verbs: &self.options.inline_components,
                    slugger: &mut self.slugger,
                    headings: &mut self.headings,
                };
                convert_blocks(root.children, &mut builder)
            }
            Ok(_) => Vec::new(),
            Err(message) => {
                // The grammar rejected the segment; keep the text so
                // nothing the author wrote is lost.
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::MarkdownParse,
                    message,
                    Position::new(start_line, 1),
                ));
                vec![Node::Paragraph(ParagraphNode {
                    children: vec![Inline::Text(TextNode { value: text })],
                })]
            }
        };

        self.current().extend(blocks);
    }

    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }
}

fn close_frame(frame: Frame) -> Node {
    Node::Directive(DirectiveNode {
        name: frame.open.name,
        styling: Styling::from_tokens(frame.open.tokens),
        children: frame.children,
        position: Position::new(frame.line, frame.column),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::ModifierToken;

    fn parse(source: &str) -> ParseOutcome {
        parse_document(source, &ParseOptions::default()).expect("parse succeeds")
    }

    fn only_directive(outcome: &ParseOutcome) -> &DirectiveNode {
        match outcome.document.children.as_slice() {
            [Node::Directive(d)] => d,
            other => panic!("expected one directive, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_simple_directive() {
        let outcome = parse(":::card {elevated}\nHello.\n:::\n");
        let card = only_directive(&outcome);
        assert_eq!(card.name, "card");
        assert_eq!(
            card.styling.raw_modifiers,
            vec![ModifierToken::identifier("elevated")]
        );
        assert!(matches!(card.children.as_slice(), [Node::Paragraph(_)]));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn close_fence_closes_innermost_directive() {
        let outcome = parse(":::card\n:::tabs\n## A\ntext\n:::\n:::\n");
        let card = only_directive(&outcome);
        assert_eq!(card.name, "card");
        assert_eq!(card.children.len(), 1);
        match &card.children[0] {
            Node::Directive(tabs) => {
                assert_eq!(tabs.name, "tabs");
                assert_eq!(tabs.children.len(), 2);
            }
            other => panic!("expected nested tabs, got {other:?}"),
        }
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn unterminated_directive_auto_closes_with_warning() {
        let outcome = parse(":::card\ntext\n");
        let card = only_directive(&outcome);
        assert_eq!(card.name, "card");
        assert_eq!(card.children.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].code,
            DiagnosticCode::UnterminatedDirective
        );
        assert_eq!(outcome.diagnostics[0].line, 1);
    }

    #[test]
    fn directive_fences_inside_code_blocks_stay_literal() {
        let outcome = parse("```\n:::card\n:::\n```\n");
        match outcome.document.children.as_slice() {
            [Node::CodeBlock(code)] => {
                assert_eq!(code.value, ":::card\n:::");
            }
            other => panic!("expected a code block, got {other:?}"),
        }
    }

    #[test]
    fn stray_close_fence_is_literal_text() {
        let outcome = parse("some text\n:::\nmore\n");
        assert!(outcome.diagnostics.is_empty());
        assert!(
            outcome
                .document
                .children
                .iter()
                .all(|n| matches!(n, Node::Paragraph(_)))
        );
    }

    #[test]
    fn malformed_fence_attributes_warn_and_stay_text() {
        let outcome = parse(":::card {elevated\ntext\n");
        assert!(outcome.document.directive_count() == 0);
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::MalformedAttributes)
        );
    }

    #[test]
    fn nesting_limit_is_fatal() {
        let source = ":::card\n".repeat(5);
        let options = ParseOptions {
            max_nesting_depth: 4,
            ..ParseOptions::default()
        };
        let err = parse_document(&source, &options).unwrap_err();
        match err {
            CompileError::NestingTooDeep { limit, line } => {
                assert_eq!(limit, 4);
                assert_eq!(line, 5);
            }
        }
    }

    #[test]
    fn nesting_at_the_limit_is_fine() {
        let source = ":::card\n:::card\n:::card\n:::\n:::\n:::\n";
        let options = ParseOptions {
            max_nesting_depth: 3,
            ..ParseOptions::default()
        };
        assert!(parse_document(&source, &options).is_ok());
    }

    #[test]
    fn segment_positions_are_document_absolute() {
        let outcome = parse(":::card\n\n## Inside\n\n:::\n");
        let card = only_directive(&outcome);
        match &card.children[0] {
            Node::Heading(heading) => {
                assert_eq!(heading.position.line, 3);
                assert_eq!(heading.slug, "inside");
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn headings_collect_across_segments() {
        let outcome = parse("# One\n:::card\n## Two\n:::\n# One\n");
        let slugs: Vec<_> = outcome
            .document
            .headings
            .iter()
            .map(|h| h.slug.as_str())
            .collect();
        assert_eq!(slugs, ["one", "two", "one-1"]);
    }

    #[test]
    fn blank_documents_parse_to_nothing() {
        let outcome = parse("");
        assert!(outcome.document.children.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn consecutive_directives_stay_siblings() {
        let outcome = parse(":::card\na\n:::\n:::card\nb\n:::\n");
        assert_eq!(outcome.document.children.len(), 2);
        assert_eq!(outcome.document.directive_count(), 2);
    }
}
