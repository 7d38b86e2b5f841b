//! Adapter over the underlying Markdown grammar (markdown-rs).
//!
//! Directive scanning is line-oriented and happens before this layer; each
//! stretch of plain Markdown between fences is handed to markdown-rs as one
//! segment and parsed into MDAST.

use markdown::mdast::Node as MdastNode;

/// Options for the underlying Markdown grammar.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown constructs (tables, strikethrough,
    /// task lists, autolink literals).
    pub gfm: bool,
    /// Allow raw HTML nodes in the tree.
    pub raw_html: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
}

impl MarkdownOptions {
    /// Convert to markdown-rs `ParseOptions`.
    pub(crate) fn to_parse_options(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            raw_html: false,
            code_indented: true,
        }
    }
}

/// Parse one Markdown segment into MDAST.
pub(crate) fn parse_segment(
    text: &str,
    options: MarkdownOptions,
) -> Result<MdastNode, String> {
    markdown::to_mdast(text, &options.to_parse_options()).map_err(|message| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast::Node;

    #[test]
    fn parses_plain_markdown() {
        let root = parse_segment("# Hi\n\nSome *text*.", MarkdownOptions::default())
            .expect("plain markdown parses");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn gfm_table_parses_when_enabled() {
        let source = "| a | b |\n| - | - |\n| 1 | 2 |";
        let root = parse_segment(source, MarkdownOptions::default()).expect("table parses");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert!(matches!(root.children.first(), Some(Node::Table(_))));
    }

    #[test]
    fn raw_html_is_off_by_default() {
        let root =
            parse_segment("<div>x</div>", MarkdownOptions::default()).expect("html-ish parses");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert!(!matches!(root.children.first(), Some(Node::Html(_))));
    }
}
