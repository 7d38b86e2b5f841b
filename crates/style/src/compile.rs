//! The end-to-end compile pipeline.
//!
//! `compile` chains normalize, parse, and resolve over one document
//! against a read-only registry and shorthand table. Both
//! tables are `Sync`, so the same pair can serve any number of concurrent
//! compiles.

use once_cell::sync::Lazy;
use serde::Serialize;
use styledown_core::{
    CompileError, Diagnostic, Document, FixRecord, MarkdownOptions, ParseOptions, normalize,
    parse_document,
};

use crate::apply::resolve_document;
use crate::registry::{ComponentRegistry, default_registry};
use crate::resolve::StyleResolver;
use crate::shorthand::{ShorthandTable, default_shorthands};

/// Options for one compile.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Options for the underlying Markdown grammar.
    pub markdown: MarkdownOptions,
    /// Maximum directive nesting depth.
    pub max_nesting_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            markdown: MarkdownOptions::default(),
            max_nesting_depth: 32,
        }
    }
}

/// Aggregate counters for one compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileStats {
    /// Container directives in the final tree.
    pub directive_count: usize,
    /// Normalizer fixes applied.
    pub fix_count: usize,
    /// Warnings accumulated across parsing and resolution.
    pub warning_count: usize,
}

/// A compiled document.
#[derive(Debug)]
pub struct CompileResult {
    /// The tree with resolved styles attached.
    pub document: Document,
    /// Warnings in source order; never fatal.
    pub diagnostics: Vec<Diagnostic>,
    /// Normalizer fix records.
    pub fixes: Vec<FixRecord>,
    /// Aggregate counters.
    pub stats: CompileStats,
}

/// Compile one document against explicit tables.
pub fn compile(
    source: &str,
    registry: &ComponentRegistry,
    shorthands: &ShorthandTable,
    options: &CompileOptions,
) -> Result<CompileResult, CompileError> {
    let normalized = normalize(source);

    let parse_options = ParseOptions {
        markdown: options.markdown,
        max_nesting_depth: options.max_nesting_depth,
        inline_components: registry.inline_names(),
    };
    let outcome = parse_document(&normalized.source, &parse_options)?;

    let mut document = outcome.document;
    let mut diagnostics = outcome.diagnostics;

    let resolver = StyleResolver::new(shorthands);
    diagnostics.extend(resolve_document(&mut document, registry, &resolver));

    let stats = CompileStats {
        directive_count: document.directive_count(),
        fix_count: normalized.fixes.len(),
        warning_count: diagnostics.len(),
    };
    log::debug!(
        "compiled document: {} directives, {} fixes, {} warnings",
        stats.directive_count,
        stats.fix_count,
        stats.warning_count
    );

    Ok(CompileResult {
        document,
        diagnostics,
        fixes: normalized.fixes,
        stats,
    })
}

static DEFAULT_TABLES: Lazy<(ComponentRegistry, ShorthandTable)> =
    Lazy::new(|| (default_registry(), default_shorthands()));

/// Compile with the built-in registry and shorthand table.
pub fn compile_with_defaults(source: &str) -> Result<CompileResult, CompileError> {
    let (registry, shorthands) = &*DEFAULT_TABLES;
    compile(source, registry, shorthands, &CompileOptions::default())
}

/// Serialize a document tree as pretty JSON, for AST fixtures and debugging.
pub fn document_to_json(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use styledown_core::Node;

    #[test]
    fn compiles_with_default_tables() {
        let result = compile_with_defaults(":::card {elevated}\nHello.\n:::\n").expect("compiles");
        assert_eq!(result.stats.directive_count, 1);
        assert!(result.diagnostics.is_empty());
        match &result.document.children[0] {
            Node::Directive(card) => {
                let classes = card.styling.classes.classes();
                assert_eq!(classes[0], "card");
                assert!(classes.contains(&"card-elevated".to_string()));
            }
            other => panic!("expected directive, got {other:?}"),
        }
    }

    #[test]
    fn stats_count_fixes_and_warnings() {
        let result = compile_with_defaults(":::card{elevated}\n{wobbly} text {wobbly}\n:::\n")
            .expect("compiles");
        assert_eq!(result.stats.fix_count, 1);
        assert!(result.stats.warning_count >= 1);
        assert_eq!(result.stats.warning_count, result.diagnostics.len());
    }

    #[test]
    fn nesting_limit_surfaces_as_error() {
        let source = ":::card\n".repeat(40);
        let err = compile_with_defaults(&source).unwrap_err();
        assert!(matches!(err, CompileError::NestingTooDeep { .. }));
    }

    #[test]
    fn json_dump_is_stable() {
        let result = compile_with_defaults("# Title {huge}\n").expect("compiles");
        let a = document_to_json(&result.document).expect("serializes");
        let b = document_to_json(&result.document).expect("serializes");
        assert_eq!(a, b);
        assert!(a.contains("\"type\": \"heading\""));
        assert!(a.contains("text-2xl"));
    }
}
