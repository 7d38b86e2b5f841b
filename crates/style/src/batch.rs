//! Parallel batch compilation.
//!
//! The registry and shorthand table are read-only and `Sync`, so a batch
//! fans out across documents with rayon; results come back in input order.

use rayon::prelude::*;

use crate::compile::{CompileOptions, CompileResult, compile};
use crate::registry::ComponentRegistry;
use crate::shorthand::ShorthandTable;

/// One document to compile.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Caller identifier, typically the file path.
    pub id: String,
    /// Document source.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Identifier matching the input.
    pub id: String,
    /// Compilation result, present on success.
    pub result: Option<CompileResult>,
    /// Error message, present on failure.
    pub error: Option<String>,
}

/// Aggregate statistics for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Documents processed.
    pub total: usize,
    /// Documents that compiled.
    pub succeeded: usize,
    /// Documents that hit the structural limit.
    pub failed: usize,
}

/// Result of a whole batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Per-document results in input order.
    pub items: Vec<BatchItem>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

/// Compile many documents in parallel against shared tables.
pub fn compile_batch(
    inputs: Vec<BatchInput>,
    registry: &ComponentRegistry,
    shorthands: &ShorthandTable,
    options: &CompileOptions,
) -> BatchOutcome {
    let items: Vec<BatchItem> = inputs
        .into_par_iter()
        .map(|input| match compile(&input.source, registry, shorthands, options) {
            Ok(result) => BatchItem {
                id: input.id,
                result: Some(result),
                error: None,
            },
            Err(err) => BatchItem {
                id: input.id,
                result: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let succeeded = items.iter().filter(|item| item.result.is_some()).count();
    let stats = BatchStats {
        total: items.len(),
        succeeded,
        failed: items.len() - succeeded,
    };

    BatchOutcome { items, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use crate::shorthand::default_shorthands;

    fn input(id: &str, source: &str) -> BatchInput {
        BatchInput {
            id: id.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn batch_preserves_input_order() {
        let registry = default_registry();
        let shorthands = default_shorthands();
        let outcome = compile_batch(
            vec![
                input("a.md", "# A\n"),
                input("b.md", ":::card\nB\n:::\n"),
                input("c.md", "plain\n"),
            ],
            &registry,
            &shorthands,
            &CompileOptions::default(),
        );
        let ids: Vec<_> = outcome.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["a.md", "b.md", "c.md"]);
        assert_eq!(outcome.stats.total, 3);
        assert_eq!(outcome.stats.succeeded, 3);
        assert_eq!(outcome.stats.failed, 0);
    }

    #[test]
    fn structural_failures_are_isolated() {
        let registry = default_registry();
        let shorthands = default_shorthands();
        let too_deep = ":::card\n".repeat(40);
        let outcome = compile_batch(
            vec![input("good.md", "# Fine\n"), input("bad.md", &too_deep)],
            &registry,
            &shorthands,
            &CompileOptions::default(),
        );
        assert_eq!(outcome.stats.succeeded, 1);
        assert_eq!(outcome.stats.failed, 1);
        assert!(outcome.items[0].result.is_some());
        assert!(outcome.items[1].error.as_deref().unwrap_or("").contains("nesting"));
    }
}
