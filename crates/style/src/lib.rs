#![deny(missing_docs)]
//! styledown style engine: component registry, shorthand table, and class
//! resolution.
//!
//! This crate owns the semantic half of the pipeline. Given the raw-modifier
//! tree produced by `styledown-core`, it resolves every styled node into a
//! final, ordered, duplicate-free utility-class list plus retained key/value
//! attributes, ready for an external HTML/CSS emitter.
//!
//! Resolution is deterministic by construction: the registry and shorthand
//! table are ordered, read-only, and shared freely across concurrent
//! compiles, and the pipeline consults token source order only.

/// Whole-tree style resolution.
pub mod apply;
/// Parallel batch compilation.
pub mod batch;
/// The end-to-end compile pipeline.
pub mod compile;
/// Component registry.
pub mod registry;
/// The style resolution pipeline.
pub mod resolve;
/// The global shorthand table.
pub mod shorthand;

pub use apply::resolve_document;
pub use batch::{BatchInput, BatchItem, BatchOutcome, BatchStats, compile_batch};
pub use compile::{
    CompileOptions, CompileResult, CompileStats, compile, compile_with_defaults, document_to_json,
};
pub use registry::{
    ComponentDefinition, ComponentRegistry, RegistryConfig, RegistryError, RegistryLoadError,
    default_registry,
};
pub use resolve::{Resolution, StyleResolver};
pub use shorthand::{
    ContextualFn, ShorthandContext, ShorthandExpansion, ShorthandTable, default_shorthands,
    is_color_token,
};
