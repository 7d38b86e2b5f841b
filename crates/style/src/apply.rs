//! Whole-tree style resolution.
//!
//! One pass over the document attaches a resolved class list to every
//! styled node: directives, headings, links, images, styled text runs,
//! icons, and inline component spans. Nodes never read each other's
//! resolution, so the walk is order-independent in effect even though it
//! runs in source order.

use styledown_core::{
    Diagnostic, DiagnosticCode, Document, Inline, Node, Position, Styling,
};

use crate::registry::ComponentRegistry;
use crate::resolve::StyleResolver;

/// Resolve every styled node in the document.
///
/// Returns accumulated warnings (unknown components and unknown modifiers).
pub fn resolve_document(
    document: &mut Document,
    registry: &ComponentRegistry,
    resolver: &StyleResolver<'_>,
) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    for node in &mut document.children {
        resolve_node(node, registry, resolver, &mut warnings);
    }
    warnings
}

fn resolve_node(
    node: &mut Node,
    registry: &ComponentRegistry,
    resolver: &StyleResolver<'_>,
    warnings: &mut Vec<Diagnostic>,
) {
    match node {
        Node::Directive(directive) => {
            let definition = registry.get(&directive.name);
            if definition.is_none() {
                log::debug!("unknown component `{}`", directive.name);
                warnings.push(Diagnostic::new(
                    DiagnosticCode::UnknownComponent,
                    format!("unknown component `{}`", directive.name),
                    directive.position,
                ));
            }
            resolve_styling(
                &mut directive.styling,
                definition,
                directive.position,
                resolver,
                warnings,
            );
            for child in &mut directive.children {
                resolve_node(child, registry, resolver, warnings);
            }
        }
        Node::Heading(heading) => {
            resolve_styling(&mut heading.styling, None, heading.position, resolver, warnings);
            resolve_inlines(&mut heading.children, registry, resolver, warnings);
        }
        Node::Paragraph(paragraph) => {
            resolve_inlines(&mut paragraph.children, registry, resolver, warnings);
        }
        Node::BlockQuote(quote) => {
            for child in &mut quote.children {
                resolve_node(child, registry, resolver, warnings);
            }
        }
        Node::List(list) => {
            for item in &mut list.items {
                for child in &mut item.children {
                    resolve_node(child, registry, resolver, warnings);
                }
            }
        }
        Node::Table(table) => {
            for row in &mut table.rows {
                for cell in &mut row.cells {
                    resolve_inlines(&mut cell.children, registry, resolver, warnings);
                }
            }
        }
        Node::CodeBlock(_) | Node::ThematicBreak | Node::Html(_) => {}
    }
}

fn resolve_inlines(
    children: &mut [Inline],
    registry: &ComponentRegistry,
    resolver: &StyleResolver<'_>,
    warnings: &mut Vec<Diagnostic>,
) {
    for child in children {
        match child {
            Inline::Link(link) => {
                resolve_styling(&mut link.styling, None, link.position, resolver, warnings);
                resolve_inlines(&mut link.children, registry, resolver, warnings);
            }
            Inline::Image(image) => {
                resolve_styling(&mut image.styling, None, image.position, resolver, warnings);
            }
            Inline::Styled(span) => {
                resolve_styling(&mut span.styling, None, span.position, resolver, warnings);
            }
            Inline::Icon(icon) => {
                let definition = registry.get("icon");
                resolve_styling(&mut icon.styling, definition, icon.position, resolver, warnings);
            }
            Inline::InlineComponent(component) => {
                let definition = registry.get(&component.name);
                if definition.is_none() {
                    warnings.push(Diagnostic::new(
                        DiagnosticCode::UnknownComponent,
                        format!("unknown inline component `{}`", component.name),
                        component.position,
                    ));
                }
                resolve_styling(
                    &mut component.styling,
                    definition,
                    component.position,
                    resolver,
                    warnings,
                );
            }
            Inline::Emphasis(span) | Inline::Strong(span) | Inline::Delete(span) => {
                resolve_inlines(&mut span.children, registry, resolver, warnings);
            }
            Inline::Text(_) | Inline::InlineCode(_) | Inline::Break => {}
        }
    }
}

fn resolve_styling(
    styling: &mut Styling,
    definition: Option<&crate::registry::ComponentDefinition>,
    at: Position,
    resolver: &StyleResolver<'_>,
    warnings: &mut Vec<Diagnostic>,
) {
    // Plain nodes with no component backing have nothing to resolve.
    if styling.raw_modifiers.is_empty() && definition.is_none() {
        return;
    }

    let resolution = resolver.resolve(definition, &styling.raw_modifiers, at);
    styling.classes = resolution.classes;
    styling.attributes = resolution.attributes;
    warnings.extend(resolution.warnings);
}
