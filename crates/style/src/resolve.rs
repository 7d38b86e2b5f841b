//! The style resolution pipeline.
//!
//! Resolution is a fixed, ordered pipeline over one node's raw modifier
//! tokens: component defaults, then variant, then size, then shorthand
//! expansion, then literal classes; key/value tokens are retained as
//! attributes and never become classes. Later stages append and the final
//! list keeps the first occurrence of every class, matching CSS
//! first-in-stylesheet specificity.

use styledown_core::{
    Diagnostic, DiagnosticCode, ModifierToken, Position, ResolvedStyle, is_identifier,
};

use crate::registry::ComponentDefinition;
use crate::shorthand::{ShorthandContext, ShorthandTable, is_color_token};

/// Output of resolving one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Final, ordered, duplicate-free class list.
    pub classes: ResolvedStyle,
    /// Retained non-class attributes in source order.
    pub attributes: Vec<(String, String)>,
    /// Unknown-token warnings.
    pub warnings: Vec<Diagnostic>,
}

/// Resolves raw modifier tokens against a component definition and the
/// shorthand table.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    shorthands: &'a ShorthandTable,
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver over a shorthand table.
    pub fn new(shorthands: &'a ShorthandTable) -> Self {
        Self { shorthands }
    }

    /// Resolve one node's tokens.
    ///
    /// Identical `(definition, tokens)` inputs always produce identical
    /// output; table iteration order never enters the picture, only token
    /// source order and the ordered lookup tables.
    pub fn resolve(
        &self,
        definition: Option<&ComponentDefinition>,
        tokens: &[ModifierToken],
        at: Position,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        let mut consumed = vec![false; tokens.len()];

        if let Some(definition) = definition {
            resolution
                .classes
                .extend(definition.default_classes.iter().cloned());
            apply_category(
                &definition.variants,
                definition.default_variant.as_deref(),
                tokens,
                &mut consumed,
                &mut resolution.classes,
            );
            apply_category(
                &definition.sizes,
                definition.default_size.as_deref(),
                tokens,
                &mut consumed,
                &mut resolution.classes,
            );
        }

        let identifiers: Vec<&str> = tokens
            .iter()
            .filter_map(ModifierToken::as_identifier)
            .collect();
        let color = identifiers.iter().copied().find(|t| is_color_token(t));

        for (index, token) in tokens.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            match token {
                ModifierToken::Identifier { name } => {
                    let ctx = ShorthandContext {
                        token: name.as_str(),
                        siblings: identifiers.as_slice(),
                        color,
                    };
                    match self.shorthands.expand(&ctx) {
                        Some(classes) => resolution.classes.extend(classes),
                        None => {
                            // The tokenizer preserves malformed fragments
                            // verbatim so they can be named here.
                            let message = if is_identifier(name) {
                                format!("unknown style modifier `{name}`")
                            } else {
                                format!("malformed modifier token `{name}`")
                            };
                            resolution.warnings.push(Diagnostic::new(
                                DiagnosticCode::UnknownModifier,
                                message,
                                at,
                            ));
                        }
                    }
                }
                ModifierToken::LiteralClass { class } => {
                    // Verbatim, bypassing the shorthand table entirely.
                    resolution.classes.push(class.clone());
                }
                ModifierToken::KeyValue { key, value } => {
                    resolution.attributes.push((key.clone(), value.clone()));
                }
            }
        }

        resolution
    }
}

/// Apply one variant/size category: the first identifier token matching a
/// key wins and is consumed; with no match the default contributes instead.
fn apply_category(
    entries: &std::collections::BTreeMap<String, Vec<String>>,
    default: Option<&str>,
    tokens: &[ModifierToken],
    consumed: &mut [bool],
    classes: &mut ResolvedStyle,
) {
    if entries.is_empty() {
        return;
    }

    for (index, token) in tokens.iter().enumerate() {
        if consumed[index] {
            continue;
        }
        if let Some(name) = token.as_identifier()
            && let Some(list) = entries.get(name)
        {
            consumed[index] = true;
            classes.extend(list.iter().cloned());
            return;
        }
    }

    if let Some(default) = default
        && let Some(list) = entries.get(default)
    {
        classes.extend(list.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::shorthand::default_shorthands;

    fn definition() -> ComponentDefinition {
        let mut variants = BTreeMap::new();
        variants.insert("v".to_string(), vec!["b".to_string()]);
        let mut sizes = BTreeMap::new();
        sizes.insert("s".to_string(), vec!["c".to_string()]);
        ComponentDefinition {
            name: "demo".to_string(),
            element: "div".to_string(),
            default_classes: vec!["a".to_string()],
            default_variant: Some("v".to_string()),
            variants,
            default_size: Some("s".to_string()),
            sizes,
            inline: false,
        }
    }

    fn ids(tokens: &[&str]) -> Vec<ModifierToken> {
        tokens.iter().copied().map(ModifierToken::identifier).collect()
    }

    #[test]
    fn precedence_is_defaults_variant_size_shorthand() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let resolution = resolver.resolve(Some(&definition()), &ids(&["v", "s"]), Position::start());
        assert_eq!(resolution.classes.classes(), ["a", "b", "c"]);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn defaults_fill_in_when_no_tokens_match() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let resolution = resolver.resolve(Some(&definition()), &[], Position::start());
        assert_eq!(resolution.classes.classes(), ["a", "b", "c"]);
    }

    #[test]
    fn unknown_identifier_warns_and_is_dropped() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let resolution =
            resolver.resolve(None, &ids(&["not-a-real-shorthand"]), Position::new(3, 7));
        assert!(resolution.classes.is_empty());
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].code, DiagnosticCode::UnknownModifier);
        assert_eq!(resolution.warnings[0].line, 3);
    }

    #[test]
    fn literal_class_bypasses_the_table() {
        let table = ShorthandTable::new();
        let resolver = StyleResolver::new(&table);
        let tokens = vec![ModifierToken::literal_class("my-custom")];
        let resolution = resolver.resolve(None, &tokens, Position::start());
        assert_eq!(resolution.classes.classes(), ["my-custom"]);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn key_values_are_retained_not_classed() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let tokens = vec![
            ModifierToken::key_value("content", "#settings"),
            ModifierToken::identifier("bold"),
        ];
        let resolution = resolver.resolve(None, &tokens, Position::start());
        assert_eq!(resolution.classes.classes(), ["font-bold"]);
        assert_eq!(
            resolution.attributes,
            vec![("content".to_string(), "#settings".to_string())]
        );
    }

    #[test]
    fn contextual_glow_pairs_with_color() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let resolution = resolver.resolve(None, &ids(&["glow", "success"]), Position::start());
        assert_eq!(
            resolution.classes.classes(),
            ["glow-success", "text-success"]
        );

        let neutral = resolver.resolve(None, &ids(&["glow"]), Position::start());
        assert_eq!(neutral.classes.classes(), ["glow-neutral"]);
    }

    #[test]
    fn duplicate_classes_keep_first_occurrence() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let resolution = resolver.resolve(
            None,
            &ids(&["elevated", "rounded", "elevated"]),
            Position::start(),
        );
        // `elevated` expands to shadow-lg + rounded-lg; the standalone
        // `rounded` duplicate is folded into the first occurrence.
        assert_eq!(resolution.classes.classes(), ["shadow-lg", "rounded-lg"]);
    }

    #[test]
    fn variant_token_is_not_reinterpreted_as_shorthand() {
        // `elevated` is both a card variant and a global shorthand; on a
        // card the variant consumes it.
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let mut variants = BTreeMap::new();
        variants.insert(
            "elevated".to_string(),
            vec!["card-elevated".to_string()],
        );
        let definition = ComponentDefinition {
            name: "card".to_string(),
            element: "div".to_string(),
            default_classes: vec!["card".to_string()],
            default_variant: None,
            variants,
            default_size: None,
            sizes: BTreeMap::new(),
            inline: false,
        };
        let resolution =
            resolver.resolve(Some(&definition), &ids(&["elevated"]), Position::start());
        assert_eq!(resolution.classes.classes(), ["card", "card-elevated"]);
    }

    #[test]
    fn first_matching_variant_wins() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let mut variants = BTreeMap::new();
        variants.insert("one".to_string(), vec!["v-one".to_string()]);
        variants.insert("two".to_string(), vec!["v-two".to_string()]);
        let definition = ComponentDefinition {
            name: "demo".to_string(),
            element: "div".to_string(),
            default_classes: Vec::new(),
            default_variant: None,
            variants,
            default_size: None,
            sizes: BTreeMap::new(),
            inline: false,
        };
        // Source order, not map order, picks the winner; `two` then loses
        // its variant meaning and falls through to shorthand lookup.
        let resolution =
            resolver.resolve(Some(&definition), &ids(&["two", "one"]), Position::start());
        assert_eq!(resolution.classes.classes()[0], "v-two");
    }

    #[test]
    fn resolution_is_deterministic() {
        let table = default_shorthands();
        let resolver = StyleResolver::new(&table);
        let tokens = ids(&["elevated", "glow", "success", "x-unknown"]);
        let a = resolver.resolve(Some(&definition()), &tokens, Position::start());
        let b = resolver.resolve(Some(&definition()), &tokens, Position::start());
        assert_eq!(a, b);
    }
}
