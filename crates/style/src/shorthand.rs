//! The global shorthand table.
//!
//! A shorthand maps one human-readable identifier to one or more CSS
//! utility classes. Expansions form a closed set: a literal class, a list,
//! or a contextual function invoked with the token's surroundings. The
//! table is ordered and read-only during resolution, so identical inputs
//! always expand identically.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Context handed to a contextual expansion.
#[derive(Debug, Clone, Copy)]
pub struct ShorthandContext<'a> {
    /// The token being expanded.
    pub token: &'a str,
    /// All identifier tokens from the same attribute block, source order.
    pub siblings: &'a [&'a str],
    /// A color-like identifier present in the same block, if any.
    pub color: Option<&'a str>,
}

/// A contextual expansion function.
///
/// Plain function pointers keep the set closed and the table `Sync`, so one
/// table can serve concurrent compiles.
pub type ContextualFn = fn(&ShorthandContext<'_>) -> Vec<String>;

/// One shorthand expansion.
#[derive(Debug, Clone)]
pub enum ShorthandExpansion {
    /// Expands to exactly one class.
    Literal(String),
    /// Expands to several classes in order.
    List(Vec<String>),
    /// Expands based on the surrounding attribute block.
    Contextual(ContextualFn),
}

/// Ordered, read-only shorthand table.
#[derive(Debug, Clone, Default)]
pub struct ShorthandTable {
    entries: BTreeMap<String, ShorthandExpansion>,
}

impl ShorthandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, expansion: ShorthandExpansion) {
        self.entries.insert(name.into(), expansion);
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&ShorthandExpansion> {
        self.entries.get(name)
    }

    /// Expand a token, if the table knows it.
    pub fn expand(&self, ctx: &ShorthandContext<'_>) -> Option<Vec<String>> {
        match self.entries.get(ctx.token)? {
            ShorthandExpansion::Literal(class) => Some(vec![class.clone()]),
            ShorthandExpansion::List(list) => Some(list.clone()),
            ShorthandExpansion::Contextual(expand) => Some(expand(ctx)),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge static (`Literal`/`List`) entries from a JSON object mapping
    /// shorthand names to a class string or an array of class strings.
    ///
    /// Contextual entries cannot be expressed in config; they are
    /// registered in code only.
    pub fn merge_static_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let entries: BTreeMap<String, StaticExpansion> = serde_json::from_str(json)?;
        for (name, entry) in entries {
            let expansion = match entry {
                StaticExpansion::One(class) => ShorthandExpansion::Literal(class),
                StaticExpansion::Many(list) => ShorthandExpansion::List(list),
            };
            self.insert(name, expansion);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StaticExpansion {
    One(String),
    Many(Vec<String>),
}

/// The color identifiers the contextual lens recognizes.
const COLOR_TOKENS: &[&str] = &[
    "primary",
    "secondary",
    "accent",
    "info",
    "success",
    "warning",
    "error",
];

/// Whether a token names a theme color.
pub fn is_color_token(token: &str) -> bool {
    COLOR_TOKENS.contains(&token)
}

/// Create the default shorthand table.
pub fn default_shorthands() -> ShorthandTable {
    let mut table = ShorthandTable::new();

    // Typography.
    table.insert("bold", ShorthandExpansion::Literal("font-bold".into()));
    table.insert("italic", ShorthandExpansion::Literal("italic".into()));
    table.insert("small", ShorthandExpansion::Literal("text-sm".into()));
    table.insert("large", ShorthandExpansion::Literal("text-lg".into()));
    table.insert("huge", ShorthandExpansion::Literal("text-2xl".into()));
    table.insert("center", ShorthandExpansion::Literal("text-center".into()));
    table.insert("tight", ShorthandExpansion::Literal("leading-tight".into()));
    table.insert("muted", ShorthandExpansion::Literal("text-muted".into()));
    table.insert(
        "large-bold",
        ShorthandExpansion::List(vec!["text-lg".into(), "font-bold".into()]),
    );

    // Aspect ratios, written as `16:9`-style identifiers.
    table.insert("16:9", ShorthandExpansion::Literal("aspect-video".into()));
    table.insert("1:1", ShorthandExpansion::Literal("aspect-square".into()));

    // Surfaces.
    table.insert("rounded", ShorthandExpansion::Literal("rounded-lg".into()));
    table.insert("padded", ShorthandExpansion::Literal("p-4".into()));
    table.insert(
        "elevated",
        ShorthandExpansion::List(vec!["shadow-lg".into(), "rounded-lg".into()]),
    );
    table.insert(
        "subtle",
        ShorthandExpansion::List(vec!["bg-surface".into(), "text-muted".into()]),
    );

    // Colors double as plain text-color shorthands and feed the
    // contextual lens below.
    for color in COLOR_TOKENS {
        table.insert(*color, ShorthandExpansion::Literal(format!("text-{color}")));
    }

    // Effects that tint themselves after a color in the same block.
    table.insert("glow", ShorthandExpansion::Contextual(expand_glow));
    table.insert("outline", ShorthandExpansion::Contextual(expand_outline));

    table
}

/// `glow` pairs with a color in the same block, else the neutral preset.
fn expand_glow(ctx: &ShorthandContext<'_>) -> Vec<String> {
    vec![format!("glow-{}", ctx.color.unwrap_or("neutral"))]
}

/// `outline` pairs with a color, else the default edge color.
fn expand_outline(ctx: &ShorthandContext<'_>) -> Vec<String> {
    match ctx.color {
        Some(color) => vec!["outline".into(), format!("outline-{color}")],
        None => vec!["outline".into(), "outline-edge".into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(token: &'a str, siblings: &'a [&'a str], color: Option<&'a str>) -> ShorthandContext<'a> {
        ShorthandContext {
            token,
            siblings,
            color,
        }
    }

    #[test]
    fn literal_expands_to_one_class() {
        let table = default_shorthands();
        assert_eq!(
            table.expand(&ctx("bold", &[], None)),
            Some(vec!["font-bold".to_string()])
        );
    }

    #[test]
    fn list_expands_in_order() {
        let table = default_shorthands();
        assert_eq!(
            table.expand(&ctx("large-bold", &[], None)),
            Some(vec!["text-lg".to_string(), "font-bold".to_string()])
        );
    }

    #[test]
    fn glow_matches_sibling_color() {
        let table = default_shorthands();
        assert_eq!(
            table.expand(&ctx("glow", &["glow", "success"], Some("success"))),
            Some(vec!["glow-success".to_string()])
        );
    }

    #[test]
    fn glow_alone_is_neutral() {
        let table = default_shorthands();
        assert_eq!(
            table.expand(&ctx("glow", &["glow"], None)),
            Some(vec!["glow-neutral".to_string()])
        );
    }

    #[test]
    fn unknown_token_expands_to_none() {
        let table = default_shorthands();
        assert_eq!(table.expand(&ctx("wobbly", &[], None)), None);
    }

    #[test]
    fn color_tokens_are_recognized() {
        assert!(is_color_token("success"));
        assert!(!is_color_token("elevated"));
    }

    #[test]
    fn static_json_entries_merge() {
        let mut table = ShorthandTable::new();
        table
            .merge_static_json(r#"{"brand": "text-brand", "hero": ["text-3xl", "font-black"]}"#)
            .expect("valid static entries");
        assert_eq!(
            table.expand(&ctx("brand", &[], None)),
            Some(vec!["text-brand".to_string()])
        );
        assert_eq!(
            table.expand(&ctx("hero", &[], None)),
            Some(vec!["text-3xl".to_string(), "font-black".to_string()])
        );
    }

    #[test]
    fn expansion_is_deterministic() {
        let table = default_shorthands();
        let a = table.expand(&ctx("glow", &["glow", "error"], Some("error")));
        let b = table.expand(&ctx("glow", &["glow", "error"], Some("error")));
        assert_eq!(a, b);
    }
}
