//! Built-in component definitions.
//!
//! A compact default set so the engine is usable and testable out of the
//! box. Production deployments replace or extend this from config; the
//! exhaustive per-component class tables live outside this crate.

use std::collections::BTreeMap;

use super::types::{ComponentDefinition, ComponentRegistry};

fn classes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| (*c).to_string()).collect()
}

fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, list)| ((*key).to_string(), classes(list)))
        .collect()
}

/// Create the default component registry.
pub fn default_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();

    let components = vec![
        ComponentDefinition {
            name: "card".to_string(),
            element: "div".to_string(),
            default_classes: classes(&["card"]),
            default_variant: Some("flat".to_string()),
            variants: table(&[
                ("flat", &[]),
                ("bordered", &["card-bordered"]),
                ("elevated", &["card-elevated", "shadow-lg"]),
            ]),
            default_size: Some("md".to_string()),
            sizes: table(&[("sm", &["p-2"]), ("md", &["p-4"]), ("lg", &["p-6"])]),
            inline: false,
        },
        ComponentDefinition {
            name: "alert".to_string(),
            element: "aside".to_string(),
            default_classes: classes(&["alert"]),
            default_variant: Some("info".to_string()),
            variants: table(&[
                ("info", &["alert-info"]),
                ("success", &["alert-success"]),
                ("warning", &["alert-warning"]),
                ("error", &["alert-error"]),
            ]),
            default_size: None,
            sizes: BTreeMap::new(),
            inline: false,
        },
        ComponentDefinition {
            name: "tabs".to_string(),
            element: "div".to_string(),
            default_classes: classes(&["tabs"]),
            default_variant: Some("underline".to_string()),
            variants: table(&[
                ("underline", &["tabs-underline"]),
                ("boxed", &["tabs-boxed"]),
                ("pills", &["tabs-pills"]),
            ]),
            default_size: None,
            sizes: BTreeMap::new(),
            inline: false,
        },
        ComponentDefinition {
            name: "grid".to_string(),
            element: "div".to_string(),
            default_classes: classes(&["grid", "gap-4"]),
            default_variant: None,
            variants: BTreeMap::new(),
            default_size: None,
            sizes: BTreeMap::new(),
            inline: false,
        },
        ComponentDefinition {
            name: "button".to_string(),
            element: "a".to_string(),
            default_classes: classes(&["btn"]),
            default_variant: Some("primary".to_string()),
            variants: table(&[
                ("primary", &["btn-primary"]),
                ("secondary", &["btn-secondary"]),
                ("outline", &["btn-outline"]),
            ]),
            default_size: Some("md".to_string()),
            sizes: table(&[
                ("sm", &["btn-sm"]),
                ("md", &[]),
                ("lg", &["btn-lg"]),
            ]),
            inline: false,
        },
        ComponentDefinition {
            name: "badge".to_string(),
            element: "span".to_string(),
            default_classes: classes(&["badge"]),
            default_variant: Some("neutral".to_string()),
            variants: table(&[
                ("neutral", &["badge-neutral"]),
                ("success", &["badge-success"]),
                ("warning", &["badge-warning"]),
                ("error", &["badge-error"]),
            ]),
            default_size: Some("md".to_string()),
            sizes: table(&[
                ("sm", &["badge-sm"]),
                ("md", &[]),
                ("lg", &["badge-lg"]),
            ]),
            inline: true,
        },
        ComponentDefinition {
            name: "tooltip".to_string(),
            element: "span".to_string(),
            default_classes: classes(&["tooltip"]),
            default_variant: None,
            variants: BTreeMap::new(),
            default_size: None,
            sizes: BTreeMap::new(),
            inline: true,
        },
        ComponentDefinition {
            name: "icon".to_string(),
            element: "span".to_string(),
            default_classes: classes(&["icon"]),
            default_variant: None,
            variants: BTreeMap::new(),
            default_size: Some("md".to_string()),
            sizes: table(&[
                ("sm", &["icon-sm"]),
                ("md", &[]),
                ("lg", &["icon-lg"]),
                ("xl", &["icon-xl"]),
            ]),
            inline: true,
        },
    ];

    for definition in components {
        registry
            .register(definition)
            .expect("default registry definitions are internally consistent");
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_registers_cleanly() {
        let registry = default_registry();
        assert!(registry.len() >= 8);
        assert!(registry.get("card").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn card_defaults_are_consistent() {
        let registry = default_registry();
        let card = registry.get("card").unwrap();
        assert_eq!(card.default_variant.as_deref(), Some("flat"));
        assert!(card.variants.contains_key("elevated"));
        assert_eq!(card.default_size.as_deref(), Some("md"));
    }

    #[test]
    fn inline_components_include_icon_and_badge() {
        let names = default_registry().inline_names();
        assert!(names.contains("icon"));
        assert!(names.contains("badge"));
        assert!(names.contains("tooltip"));
        assert!(!names.contains("card"));
    }
}
