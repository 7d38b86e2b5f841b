//! Component registry type definitions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single component definition, immutable for the duration of a compile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Component name; directives match it exactly.
    pub name: String,
    /// Target HTML element for the downstream emitter.
    pub element: String,
    /// Classes every instance receives.
    #[serde(default)]
    pub default_classes: Vec<String>,
    /// Variant used when no variant token is present.
    #[serde(default)]
    pub default_variant: Option<String>,
    /// Named, mutually-exclusive variants.
    #[serde(default)]
    pub variants: BTreeMap<String, Vec<String>>,
    /// Size used when no size token is present.
    #[serde(default)]
    pub default_size: Option<String>,
    /// Named, mutually-exclusive sizes.
    #[serde(default)]
    pub sizes: BTreeMap<String, Vec<String>>,
    /// Whether the component is written as an inline span
    /// (`:name[label]{mods}`) rather than a container directive.
    #[serde(default)]
    pub inline: bool,
}

/// Errors raised at registration time.
///
/// These are the only fatal errors in the style layer; they indicate caller
/// misuse, never bad document input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A component with this name is already registered.
    #[error("component `{name}` is already registered")]
    DuplicateComponent {
        /// The conflicting name.
        name: String,
    },
    /// `default_variant` does not name a configured variant.
    #[error("component `{component}` declares default variant `{variant}` but no such variant")]
    UnknownDefaultVariant {
        /// The component.
        component: String,
        /// The missing variant key.
        variant: String,
    },
    /// `default_size` does not name a configured size.
    #[error("component `{component}` declares default size `{size}` but no such size")]
    UnknownDefaultSize {
        /// The component.
        component: String,
        /// The missing size key.
        size: String,
    },
}

/// Read-only component registry keyed by exact name.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component.
    ///
    /// Duplicate names and dangling variant/size defaults are rejected here,
    /// so resolution never has to revisit these invariants.
    pub fn register(&mut self, definition: ComponentDefinition) -> Result<(), RegistryError> {
        if let Some(variant) = &definition.default_variant
            && !definition.variants.contains_key(variant)
        {
            return Err(RegistryError::UnknownDefaultVariant {
                component: definition.name.clone(),
                variant: variant.clone(),
            });
        }
        if let Some(size) = &definition.default_size
            && !definition.sizes.contains_key(size)
        {
            return Err(RegistryError::UnknownDefaultSize {
                component: definition.name.clone(),
                size: size.clone(),
            });
        }
        if self.components.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateComponent {
                name: definition.name,
            });
        }
        self.components.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Look up a component by exact name.
    pub fn get(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.get(name)
    }

    /// Names of the registered inline components, for the parser.
    pub fn inline_names(&self) -> BTreeSet<String> {
        self.components
            .values()
            .filter(|c| c.inline)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Iterate over all definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.components.values()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Serde transport for a registry, e.g. a JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Component definitions in declaration order.
    pub components: Vec<ComponentDefinition>,
}

impl ComponentRegistry {
    /// Build a registry from a deserialized config.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for definition in config.components {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Build a registry from a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, RegistryLoadError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        Ok(Self::from_config(config)?)
    }
}

/// Errors loading a registry from serialized config.
#[derive(Debug, Error)]
pub enum RegistryLoadError {
    /// The config document did not deserialize.
    #[error("invalid registry config: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// The config contained an invalid registration.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
