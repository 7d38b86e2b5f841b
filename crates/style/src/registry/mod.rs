//! Component registry: definitions, lookup, and built-in defaults.

pub mod defaults;
mod types;

pub use defaults::default_registry;
pub use types::{
    ComponentDefinition, ComponentRegistry, RegistryConfig, RegistryError, RegistryLoadError,
};
