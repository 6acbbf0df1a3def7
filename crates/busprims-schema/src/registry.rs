use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::descriptor::SchemaDescriptor;
use crate::error::Result;
use crate::json::JsonSchema;
use crate::typed::TypedSchema;

/// Immutable mapping from event name to schema descriptor.
///
/// Built once via [`SchemaRegistry::builder`] and never mutated afterward.
/// Event names are arbitrary strings — namespaced forms like
/// `"orders::created"` are just keys, the registry attaches no structure to
/// them.
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<dyn SchemaDescriptor>>,
}

impl SchemaRegistry {
    /// Start building a registry with default config.
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        Self::builder_with_config(RegistryConfig::default())
    }

    /// Start building a registry with explicit config.
    #[must_use]
    pub fn builder_with_config(config: RegistryConfig) -> SchemaRegistryBuilder {
        SchemaRegistryBuilder {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Look up the descriptor for an event name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SchemaDescriptor>> {
        self.schemas.get(name)
    }

    /// Check if an event name has a registered schema.
    #[must_use]
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Event names with registered schemas, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered event names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Builder for [`SchemaRegistry`]. Registering the same event name twice
/// replaces the earlier descriptor.
pub struct SchemaRegistryBuilder {
    schemas: HashMap<String, Arc<dyn SchemaDescriptor>>,
    config: RegistryConfig,
}

impl SchemaRegistryBuilder {
    /// Register a pre-built descriptor under `name`.
    #[must_use]
    pub fn descriptor(mut self, name: &str, schema: Arc<dyn SchemaDescriptor>) -> Self {
        self.schemas.insert(name.to_string(), schema);
        self
    }

    /// Register a JSON Schema source under `name`, compiling it now so bad
    /// schemas fail at construction rather than at first publish.
    pub fn json_schema(self, name: &str, schema_json: &str) -> Result<Self> {
        let compiled = JsonSchema::compile(name, schema_json, self.config)?;
        Ok(self.descriptor(name, Arc::new(compiled)))
    }

    /// Register a JSON Schema value under `name`.
    pub fn json_schema_value(self, name: &str, schema: &Value) -> Result<Self> {
        let compiled = JsonSchema::compile_value(name, schema, self.config)?;
        Ok(self.descriptor(name, Arc::new(compiled)))
    }

    /// Register a serde-typed contract under `name`.
    #[must_use]
    pub fn typed<T>(self, name: &str) -> Self
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        self.descriptor(name, Arc::new(TypedSchema::<T>::new()))
    }

    /// Freeze the mapping.
    #[must_use]
    pub fn build(self) -> SchemaRegistry {
        debug!(events = self.schemas.len(), "schema registry built");
        SchemaRegistry {
            schemas: self.schemas,
        }
    }
}
