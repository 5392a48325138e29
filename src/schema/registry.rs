//! Schema registry for loading, managing, and accessing attribute schemas.
//!
//! Schemas are immutable once loaded and are handed out as `Arc`s so that
//! resource definitions built at startup can share them freely.

use super::embedded;
use super::types::AttributeSchema;
use crate::error::BuildError;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Registry of attribute schemas keyed by schema id.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<AttributeSchema>>,
}

impl SchemaRegistry {
    /// Create a registry holding the schemas embedded in the library.
    pub fn new() -> Result<Self, BuildError> {
        Self::with_embedded_schemas()
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding the schemas embedded in the library.
    pub fn with_embedded_schemas() -> Result<Self, BuildError> {
        let mut registry = Self::empty();
        for content in embedded::all() {
            registry.add_schema(Self::load_schema_from_str(content)?)?;
        }
        Ok(registry)
    }

    /// Create a registry by loading every `*.json` file in a directory.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> Result<Self, BuildError> {
        let entries = fs::read_dir(schema_dir.as_ref()).map_err(|e| BuildError::SchemaLoad {
            message: format!("{}: {}", schema_dir.as_ref().display(), e),
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut registry = Self::empty();
        for path in paths {
            registry.add_schema(Self::load_schema_from_file(&path)?)?;
        }
        Ok(registry)
    }

    /// Load a schema from a JSON file.
    pub fn load_schema_from_file<P: AsRef<Path>>(path: P) -> Result<AttributeSchema, BuildError> {
        let content = fs::read_to_string(&path).map_err(|e| BuildError::SchemaLoad {
            message: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::load_schema_from_str(&content)
    }

    /// Load a schema from a JSON string.
    ///
    /// Structural invariants (unique names, alternative references, valid
    /// defaults) are checked during deserialization.
    pub fn load_schema_from_str(content: &str) -> Result<AttributeSchema, BuildError> {
        serde_json::from_str(content).map_err(|e| BuildError::SchemaLoad {
            message: e.to_string(),
        })
    }

    /// Add a schema; a schema id may only be registered once.
    pub fn add_schema(
        &mut self,
        schema: AttributeSchema,
    ) -> Result<Arc<AttributeSchema>, BuildError> {
        if self.schemas.contains_key(schema.id()) {
            return Err(BuildError::InvalidConfiguration {
                message: format!("schema '{}' is already registered", schema.id()),
            });
        }
        let schema = Arc::new(schema);
        self.schemas
            .insert(schema.id().to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Get a specific schema by id.
    pub fn get_schema(&self, id: &str) -> Option<Arc<AttributeSchema>> {
        self.schemas.get(id).cloned()
    }

    /// Get all registered schemas, ordered by id.
    pub fn get_schemas(&self) -> Vec<Arc<AttributeSchema>> {
        let mut schemas: Vec<_> = self.schemas.values().cloned().collect();
        schemas.sort_by(|a, b| a.id().cmp(b.id()));
        schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
