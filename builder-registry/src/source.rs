//! Type sources: where definitions come from before they are cached.

use crate::error::{RegistryError, RegistryResult};
use async_trait::async_trait;
use builder_model::{TypeDefinition, TypeKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A single, uncached lookup of a type definition.
///
/// Returns the definition exactly as declared: own attributes only, with
/// `extends` naming the parent if there is one.
#[async_trait]
pub trait TypeSource: Send + Sync {
    /// Fetches the definition for `key`, or [`RegistryError::UnknownType`].
    async fn fetch(&self, key: &TypeKey) -> RegistryResult<TypeDefinition>;
}

#[async_trait]
impl<S: TypeSource + ?Sized> TypeSource for Arc<S> {
    async fn fetch(&self, key: &TypeKey) -> RegistryResult<TypeDefinition> {
        (**self).fetch(key).await
    }
}

/// A set of type definitions, typically exported from a model as JSON.
///
/// ```json
/// {"types": [{"namespace": "cdm.base.staticdata.party", "name": "Party", "attributes": [...]}]}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> RegistryResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), types = catalog.types.len(), "Loaded type catalog");
        Ok(catalog)
    }
}

/// Definitions held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    types: HashMap<TypeKey, TypeDefinition>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from a catalog. Fails if a type is declared twice.
    pub fn from_catalog(catalog: Catalog) -> RegistryResult<Self> {
        let mut source = Self::new();
        for def in catalog.types {
            let key = def.key();
            if source.types.contains_key(&key) {
                return Err(RegistryError::DuplicateType(key));
            }
            source.types.insert(key, def);
        }
        Ok(source)
    }

    /// Adds or replaces a definition, returning the one it replaced.
    pub fn insert(&mut self, def: TypeDefinition) -> Option<TypeDefinition> {
        self.types.insert(def.key(), def)
    }

    pub fn with_type(mut self, def: TypeDefinition) -> Self {
        self.insert(def);
        self
    }

    pub fn get(&self, key: &TypeKey) -> Option<&TypeDefinition> {
        self.types.get(key)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[async_trait]
impl TypeSource for InMemorySource {
    async fn fetch(&self, key: &TypeKey) -> RegistryResult<TypeDefinition> {
        self.types
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownType(key.clone()))
    }
}
