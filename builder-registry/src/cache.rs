//! Memoizing type registry.

use crate::error::{RegistryError, RegistryResult};
use crate::source::TypeSource;
use async_trait::async_trait;
use builder_model::{ModelAttribute, StructuredType, TypeDefinition, TypeKey};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// Resolves structured types to their complete attribute lists.
#[async_trait]
pub trait TypeRegistry: Send + Sync {
    /// Returns the definition of `ty` with every attribute, inherited ones
    /// first, in declaration order.
    async fn resolve(&self, ty: &StructuredType) -> RegistryResult<Arc<TypeDefinition>>;
}

#[async_trait]
impl<R: TypeRegistry + ?Sized> TypeRegistry for Arc<R> {
    async fn resolve(&self, ty: &StructuredType) -> RegistryResult<Arc<TypeDefinition>> {
        (**self).resolve(ty).await
    }
}

/// Cache slots for one type key.
///
/// `declared` holds the definition as fetched from the source; `resolved`
/// holds it with inherited attributes merged in. Only `resolved` waits on
/// other keys, and only on their `declared` slot, so concurrent resolutions
/// can never wait on each other in a loop.
#[derive(Default)]
struct Entry {
    declared: OnceCell<Arc<TypeDefinition>>,
    resolved: OnceCell<Arc<TypeDefinition>>,
}

/// A [`TypeRegistry`] that memoizes every resolution per type key.
///
/// Concurrent requests for the same key share one fetch and observe the
/// same `Arc<TypeDefinition>`. Failed fetches are not cached, so a later
/// request retries the source.
pub struct CachedRegistry<S> {
    source: S,
    entries: Mutex<HashMap<TypeKey, Arc<Entry>>>,
}

impl<S: TypeSource> CachedRegistry<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of fully resolved types currently cached.
    pub async fn cached_len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| e.resolved.initialized())
            .count()
    }

    /// True if `key` has been resolved and cached.
    pub async fn contains(&self, key: &TypeKey) -> bool {
        self.entries
            .lock()
            .await
            .get(key)
            .is_some_and(|e| e.resolved.initialized())
    }

    /// Drops every cached definition. In-flight resolutions complete against
    /// the entries they already hold.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    async fn entry(&self, key: &TypeKey) -> Arc<Entry> {
        let mut entries = self.entries.lock().await;
        Arc::clone(entries.entry(key.clone()).or_default())
    }

    async fn declared(&self, key: &TypeKey) -> RegistryResult<Arc<TypeDefinition>> {
        let entry = self.entry(key).await;
        entry
            .declared
            .get_or_try_init(|| async {
                debug!(type_key = %key, "Fetching type from source");
                self.source.fetch(key).await.map(Arc::new)
            })
            .await
            .cloned()
    }

    async fn resolve_key(&self, key: &TypeKey) -> RegistryResult<Arc<TypeDefinition>> {
        let entry = self.entry(key).await;
        if let Some(def) = entry.resolved.get() {
            return Ok(Arc::clone(def));
        }

        entry
            .resolved
            .get_or_try_init(|| async {
                let own = self.declared(key).await?;
                if own.extends.is_none() {
                    return Ok(own);
                }

                let mut lineage = vec![Arc::clone(&own)];
                let mut seen = HashSet::from([key.clone()]);
                while let Some(parent) = lineage.last().and_then(|d| d.extends.clone()) {
                    let parent_key = parent.key();
                    if !seen.insert(parent_key.clone()) {
                        return Err(RegistryError::InheritanceCycle(parent_key));
                    }
                    lineage.push(self.declared(&parent_key).await?);
                }

                debug!(type_key = %key, depth = lineage.len(), "Flattened inherited attributes");
                Ok(Arc::new(flatten(&lineage)))
            })
            .await
            .cloned()
    }
}

/// Merges a lineage (the type first, its root ancestor last) into one
/// definition. Ancestor attributes come first; a redeclared attribute
/// replaces the inherited one at the inherited position.
fn flatten(lineage: &[Arc<TypeDefinition>]) -> TypeDefinition {
    let mut attributes: Vec<ModelAttribute> = Vec::new();
    for def in lineage.iter().rev() {
        for attr in &def.attributes {
            match attributes.iter_mut().find(|a| a.name == attr.name) {
                Some(existing) => *existing = attr.clone(),
                None => attributes.push(attr.clone()),
            }
        }
    }

    let own = &lineage[0];
    TypeDefinition {
        ty: own.ty.clone(),
        extends: own.extends.clone(),
        attributes,
    }
}

#[async_trait]
impl<S: TypeSource> TypeRegistry for CachedRegistry<S> {
    async fn resolve(&self, ty: &StructuredType) -> RegistryResult<Arc<TypeDefinition>> {
        self.resolve_key(&ty.key()).await
    }
}
