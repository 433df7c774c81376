//! Shared fixtures for registry tests.

#![allow(dead_code)]

use async_trait::async_trait;
use builder_model::{BasicKind, Cardinality, ModelAttribute, StructuredType, TypeDefinition, TypeKey};
use builder_registry::{InMemorySource, RegistryResult, TypeSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const PARTY_NS: &str = "cdm.base.staticdata.party";

pub fn party() -> StructuredType {
    StructuredType::new(PARTY_NS, "Party")
}

pub fn legal_entity() -> StructuredType {
    StructuredType::new(PARTY_NS, "LegalEntity")
}

pub fn string_attr(name: &str) -> ModelAttribute {
    ModelAttribute::basic(name, BasicKind::String, Cardinality::optional())
}

pub fn party_definition() -> TypeDefinition {
    TypeDefinition::new(
        party(),
        vec![string_attr("name").with_metadata(), string_attr("partyId")],
    )
}

/// `LegalEntity extends Party`, redeclaring `name` and adding `entityId`.
pub fn legal_entity_definition() -> TypeDefinition {
    TypeDefinition::new(
        legal_entity(),
        vec![
            string_attr("entityId"),
            ModelAttribute::basic("name", BasicKind::String, Cardinality::one()),
        ],
    )
    .extending(party())
}

pub fn party_source() -> InMemorySource {
    InMemorySource::new()
        .with_type(party_definition())
        .with_type(legal_entity_definition())
}

/// Source that counts fetches and answers slowly enough for concurrent
/// callers to overlap.
pub struct CountingSource {
    pub inner: InMemorySource,
    pub fetches: AtomicUsize,
    pub delay: Duration,
}

impl CountingSource {
    pub fn new(inner: InMemorySource) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
            delay: Duration::from_millis(20),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TypeSource for CountingSource {
    async fn fetch(&self, key: &TypeKey) -> RegistryResult<TypeDefinition> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.inner.fetch(key).await
    }
}
