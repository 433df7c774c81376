use crate::{BasicKind, BasicType, EnumType, ModelType, StructuredType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared minimum/maximum number of instances of an attribute.
///
/// `max: None` means unbounded. Cardinality is informational for import:
/// bounds are never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl Cardinality {
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Exactly one (`1..1`).
    pub const fn one() -> Self {
        Self::new(1, Some(1))
    }

    /// Zero or one (`0..1`).
    pub const fn optional() -> Self {
        Self::new(0, Some(1))
    }

    /// Zero or more (`0..*`).
    pub const fn many() -> Self {
        Self::new(0, None)
    }

    /// True if more than one instance is allowed.
    pub fn is_multiple(&self) -> bool {
        self.max.is_none_or(|max| max > 1)
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::one()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..*", self.min),
        }
    }
}

/// A named, typed member of a structured type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ModelType,
    #[serde(default)]
    pub cardinality: Cardinality,
    /// Set when the attribute is annotated as carrying a metadata envelope
    /// (`{"value": ..., "meta": {...}}`) in JSON.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub metadata: bool,
}

impl ModelAttribute {
    pub fn new(name: &str, ty: impl Into<ModelType>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            cardinality,
            metadata: false,
        }
    }

    /// Shorthand for a basic-typed attribute.
    pub fn basic(name: &str, kind: BasicKind, cardinality: Cardinality) -> Self {
        Self::new(name, BasicType::new(kind), cardinality)
    }

    /// Shorthand for an enumeration-typed attribute.
    pub fn enumeration(name: &str, ty: EnumType, cardinality: Cardinality) -> Self {
        Self::new(name, ty, cardinality)
    }

    /// Shorthand for a structured-typed attribute.
    pub fn structured(name: &str, ty: StructuredType, cardinality: Cardinality) -> Self {
        Self::new(name, ty, cardinality)
    }

    pub fn with_metadata(mut self) -> Self {
        self.metadata = true;
        self
    }

    /// True for the reserved `meta` attribute, which is never imported.
    pub fn is_meta(&self) -> bool {
        self.name == crate::META_KEY
    }
}
