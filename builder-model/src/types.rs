use crate::ModelAttribute;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Any type an attribute can refer to.
///
/// Serialized with a `typeCategory` discriminator:
/// `{"typeCategory": "structuredType", "name": "Party", "namespace": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "typeCategory", rename_all = "camelCase")]
pub enum ModelType {
    BasicType(BasicType),
    EnumType(EnumType),
    StructuredType(StructuredType),
}

impl ModelType {
    /// Returns the type's display name.
    pub fn name(&self) -> &str {
        match self {
            ModelType::BasicType(t) => t.name.as_str(),
            ModelType::EnumType(t) => &t.name,
            ModelType::StructuredType(t) => &t.name,
        }
    }

    /// True for basic and enumeration types, whose instances are scalars.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ModelType::StructuredType(_))
    }

    /// Returns the structured type reference, if this is one.
    pub fn as_structured(&self) -> Option<&StructuredType> {
        match self {
            ModelType::StructuredType(t) => Some(t),
            _ => None,
        }
    }
}

impl From<BasicType> for ModelType {
    fn from(t: BasicType) -> Self {
        ModelType::BasicType(t)
    }
}

impl From<EnumType> for ModelType {
    fn from(t: EnumType) -> Self {
        ModelType::EnumType(t)
    }
}

impl From<StructuredType> for ModelType {
    fn from(t: StructuredType) -> Self {
        ModelType::StructuredType(t)
    }
}

/// A scalar type such as `string` or `date`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasicType {
    pub name: BasicKind,
}

impl BasicType {
    pub fn new(name: BasicKind) -> Self {
        Self { name }
    }
}

/// The scalar kind of a [`BasicType`].
///
/// Unrecognized kinds are preserved in [`BasicKind::Other`] so a catalog
/// from a newer model version still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BasicKind {
    String,
    Int,
    Number,
    Boolean,
    Date,
    Time,
    DateTime,
    ZonedDateTime,
    Other(String),
}

impl BasicKind {
    pub fn as_str(&self) -> &str {
        match self {
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Number => "number",
            BasicKind::Boolean => "boolean",
            BasicKind::Date => "date",
            BasicKind::Time => "time",
            BasicKind::DateTime => "dateTime",
            BasicKind::ZonedDateTime => "zonedDateTime",
            BasicKind::Other(s) => s,
        }
    }
}

impl From<String> for BasicKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "string" => BasicKind::String,
            "int" => BasicKind::Int,
            "number" => BasicKind::Number,
            "boolean" => BasicKind::Boolean,
            "date" => BasicKind::Date,
            "time" => BasicKind::Time,
            "dateTime" => BasicKind::DateTime,
            "zonedDateTime" => BasicKind::ZonedDateTime,
            _ => BasicKind::Other(s),
        }
    }
}

impl From<BasicKind> for String {
    fn from(kind: BasicKind) -> Self {
        match kind {
            BasicKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, finite set of string values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl EnumType {
    pub fn new(namespace: &str, name: &str, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            description: None,
            values: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

/// Identity of a structured type: `(namespace, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey {
    pub namespace: String,
    pub name: String,
}

impl TypeKey {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Splits a qualified name such as `cdm.base.staticdata.party.Party` at
    /// its last `.`. Returns `None` when either side would be empty.
    pub fn parse_qualified(qualified: &str) -> Option<Self> {
        let (namespace, name) = qualified.rsplit_once('.')?;
        if namespace.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(namespace, name))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Reference to a structured type.
///
/// Equality and hashing use only the identity `(namespace, name)`; the
/// description is informational. The attribute list lives in the
/// corresponding [`TypeDefinition`] supplied by a type registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredType {
    pub name: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StructuredType {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(&self) -> TypeKey {
        TypeKey::new(&self.namespace, &self.name)
    }
}

impl PartialEq for StructuredType {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }
}

impl Eq for StructuredType {}

impl Hash for StructuredType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
    }
}

impl From<&TypeKey> for StructuredType {
    fn from(key: &TypeKey) -> Self {
        Self::new(&key.namespace, &key.name)
    }
}

/// A structured type together with its attributes in declaration order.
///
/// `attributes` holds the type's own declarations. When the type `extends`
/// another, a registry flattens the inherited attributes in front of them
/// before handing the definition to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(flatten)]
    pub ty: StructuredType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<StructuredType>,
    #[serde(default)]
    pub attributes: Vec<ModelAttribute>,
}

impl TypeDefinition {
    pub fn new(ty: StructuredType, attributes: Vec<ModelAttribute>) -> Self {
        Self {
            ty,
            extends: None,
            attributes,
        }
    }

    pub fn extending(mut self, parent: StructuredType) -> Self {
        self.extends = Some(parent);
        self
    }

    pub fn key(&self) -> TypeKey {
        self.ty.key()
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&ModelAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
