//! Error types for JSON import.

use builder_model::TypeKey;
use builder_registry::RegistryError;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that abort an import. No partial tree is ever returned.
///
/// `path` is the dotted chain of attribute names below the root type,
/// e.g. `person.personId.identifier`.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not a JSON object.
    #[error("document must be a JSON object, found {found}")]
    RootNotObject { found: JsonKind },

    /// The root type could not be resolved.
    #[error("cannot resolve root type {ty}")]
    RootUnresolved {
        ty: TypeKey,
        #[source]
        source: RegistryError,
    },

    /// A structured attribute's type could not be resolved.
    #[error("cannot resolve type {ty} of attribute `{path}`")]
    UnresolvedType {
        path: String,
        ty: TypeKey,
        #[source]
        source: RegistryError,
    },

    /// An instance has the wrong JSON shape for its attribute's type.
    #[error("malformed instance at `{path}`: expected {expected}, found {found}")]
    MalformedInstance {
        path: String,
        expected: Expected,
        found: JsonKind,
    },
}

impl ImportError {
    /// The attribute path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            ImportError::UnresolvedType { path, .. } | ImportError::MalformedInstance { path, .. } => {
                Some(path)
            }
            ImportError::RootNotObject { .. } | ImportError::RootUnresolved { .. } => None,
        }
    }
}

/// What an attribute's type requires of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A string, number or boolean (basic and enumeration types).
    Scalar,
    /// A JSON object (structured types).
    Object,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Scalar => f.write_str("a scalar"),
            Expected::Object => f.write_str("an object"),
        }
    }
}

/// Shape of a JSON value, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "a boolean",
            JsonKind::Number => "a number",
            JsonKind::String => "a string",
            JsonKind::Array => "an array",
            JsonKind::Object => "an object",
        };
        f.write_str(s)
    }
}
