//! Error types for type resolution.

use builder_model::TypeKey;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while resolving types.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The source has no definition for this type.
    #[error("unknown type: {0}")]
    UnknownType(TypeKey),

    /// The type's `extends` chain loops back on itself.
    #[error("inheritance cycle through type: {0}")]
    InheritanceCycle(TypeKey),

    /// A catalog declares the same type twice.
    #[error("duplicate type definition: {0}")]
    DuplicateType(TypeKey),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote registry answered with a non-success status.
    #[error("registry API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RegistryError {
    /// True when the failure means the type does not exist, as opposed to
    /// the source being unreachable or misconfigured.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, RegistryError::UnknownType(_))
    }
}
