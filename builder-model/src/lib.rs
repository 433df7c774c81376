//! Type model and node tree for the model builder.
//!
//! Defines the passive types every other builder crate depends on:
//! - [`ModelType`]: closed sum over basic, enumeration and structured types
//! - [`StructuredType`]: a namespaced reference, compared by identity
//! - [`TypeDefinition`]: a structured type with its ordered attributes
//! - [`ModelAttribute`]: a named, typed, cardinality-bounded member
//! - [`RootNode`] / [`Node`]: the tree produced by importing JSON
//!
//! The JSON representation uses camelCase keys and a `typeCategory`
//! discriminator so catalogs and trees match what the editor front end
//! exchanges.

mod attribute;
mod node;
mod types;

pub use attribute::{Cardinality, ModelAttribute};
pub use node::{Node, NodeContent, NodeValue, RootNode, Scalar};
pub use types::{BasicKind, BasicType, EnumType, ModelType, StructuredType, TypeDefinition, TypeKey};

/// Attribute name that always denotes non-schema metadata.
///
/// A JSON key with this name is never mapped to a node, and an attribute
/// declared with this name is never imported.
pub const META_KEY: &str = "meta";

/// Key holding the payload inside a metadata envelope.
pub const VALUE_KEY: &str = "value";
