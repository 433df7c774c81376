//! Schema-driven JSON import.
//!
//! [`NodeBuilder::import`] takes an arbitrary JSON document and a root
//! [`StructuredType`](builder_model::StructuredType) and produces a
//! [`RootNode`](builder_model::RootNode) whose shape follows the schema:
//!
//! - keys are matched to attributes by name; unknown keys and `meta` are
//!   skipped, and children follow the schema's declaration order
//! - any value may arrive bare or array-wrapped, and any instance may sit
//!   inside a `{"value": ..., "meta": {...}}` envelope
//! - several scalar instances collapse into one node holding a list
//! - several structured instances fan out into sibling nodes
//!
//! Type definitions come from an injected
//! [`TypeRegistry`](builder_registry::TypeRegistry) and node ids from an
//! injected [`IdGenerator`](builder_types::IdGenerator).

mod builder;
mod error;
mod instance;

pub use builder::NodeBuilder;
pub use error::{Expected, ImportError, ImportResult, JsonKind};
