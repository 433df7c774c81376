//! Type registry for the model builder.
//!
//! The import engine needs, for every structured type it meets, the ordered
//! list of that type's attributes. This crate supplies it:
//!
//! - [`TypeSource`]: one uncached lookup ([`InMemorySource`] backed by a
//!   [`Catalog`], or [`HttpSource`] against a remote registry API)
//! - [`TypeRegistry`]: what the import engine depends on
//! - [`CachedRegistry`]: an owned, shareable memoizing registry over any
//!   source; flattens `extends` chains so callers always see the complete
//!   attribute list
//!
//! A `CachedRegistry` is meant to live for one application session and be
//! injected wherever types are resolved.

mod cache;
mod config;
mod error;
mod http;
mod source;

pub use cache::{CachedRegistry, TypeRegistry};
pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use http::HttpSource;
pub use source::{Catalog, InMemorySource, TypeSource};
