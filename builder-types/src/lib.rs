//! Core identifier types for the model builder.
//!
//! This crate defines the identity primitives shared by the import engine
//! and its callers:
//! - [`NodeId`] identifies one node in an imported tree (UUID)
//! - [`IdGenerator`] is the capability the import engine draws ids from
//!
//! Three generators ship with the crate: [`UuidGenerator`] for production,
//! [`SequentialGenerator`] for readable ids, and [`FixedGenerator`] for
//! tests that compare whole trees.

mod generator;
mod ids;

pub use generator::{FixedGenerator, IdGenerator, SequentialGenerator, UuidGenerator};
pub use ids::NodeId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur parsing identifiers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
