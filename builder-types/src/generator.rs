//! Identifier generators.
//!
//! The import engine never mints ids itself; it asks an injected
//! [`IdGenerator`] for one per constructed node.

use crate::NodeId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Capability that supplies a fresh identifier for every constructed node.
///
/// Implementations must be safe to share across concurrent imports.
pub trait IdGenerator: Send + Sync {
    /// Returns the next identifier.
    fn next(&self) -> NodeId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn next(&self) -> NodeId {
        (**self).next()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next(&self) -> NodeId {
        (**self).next()
    }
}

/// Issues a fresh UUID v7 per call. Unique across calls and processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next(&self) -> NodeId {
        NodeId::new()
    }
}

/// Issues ids from a monotonically increasing counter.
///
/// Unique for the lifetime of the generator, which is all a single import
/// requires.
#[derive(Debug)]
pub struct SequentialGenerator {
    next: AtomicU64,
}

impl SequentialGenerator {
    /// Creates a generator whose first id is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a generator whose first id is `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Returns the counter value the next call will issue.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialGenerator {
    fn next(&self) -> NodeId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        NodeId::from_u128(u128::from(n))
    }
}

/// Returns the same id on every call.
///
/// Only useful in tests: fixing every id to one sentinel lets two trees be
/// compared with plain equality.
#[derive(Debug, Clone, Copy)]
pub struct FixedGenerator(NodeId);

impl FixedGenerator {
    /// Creates a generator that always returns `id`.
    #[must_use]
    pub const fn new(id: NodeId) -> Self {
        Self(id)
    }

    /// The sentinel returned by [`FixedGenerator::default`].
    pub const SENTINEL: NodeId = NodeId::from_u128(12345);
}

impl Default for FixedGenerator {
    fn default() -> Self {
        Self(Self::SENTINEL)
    }
}

impl IdGenerator for FixedGenerator {
    fn next(&self) -> NodeId {
        self.0
    }
}
