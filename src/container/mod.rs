//! Chained hash set with pluggable hashing, reaping, and node allocation.
//!
//! # Scope
//! `container` hosts the set itself plus the three policy seams it is
//! parameterised over. Policies are per-instance values, monomorphised through
//! generics so the hot paths inline; closures satisfy the hash and reap seams
//! directly.
//!
//! # Design themes
//! - Nodes live in a `u32`-indexed heap arena, so chains carry no lifetimes
//!   and node identity survives rehashing.
//! - Structural changes bump a mutation epoch; detached cursors compare
//!   epochs on demand instead of holding back-references.
//! - Misuse (stale cursors, double frees, foreign-bucket nodes) is a
//!   programmer error and fails assertions rather than returning errors.
//!
//! # Module map
//! - `policy`: `BucketHash` / `Reaper` traits, `RandomHash`, `NoReap`.
//! - `heap`: `Node`, the `NIL` sentinel, `NodeHeap`, `SlabHeap`, `ChunkHeap`.
//! - `chain_set`: `ChainSet`, the epoch-checked `Cursor`, borrowing `Iter`.

pub mod chain_set;
pub mod heap;
pub mod policy;

pub use chain_set::{ChainSet, Cursor, Iter};
pub use heap::{ChunkHeap, Node, NodeHeap, SlabHeap, NIL};
pub use policy::{BucketHash, NoReap, RandomHash, Reaper};

/// Bucket count used when a set allocates its first table, and the floor
/// enforced by [`ChainSet::set_buckets`].
pub const DEFAULT_INITIAL_BUCKETS: usize = 11;

/// Load threshold above which a collision-lengthened insert grows the table.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;
