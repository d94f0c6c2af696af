//! Hash and reap policies for the chained set.
//!
//! Both seams accept plain closures: any `Fn(&V, usize) -> usize` is a bucket
//! hash and any `FnMut(V)` is a reaper. The named defaults exist so the
//! common case needs no policy spelled out at all.

use std::hash::Hash;

use ahash::RandomState;

/// Placement policy: maps a value to a bucket index in `[0, buckets)`.
///
/// Must be deterministic for the lifetime of the set and agree with the
/// element's equality (equal values land in the same bucket for any count).
pub trait BucketHash<V> {
    fn bucket(&self, value: &V, buckets: usize) -> usize;
}

impl<V, F> BucketHash<V> for F
where
    F: Fn(&V, usize) -> usize,
{
    #[inline]
    fn bucket(&self, value: &V, buckets: usize) -> usize {
        self(value, buckets)
    }
}

/// Default hash family: `ahash` keyed per instance.
///
/// Seeds are drawn once at construction, so a set and its [`dup`] share
/// placement while unrelated sets do not.
///
/// [`dup`]: super::ChainSet::dup
#[derive(Clone, Default)]
pub struct RandomHash {
    state: RandomState,
}

impl RandomHash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Hash> BucketHash<V> for RandomHash {
    #[inline]
    fn bucket(&self, value: &V, buckets: usize) -> usize {
        debug_assert!(buckets > 0);
        (self.state.hash_one(value) % buckets as u64) as usize
    }
}

/// Release policy: consumes a value exactly once when its node is destroyed.
///
/// Invoked by `remove`, cursor removal, and `clear` when the heap cannot bulk
/// free. Values yielded to the caller (`take`) are not reaped.
pub trait Reaper<V> {
    fn reap(&mut self, value: V);
}

impl<V, F> Reaper<V> for F
where
    F: FnMut(V),
{
    #[inline]
    fn reap(&mut self, value: V) {
        self(value)
    }
}

/// Default reaper: the value is simply dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReap;

impl<V> Reaper<V> for NoReap {
    #[inline]
    fn reap(&mut self, value: V) {
        drop(value);
    }
}
