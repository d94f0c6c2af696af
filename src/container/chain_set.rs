//! Separately-chained hash set over a `u32`-indexed node heap.
//!
//! # Invariants
//! - `count` equals the number of nodes reachable from the bucket table, and
//!   equals the heap's live-node count.
//! - Every reachable node hashes to the bucket that holds it.
//! - The table is `None` only while the set is empty; once allotted it has a
//!   positive length until `reset`.
//! - No node is reachable from two chains and chains are acyclic.
//!
//! `check()` asserts all of the above; tests call it after every mutation
//! batch.
//!
//! # Mutation epochs
//! Every structural change (an insert that lands, a remove that lands, clear,
//! reset, rehash, bucket/threshold changes that rehash) bumps `mutation`.
//! Detached [`Cursor`]s snapshot the epoch at creation and compare on demand
//! via [`Cursor::valid`]; a cursor's own `remove` re-snapshots so its next
//! `valid` treats the self-inflicted change as expected.

use std::hash::Hash;
use std::marker::PhantomData;

use super::heap::{Node, NodeHeap, SlabHeap, NIL};
use super::policy::{BucketHash, NoReap, RandomHash, Reaper};
use super::{DEFAULT_INITIAL_BUCKETS, DEFAULT_LOAD_FACTOR};

/// Bucket count after a load-triggered grow: `2 * ceil(count / load) + 1`.
fn grown_buckets(count: usize, load_factor: f32) -> usize {
    2 * ((count as f64 / load_factor as f64).ceil() as usize) + 1
}

/// Chained hash set parameterised by hash, reap, and allocation policies.
///
/// Placement routes through the `BucketHash` policy, release through the
/// `Reaper` and `NodeHeap` policies. Average-case `add`/`contains`/`remove`
/// are O(1); chains stay short because a collision-lengthening insert that
/// pushes `count / buckets` past the load factor grows the table.
///
/// Single-owner and non-reentrant; nothing here is synchronized.
///
/// # Examples
/// ```
/// use bedrock_rs::container::ChainSet;
///
/// let mut set = ChainSet::new();
/// assert!(set.add(42));
/// assert!(!set.add(42));
/// assert!(set.contains(&42));
/// assert!(set.remove(&42));
/// assert!(set.is_empty());
/// ```
pub struct ChainSet<V, H = RandomHash, R = NoReap, A = SlabHeap<V>> {
    table: Option<Box<[u32]>>,
    count: usize,
    load_factor: f32,
    mutation: u64,
    hash: H,
    reap: R,
    heap: A,
    _values: PhantomData<V>,
}

impl<V: Eq + Hash> ChainSet<V> {
    /// An empty set with the default policies and no table yet.
    pub fn new() -> Self {
        Self::with_policies(RandomHash::new(), NoReap, SlabHeap::new())
    }

    /// An empty set with an exact, already-allotted bucket count.
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_config(
            RandomHash::new(),
            NoReap,
            SlabHeap::new(),
            buckets,
            DEFAULT_LOAD_FACTOR,
        )
    }
}

impl<V: Eq + Hash> Default for ChainSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H, R, A> ChainSet<V, H, R, A>
where
    V: PartialEq,
    H: BucketHash<V>,
    R: Reaper<V>,
    A: NodeHeap<V>,
{
    /// An empty set with explicit policies; the table is allotted lazily on
    /// the first insert.
    pub fn with_policies(hash: H, reap: R, heap: A) -> Self {
        Self {
            table: None,
            count: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
            mutation: 0,
            hash,
            reap,
            heap,
            _values: PhantomData,
        }
    }

    /// Full-control constructor: explicit policies, an exact initial bucket
    /// count, and a load factor.
    ///
    /// # Panics
    /// Panics if `buckets` is zero or `load_factor` is not strictly positive.
    pub fn with_config(hash: H, reap: R, heap: A, buckets: usize, load_factor: f32) -> Self {
        assert!(buckets > 0, "bucket count must be positive");
        assert!(load_factor > 0.0, "load factor must be positive");
        let mut set = Self::with_policies(hash, reap, heap);
        set.load_factor = load_factor;
        set.table = Some(set.heap.alloc_table(buckets));
        set
    }

    /// Number of elements stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current bucket count; zero while the table is unallotted.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.table.as_deref().map_or(0, <[u32]>::len)
    }

    /// Current load threshold.
    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Inserts `value` if no equal element is present.
    ///
    /// Returns `true` on insertion. The load factor is only rechecked when
    /// the target bucket already held a chain, so inserts into empty buckets
    /// never trigger a grow.
    pub fn add(&mut self, value: V) -> bool {
        let (inserted, collided) = self.place(value);
        if inserted && collided {
            let buckets = self.buckets();
            if self.count as f64 / buckets as f64 > self.load_factor as f64 {
                self.resize(grown_buckets(self.count, self.load_factor));
            }
        }
        inserted
    }

    /// Reports whether an element equal to `value` is present.
    pub fn contains(&self, value: &V) -> bool {
        let Some(table) = self.table.as_deref() else {
            return false;
        };
        let row = self.hash.bucket(value, table.len());
        let mut at = table[row];
        while at != NIL {
            let node = self.heap.node(at);
            if *node.value() == *value {
                return true;
            }
            at = node.next();
        }
        false
    }

    /// Removes the element equal to `value`, reaping it.
    ///
    /// Chain order of the survivors is preserved. Returns `true` iff an
    /// element was removed.
    pub fn remove(&mut self, value: &V) -> bool {
        let Some(table) = self.table.as_deref() else {
            return false;
        };
        let row = self.hash.bucket(value, table.len());
        let mut at = table[row];
        let mut trail = NIL;
        while at != NIL {
            let node = self.heap.node(at);
            if *node.value() == *value {
                let next = node.next();
                self.unlink(row, trail, next);
                let node = self.heap.free(at);
                self.reap.reap(node.into_value());
                self.count -= 1;
                self.mutation += 1;
                return true;
            }
            trail = at;
            at = node.next();
        }
        false
    }

    /// Removes and yields some element, choosing the head of the first
    /// non-empty bucket. The value is handed to the caller, not reaped.
    pub fn take(&mut self) -> Option<V> {
        let table = self.table.as_deref()?;
        let (row, head) = table
            .iter()
            .enumerate()
            .find(|(_, &head)| head != NIL)
            .map(|(row, &head)| (row, head))?;
        let next = self.heap.node(head).next();
        if let Some(table) = self.table.as_deref_mut() {
            table[row] = next;
        }
        let node = self.heap.free(head);
        self.count -= 1;
        self.mutation += 1;
        Some(node.into_value())
    }

    /// Replaces `old` with `new` via remove-then-add.
    ///
    /// Returns `true` iff `old` was present and distinct from `new`. Note the
    /// sequence is not atomic: when `new` equals some element other than
    /// `old`, the add is rejected, `old` is still gone, and the return value
    /// is still `true`.
    pub fn replace(&mut self, old: &V, new: V) -> bool {
        if *old == new {
            return false;
        }
        if !self.remove(old) {
            return false;
        }
        let _ = self.add(new);
        true
    }

    /// Inserts every value, returning how many were newly added.
    pub fn add_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        let mut added = 0;
        for value in values {
            if self.add(value) {
                added += 1;
            }
        }
        added
    }

    /// Removes every listed value, returning how many were actually removed.
    pub fn remove_all<'a, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        let mut removed = 0;
        for value in values {
            if self.remove(value) {
                removed += 1;
            }
        }
        removed
    }

    /// Empties every chain while keeping the bucket table.
    ///
    /// Elements are reaped one by one unless the heap releases them
    /// wholesale (`free_all` returning `true`), in which case per-node
    /// reaping is elided.
    pub fn clear(&mut self) {
        if let Some(table) = self.table.as_deref_mut() {
            if self.heap.free_all() {
                table.fill(NIL);
            } else {
                for head in table.iter_mut() {
                    let mut at = *head;
                    while at != NIL {
                        let node = self.heap.free(at);
                        at = node.next();
                        self.reap.reap(node.into_value());
                    }
                    *head = NIL;
                }
            }
        }
        self.count = 0;
        self.mutation += 1;
    }

    /// Clears and releases the table; the result is indistinguishable from a
    /// freshly constructed set.
    pub fn reset(&mut self) {
        self.clear();
        if let Some(table) = self.table.take() {
            self.heap.free_table(table);
        }
    }

    /// Sets the bucket count, enforcing the subsystem minimum and rehashing
    /// when the count actually changes.
    pub fn set_buckets(&mut self, buckets: usize) {
        let buckets = buckets.max(DEFAULT_INITIAL_BUCKETS);
        match self.buckets() {
            0 => {
                self.table = Some(self.heap.alloc_table(buckets));
                self.mutation += 1;
            }
            current if current != buckets => self.resize(buckets),
            _ => {}
        }
    }

    /// Sets the load threshold and rechecks it immediately.
    ///
    /// # Panics
    /// Panics if `load_factor` is not strictly positive.
    pub fn set_load_factor(&mut self, load_factor: f32) {
        assert!(load_factor > 0.0, "load factor must be positive");
        self.load_factor = load_factor;
        let buckets = self.buckets();
        if buckets > 0 && self.count as f64 / buckets as f64 > load_factor as f64 {
            self.resize(grown_buckets(self.count, load_factor));
        }
    }

    /// Clones every element into `dst`, replacing its contents. `dst` ends
    /// with exactly `len()` elements.
    pub fn copy_into(&self, dst: &mut Vec<V>)
    where
        V: Clone,
    {
        dst.clear();
        dst.reserve(self.count);
        dst.extend(self.iter().cloned());
    }

    /// Clones every element into a fresh vector.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut out = Vec::new();
        self.copy_into(&mut out);
        out
    }

    /// An independent copy with the same bucket count, load factor, and
    /// policies. Elements are shallow-cloned; the node heap is a fresh
    /// sibling, so mutations on either set never touch the other.
    pub fn dup(&self) -> Self
    where
        V: Clone,
        H: Clone,
        R: Clone,
    {
        let mut copy = Self::with_policies(self.hash.clone(), self.reap.clone(), self.heap.fresh());
        copy.load_factor = self.load_factor;
        if let Some(table) = self.table.as_deref() {
            copy.table = Some(copy.heap.alloc_table(table.len()));
        }
        for value in self.iter() {
            let (inserted, _) = copy.place(value.clone());
            debug_assert!(inserted);
        }
        copy
    }

    /// Asserts the structural invariants; intended for tests.
    ///
    /// # Panics
    /// Panics when the load factor is non-positive, a node sits in a foreign
    /// bucket, chains cycle or cross-link, or `count` disagrees with the
    /// reachable or live node population.
    pub fn check(&self) {
        assert!(self.load_factor > 0.0, "load factor must be positive");
        let Some(table) = self.table.as_deref() else {
            assert_eq!(self.count, 0, "null table requires an empty set");
            return;
        };
        assert!(!table.is_empty(), "allotted table must have buckets");
        let mut reachable = 0usize;
        for (row, &head) in table.iter().enumerate() {
            let mut at = head;
            while at != NIL {
                let node = self.heap.node(at);
                assert_eq!(
                    self.hash.bucket(node.value(), table.len()),
                    row,
                    "node stored in a foreign bucket"
                );
                reachable += 1;
                assert!(reachable <= self.count, "chain cycle or cross-linked node");
                at = node.next();
            }
        }
        assert_eq!(reachable, self.count, "count disagrees with reachable nodes");
        assert_eq!(self.heap.len(), self.count, "heap live count disagrees");
    }

    /// A detached iteration cursor pinned to the current mutation epoch.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            row: 0,
            cell: NIL,
            prior: NIL,
            prior_row: 0,
            mutation: self.mutation,
        }
    }

    /// Borrowing iterator: buckets in ascending index order, chain order
    /// within each bucket.
    pub fn iter(&self) -> Iter<'_, V, H, R, A> {
        Iter {
            set: self,
            row: 0,
            cell: NIL,
        }
    }

    /// Inserts without the load check. Returns (inserted, target bucket was
    /// non-empty).
    fn place(&mut self, value: V) -> (bool, bool) {
        if self.table.is_none() {
            self.table = Some(self.heap.alloc_table(DEFAULT_INITIAL_BUCKETS));
        }
        let Some(table) = self.table.as_deref() else {
            unreachable!("table allotted above");
        };
        let row = self.hash.bucket(&value, table.len());
        let head = table[row];

        let mut at = head;
        while at != NIL {
            let node = self.heap.node(at);
            if *node.value() == value {
                return (false, true);
            }
            at = node.next();
        }

        let fresh = self.heap.alloc(Node::new(value, head));
        if let Some(table) = self.table.as_deref_mut() {
            table[row] = fresh;
        }
        self.count += 1;
        self.mutation += 1;
        (true, head != NIL)
    }

    /// Rehashes into a table of `buckets` heads, preserving the nodes.
    fn resize(&mut self, buckets: usize) {
        let Some(old) = self.table.take() else {
            return;
        };
        let mut fresh = self.heap.alloc_table(buckets);
        for &head in old.iter() {
            let mut at = head;
            while at != NIL {
                let next = self.heap.node(at).next();
                let row = self.hash.bucket(self.heap.node(at).value(), buckets);
                self.heap.node_mut(at).set_next(fresh[row]);
                fresh[row] = at;
                at = next;
            }
        }
        self.heap.free_table(old);
        self.table = Some(fresh);
        self.mutation += 1;
    }

    /// Detaches `at`'s successor from its predecessor (`trail`, or the bucket
    /// head when `trail` is `NIL`).
    fn unlink(&mut self, row: usize, trail: u32, next: u32) {
        if trail == NIL {
            if let Some(table) = self.table.as_deref_mut() {
                table[row] = next;
            }
        } else {
            self.heap.node_mut(trail).set_next(next);
        }
    }

    /// Removes the node `target` known to live in bucket `row`; chain walk
    /// because links are forward-only.
    fn remove_at(&mut self, target: u32, row: usize) {
        let Some(table) = self.table.as_deref() else {
            panic!("cursor removal on an unallotted table");
        };
        let mut at = table[row];
        let mut trail = NIL;
        while at != NIL && at != target {
            trail = at;
            at = self.heap.node(at).next();
        }
        assert_eq!(at, target, "cursor cell no longer reachable in its bucket");
        let next = self.heap.node(at).next();
        self.unlink(row, trail, next);
        let node = self.heap.free(at);
        self.reap.reap(node.into_value());
        self.count -= 1;
        self.mutation += 1;
    }
}

/// Detached iteration cursor.
///
/// Carries a bucket index, the next cell to yield, the previously yielded
/// cell (for [`Cursor::remove`]), and the mutation epoch observed at
/// creation. All methods take the owning set explicitly, which keeps the
/// cursor free of lifetimes.
///
/// Using `next` or `remove` after the set was mutated elsewhere is a
/// programmer error; [`Cursor::valid`] is the supported detection mechanism
/// and debug builds assert it.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    row: usize,
    cell: u32,
    prior: u32,
    prior_row: usize,
    mutation: u64,
}

impl Cursor {
    /// Yields the next element, bucket by bucket, or `None` when exhausted.
    pub fn next<'s, V, H, R, A>(&mut self, set: &'s ChainSet<V, H, R, A>) -> Option<&'s V>
    where
        A: NodeHeap<V>,
    {
        debug_assert!(self.valid(set), "cursor advanced after set mutation");
        let table = set.table.as_deref()?;
        while self.cell == NIL {
            if self.row >= table.len() {
                return None;
            }
            self.cell = table[self.row];
            self.row += 1;
        }
        let node = set.heap.node(self.cell);
        self.prior = self.cell;
        self.prior_row = self.row - 1;
        self.cell = node.next();
        Some(node.value())
    }

    /// Removes the element most recently yielded by `next`.
    ///
    /// Returns `false` when nothing has been yielded (or it was already
    /// removed). The cursor re-snapshots the set's epoch afterwards, so this
    /// self-inflicted mutation does not invalidate it.
    pub fn remove<V, H, R, A>(&mut self, set: &mut ChainSet<V, H, R, A>) -> bool
    where
        V: PartialEq,
        H: BucketHash<V>,
        R: Reaper<V>,
        A: NodeHeap<V>,
    {
        debug_assert!(self.valid(set), "cursor removal after set mutation");
        if self.prior == NIL {
            return false;
        }
        set.remove_at(self.prior, self.prior_row);
        self.mutation = set.mutation;
        self.prior = NIL;
        true
    }

    /// `true` while the set's mutation epoch still matches the one this
    /// cursor observed.
    pub fn valid<V, H, R, A>(&self, set: &ChainSet<V, H, R, A>) -> bool {
        set.mutation == self.mutation
    }
}

/// Borrowing iterator over a [`ChainSet`].
pub struct Iter<'a, V, H, R, A> {
    set: &'a ChainSet<V, H, R, A>,
    row: usize,
    cell: u32,
}

impl<'a, V, H, R, A> Iterator for Iter<'a, V, H, R, A>
where
    A: NodeHeap<V>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let table = self.set.table.as_deref()?;
        while self.cell == NIL {
            if self.row >= table.len() {
                return None;
            }
            self.cell = table[self.row];
            self.row += 1;
        }
        let node = self.set.heap.node(self.cell);
        self.cell = node.next();
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.set.count))
    }
}
