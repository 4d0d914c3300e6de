//! A low-level, untyped hash table using separate chaining.
//!
//! [`HashTable<V>`] stores bare values and leaves hashing to the caller:
//! every operation takes a precomputed `u64` hash plus an equality
//! predicate. [`crate::HashMap`] builds the familiar key-value interface on
//! top of this module.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::mem;

/// Number of buckets allocated the first time a table needs storage.
pub const DEFAULT_BUCKETS: usize = 32;

/// A stored value together with the hash it was inserted under.
///
/// Keeping the hash alongside the value means growth never has to re-invoke
/// the caller's hasher: rehashing is a pure redistribution of slots.
#[derive(Clone)]
struct Slot<V> {
    hash: u64,
    value: V,
}

fn new_bucket_array<V>(count: usize) -> Vec<Vec<Slot<V>>> {
    let mut buckets = Vec::with_capacity(count);
    buckets.resize_with(count, Vec::new);
    buckets
}

/// A hash table using separate chaining over a power-of-two bucket array.
///
/// `HashTable<V>` stores values of type `V` and provides insertion, lookup,
/// and removal in expected O(1) time. Unlike standard hash maps, this
/// implementation requires you to provide both the hash value and an
/// equality predicate for each operation.
///
/// The bucket array holds `bucket_count()` chains, always a power of two
/// (32 on first use), addressed by `hash mod bucket_count`. An insertion
/// that would push the number of entries past three quarters of the bucket
/// count doubles the array *before* the new entry lands, so the load-factor
/// bound holds after every insertion. The array never shrinks.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::new();
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     chain_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     chain_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
///
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Vec<Vec<Slot<V>>>,
    len: usize,
}

impl<V> Debug for HashTable<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("bucket_count", &self.buckets.len())
            .field(
                "chains",
                &self
                    .buckets
                    .iter()
                    .map(|chain| chain.iter().map(|slot| &slot.value).collect::<Vec<_>>())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with the default 32 buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.bucket_count(), 32);
    /// ```
    pub fn new() -> Self {
        Self {
            buckets: new_bucket_array(DEFAULT_BUCKETS),
            len: 0,
        }
    }

    /// Creates a table sized so that `capacity` entries fit without growth.
    ///
    /// The bucket count is rounded to a power of two of at least 32. A
    /// requested capacity of 0 allocates nothing; the first insertion
    /// initializes the bucket array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    ///
    /// let lazy: HashTable<String> = HashTable::with_capacity(0);
    /// assert_eq!(lazy.bucket_count(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Self {
                buckets: Vec::new(),
                len: 0,
            };
        }

        let mut count = DEFAULT_BUCKETS;
        while capacity > growth_limit(count) {
            count *= 2;
        }
        Self {
            buckets: new_bucket_array(count),
            len: 0,
        }
    }

    /// Returns the number of values in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of entries the table can hold before growing.
    pub fn capacity(&self) -> usize {
        growth_limit(self.buckets.len())
    }

    /// Returns the length of the bucket array.
    ///
    /// Always a power of two of at least 32 once the table has storage; 0
    /// for a table created with `with_capacity(0)` that has not yet seen an
    /// insertion.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every value. The bucket array is kept, so a clear-then-refill
    /// cycle does not reallocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::new();
    /// match table.entry(7, |v| *v == 7) {
    ///     chain_hash::hash_table::Entry::Vacant(entry) => {
    ///         entry.insert(7);
    ///     }
    ///     chain_hash::hash_table::Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.bucket_count(), 32);
    /// ```
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Exchanges the contents of two tables in O(1).
    ///
    /// Only the bucket arrays and counts change hands; no value is cloned
    /// or dropped.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.buckets, &mut other.buckets);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Grows the bucket array so `additional` more entries fit without
    /// further growth. The array only ever gets larger.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len + additional;
        if required == 0 {
            return;
        }

        let mut target = self.buckets.len().max(DEFAULT_BUCKETS);
        while required > growth_limit(target) {
            target *= 2;
        }
        if target > self.buckets.len() {
            self.rehash(target);
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<(u64, &str)> = HashTable::new();
    /// if let Entry::Vacant(entry) = table.entry(42, |v| v.0 == 42) {
    ///     entry.insert((42, "answer"));
    /// }
    ///
    /// assert_eq!(table.find(42, |v| v.0 == 42), Some(&(42, "answer")));
    /// assert_eq!(table.find(7, |v| v.0 == 7), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        if self.buckets.is_empty() {
            return None;
        }
        let bucket = self.bucket_index(hash);
        self.buckets[bucket]
            .iter()
            .find(|slot| slot.hash == hash && eq(&slot.value))
            .map(|slot| &slot.value)
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`,
    /// if any.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        if self.buckets.is_empty() {
            return None;
        }
        let bucket = self.bucket_index(hash);
        self.buckets[bucket]
            .iter_mut()
            .find(|slot| slot.hash == hash && eq(&slot.value))
            .map(|slot| &mut slot.value)
    }

    /// Removes and returns the value matching `hash` and `eq`, if any.
    ///
    /// The rest of the chain keeps its order.
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.buckets.is_empty() {
            return None;
        }
        let bucket = self.bucket_index(hash);
        let index = self.buckets[bucket]
            .iter()
            .position(|slot| slot.hash == hash && eq(&slot.value))?;
        self.len -= 1;
        Some(self.buckets[bucket].remove(index).value)
    }

    /// Looks up the slot for `hash`/`eq`, returning an [`Entry`] that is
    /// either occupied or vacant.
    ///
    /// The growth check runs when a vacant entry is inserted into, not
    /// during the lookup itself, so obtaining an entry never reallocates.
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        if !self.buckets.is_empty() {
            let bucket = self.bucket_index(hash);
            if let Some(index) = self.buckets[bucket]
                .iter()
                .position(|slot| slot.hash == hash && eq(&slot.value))
            {
                return Entry::Occupied(OccupiedEntry {
                    table: self,
                    bucket,
                    index,
                });
            }
        }
        Entry::Vacant(VacantEntry { table: self, hash })
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Values are yielded in bucket order, then chain order within each
    /// bucket. The order carries no meaning and changes across growth.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
        }
    }

    /// Removes and yields every value, leaving the bucket array in place.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let count = self.buckets.len();
        let buckets = mem::replace(&mut self.buckets, new_bucket_array(count));
        self.len = 0;
        Drain {
            inner: IntoIter {
                buckets: buckets.into_iter(),
                chain: Vec::new().into_iter(),
            },
            marker: PhantomData,
        }
    }

    fn bucket_index(&self, hash: u64) -> usize {
        // The bucket count is a power of two, so the mask is `hash mod count`.
        hash as usize & (self.buckets.len() - 1)
    }

    /// Makes room for one more entry: initializes the bucket array if the
    /// table was created without one, and doubles it if the insertion would
    /// break the load-factor bound.
    fn grow_for_insert(&mut self) {
        if self.buckets.is_empty() {
            self.buckets = new_bucket_array(DEFAULT_BUCKETS);
        }
        if self.len + 1 > growth_limit(self.buckets.len()) {
            self.rehash(self.buckets.len() * 2);
        }
    }

    /// Replaces the bucket array with one of `new_count` buckets and
    /// redistributes every slot under the new mask.
    ///
    /// Slots move in increasing old-bucket order and each chain keeps its
    /// internal order, so the pass is deterministic. The stored hash makes
    /// re-addressing a mask operation; the caller's hasher is never
    /// consulted.
    fn rehash(&mut self, new_count: usize) {
        debug_assert!(new_count.is_power_of_two());

        let old = mem::replace(&mut self.buckets, new_bucket_array(new_count));
        let mask = new_count - 1;
        for chain in old {
            for slot in chain {
                self.buckets[slot.hash as usize & mask].push(slot);
            }
        }
    }
}

/// The number of entries a bucket array of `count` buckets tolerates before
/// an insertion forces growth: a 0.75 load factor in integer arithmetic.
fn growth_limit(count: usize) -> usize {
    count / 4 * 3
}

/// A view into a single slot of a [`HashTable`], which is either occupied
/// or vacant.
pub enum Entry<'a, V> {
    /// The slot is occupied by a matching value.
    Occupied(OccupiedEntry<'a, V>),
    /// No matching value exists.
    Vacant(VacantEntry<'a, V>),
}

/// A view into an occupied slot in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value.
    pub fn get(&self) -> &V {
        &self.table.buckets[self.bucket][self.index].value
    }

    /// Gets a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.buckets[self.bucket][self.index].value
    }

    /// Converts the entry into a mutable reference tied to the table.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.buckets[self.bucket][self.index].value
    }

    /// Removes the value from the table and returns it.
    ///
    /// The rest of the chain keeps its order.
    pub fn remove(self) -> V {
        self.table.len -= 1;
        self.table.buckets[self.bucket].remove(self.index).value
    }
}

/// A view into a vacant slot in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value and returns a mutable reference to it.
    ///
    /// The growth check runs first, so the chain the value lands in is
    /// addressed under the post-growth bucket count. New values append to
    /// the end of their chain.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        table.grow_for_insert();

        let bucket = table.bucket_index(self.hash);
        let chain = &mut table.buckets[bucket];
        chain.push(Slot {
            hash: self.hash,
            value,
        });
        table.len += 1;

        let last = chain.len() - 1;
        &mut chain[last].value
    }
}

/// An iterator over the values of a [`HashTable`].
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Vec<Slot<V>>>,
    chain: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.chain.next() {
                return Some(&slot.value);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}

/// A consuming iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    buckets: alloc::vec::IntoIter<Vec<Slot<V>>>,
    chain: alloc::vec::IntoIter<Slot<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.chain.next() {
                return Some(slot.value);
            }
            self.chain = self.buckets.next()?.into_iter();
        }
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            chain: Vec::new().into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A draining iterator over the values of a [`HashTable`].
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    marker: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::Hash;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn hash_key(&self, key: u64) -> u64 {
            let mut h = SipHasher::new_with_keys(self.k0, self.k1);
            key.hash(&mut h);
            h.finish()
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn insert(state: &HashState, table: &mut HashTable<Item>, key: u64, value: i32) -> bool {
        let hash = state.hash_key(key);
        match table.entry(hash, |item| item.key == key) {
            Entry::Vacant(entry) => {
                entry.insert(Item { key, value });
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();

        for k in 0..20u64 {
            assert!(insert(&state, &mut table, k, (k as i32) * 2));
        }
        assert_eq!(table.len(), 20);

        for k in 0..20u64 {
            let hash = state.hash_key(k);
            assert_eq!(
                table.find(hash, |item| item.key == k),
                Some(&Item {
                    key: k,
                    value: (k as i32) * 2
                }),
                "{table:#?}"
            );
        }

        let miss_hash = state.hash_key(999);
        assert!(table.find(miss_hash, |item| item.key == 999).is_none());
    }

    #[test]
    fn duplicate_entry_is_occupied() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();

        assert!(insert(&state, &mut table, 42, 7));
        assert!(!insert(&state, &mut table, 42, 11));
        assert_eq!(table.len(), 1);

        let hash = state.hash_key(42);
        assert_eq!(
            table.find(hash, |item| item.key == 42),
            Some(&Item { key: 42, value: 7 })
        );
    }

    #[test]
    fn occupied_entry_accessors() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        insert(&state, &mut table, 1, 10);

        let hash = state.hash_key(1);
        match table.entry(hash, |item| item.key == 1) {
            Entry::Occupied(mut occupied) => {
                assert_eq!(occupied.get().value, 10);
                occupied.get_mut().value = 20;
            }
            Entry::Vacant(_) => panic!("expected occupied"),
        }
        assert_eq!(table.find(hash, |item| item.key == 1).map(|i| i.value), Some(20));

        match table.entry(hash, |item| item.key == 1) {
            Entry::Occupied(occupied) => {
                assert_eq!(occupied.remove(), Item { key: 1, value: 20 });
            }
            Entry::Vacant(_) => panic!("expected occupied"),
        }
        assert!(table.is_empty());
    }

    #[test]
    fn remove_returns_value_and_updates_len() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..10u64 {
            insert(&state, &mut table, k, k as i32);
        }

        let hash = state.hash_key(3);
        assert_eq!(
            table.remove(hash, |item| item.key == 3),
            Some(Item { key: 3, value: 3 })
        );
        assert_eq!(table.len(), 9);
        assert!(table.find(hash, |item| item.key == 3).is_none());

        assert_eq!(table.remove(hash, |item| item.key == 3), None);
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn growth_triggers_before_threshold_violation() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        assert_eq!(table.bucket_count(), 32);

        // 24 entries fit in 32 buckets at a 0.75 load factor.
        for k in 0..24u64 {
            insert(&state, &mut table, k, 0);
        }
        assert_eq!(table.bucket_count(), 32);

        // The 25th insertion doubles the array first.
        insert(&state, &mut table, 24, 0);
        assert_eq!(table.bucket_count(), 64);
        assert_eq!(table.len(), 25);

        for k in 0..25u64 {
            let hash = state.hash_key(k);
            assert!(table.find(hash, |item| item.key == k).is_some());
        }
    }

    #[test]
    fn repeated_growth_preserves_entries() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);

        for k in 0..1000u64 {
            assert!(insert(&state, &mut table, k, k as i32));
            assert!(table.len() <= table.capacity());
            assert!(table.bucket_count().is_power_of_two());
        }
        assert_eq!(table.len(), 1000);
        assert!(table.bucket_count() >= 32);

        for k in 0..1000u64 {
            let hash = state.hash_key(k);
            assert_eq!(
                table.find(hash, |item| item.key == k).map(|i| i.value),
                Some(k as i32)
            );
        }
    }

    #[test]
    fn with_capacity_zero_is_lazy() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        assert_eq!(table.bucket_count(), 0);
        assert_eq!(table.capacity(), 0);
        assert!(table.find(state.hash_key(1), |item| item.key == 1).is_none());
        assert!(table.remove(state.hash_key(1), |item| item.key == 1).is_none());

        insert(&state, &mut table, 1, 1);
        assert_eq!(table.bucket_count(), 32);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn with_capacity_rounds_to_power_of_two() {
        let table: HashTable<Item> = HashTable::with_capacity(100);
        assert!(table.capacity() >= 100);
        assert!(table.bucket_count().is_power_of_two());
        assert!(table.bucket_count() >= 32);

        let small: HashTable<Item> = HashTable::with_capacity(1);
        assert_eq!(small.bucket_count(), 32);
    }

    #[test]
    fn clear_keeps_bucket_array() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..100u64 {
            insert(&state, &mut table, k, 0);
        }
        let buckets_before = table.bucket_count();
        assert!(buckets_before > 32);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), buckets_before);

        // Reinsertion after clear works without touching the lazy-init path.
        assert!(insert(&state, &mut table, 5, 5));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn swap_exchanges_contents() {
        let state = HashState::default();
        let mut a: HashTable<Item> = HashTable::new();
        let mut b: HashTable<Item> = HashTable::new();
        for k in 0..30u64 {
            insert(&state, &mut a, k, 0);
        }
        insert(&state, &mut b, 99, 0);

        let a_buckets = a.bucket_count();
        a.swap(&mut b);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 30);
        assert_eq!(b.bucket_count(), a_buckets);
        assert!(b.find(state.hash_key(7), |item| item.key == 7).is_some());
        assert!(a.find(state.hash_key(99), |item| item.key == 99).is_some());
    }

    #[test]
    fn clone_is_deep() {
        let state = HashState::default();
        let mut a: HashTable<Item> = HashTable::new();
        for k in 0..10u64 {
            insert(&state, &mut a, k, k as i32);
        }

        let mut b = a.clone();
        assert_eq!(b.len(), a.len());
        assert_eq!(b.bucket_count(), a.bucket_count());

        b.remove(state.hash_key(0), |item| item.key == 0);
        insert(&state, &mut b, 100, 100);

        assert_eq!(a.len(), 10);
        assert!(a.find(state.hash_key(0), |item| item.key == 0).is_some());
        assert!(a.find(state.hash_key(100), |item| item.key == 100).is_none());
    }

    #[test]
    fn reserve_only_grows() {
        let mut table: HashTable<Item> = HashTable::new();
        table.reserve(1000);
        let grown = table.bucket_count();
        assert!(table.capacity() >= 1000);
        assert!(grown.is_power_of_two());

        table.reserve(10);
        assert_eq!(table.bucket_count(), grown);

        table.reserve(0);
        assert_eq!(table.bucket_count(), grown);
    }

    #[test]
    fn iter_visits_every_value() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..50u64 {
            insert(&state, &mut table, k, k as i32);
        }

        let mut seen: Vec<u64> = table.iter().map(|item| item.key).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50u64).collect::<Vec<_>>());
    }

    #[test]
    fn drain_empties_but_keeps_buckets() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..40u64 {
            insert(&state, &mut table, k, 0);
        }
        let buckets_before = table.bucket_count();

        let drained: Vec<Item> = table.drain().collect();
        assert_eq!(drained.len(), 40);
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), buckets_before);
    }

    #[test]
    fn into_iter_consumes_all_values() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..25u64 {
            insert(&state, &mut table, k, 0);
        }

        let mut keys: Vec<u64> = table.into_iter().map(|item| item.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..25u64).collect::<Vec<_>>());
    }

    #[test]
    fn colliding_hashes_disambiguate_by_eq() {
        // Force two distinct keys into the same chain with identical hashes.
        let mut table: HashTable<Item> = HashTable::new();
        let hash = 0xDEAD_BEEF;

        match table.entry(hash, |item| item.key == 1) {
            Entry::Vacant(entry) => {
                entry.insert(Item { key: 1, value: 10 });
            }
            Entry::Occupied(_) => panic!("expected vacant"),
        }
        match table.entry(hash, |item| item.key == 2) {
            Entry::Vacant(entry) => {
                entry.insert(Item { key: 2, value: 20 });
            }
            Entry::Occupied(_) => panic!("expected vacant"),
        }

        assert_eq!(table.len(), 2);
        assert_eq!(table.find(hash, |item| item.key == 1).map(|i| i.value), Some(10));
        assert_eq!(table.find(hash, |item| item.key == 2).map(|i| i.value), Some(20));

        assert_eq!(
            table.remove(hash, |item| item.key == 1),
            Some(Item { key: 1, value: 10 })
        );
        assert_eq!(table.find(hash, |item| item.key == 2).map(|i| i.value), Some(20));
    }
}
