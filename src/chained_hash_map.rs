//! A hash table of chains. Each bucket holds its colliding entries in the
//! order they arrived, and the whole table doubles in one go whenever a put
//! would push it past its load factor.

use std::{
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
    mem, slice,
};

use crate::{
    error::{MapError, Result},
    hashing::{bucket_index, hash_key},
    map::{Keys as BoxedKeys, Map},
};

/// How many buckets a table starts with unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 16;

/// How full a table may get before it doubles, unless told otherwise.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Construction options for a [`ChainedHashMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashMapOptions {
    /// The initial number of buckets. This is also what [`Map::clear`]
    /// returns the table to.
    pub capacity: usize,

    /// The largest `entries / buckets` ratio tolerated after a put.
    pub load_factor: f64,
}

impl Default for HashMapOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl HashMapOptions {
    pub fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    pub fn with_load_factor(self, load_factor: f64) -> Self {
        Self {
            load_factor,
            ..self
        }
    }

    /// Checks the options describe a table that can actually exist.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(MapError::InvalidArgument("capacity must be at least one bucket"));
        }

        if !(self.load_factor.is_finite() && self.load_factor > 0.0) {
            return Err(MapError::InvalidArgument(
                "load factor must be a positive, finite number",
            ));
        }

        Ok(())
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
}

/// A chain of colliding entries, oldest first.
type Bucket<K, V> = Vec<Entry<K, V>>;

fn new_table<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut table = Vec::with_capacity(capacity);
    table.resize_with(capacity, Vec::new);
    table
}

/// A separate-chaining hash map. Keys come out of the iterators bucket by
/// bucket, so the order has nothing to do with the keys themselves and
/// reshuffles whenever the table grows.
pub struct ChainedHashMap<K, V, S = RandomState> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    options: HashMapOptions,
    hash_builder: S,
}

impl<K, V> ChainedHashMap<K, V, RandomState> {
    /// Makes a table with [`DEFAULT_CAPACITY`] buckets and
    /// [`DEFAULT_LOAD_FACTOR`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Makes a table with a specified number of buckets. Zero is bumped up
    /// to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hash_builder(capacity, Default::default())
    }

    /// Makes a table from options, refusing ones that don't validate.
    pub fn with_options(options: HashMapOptions) -> Result<Self> {
        Self::with_options_and_hash_builder(options, Default::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Makes a table with a specified number of buckets and hasher.
    pub fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        let options = HashMapOptions::default().with_capacity(capacity.max(1));
        Self {
            buckets: new_table(options.capacity),
            len: 0,
            options,
            hash_builder,
        }
    }

    /// Makes a table from options and a hasher, refusing options that don't
    /// validate.
    pub fn with_options_and_hash_builder(options: HashMapOptions, hash_builder: S) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            buckets: new_table(options.capacity),
            len: 0,
            options,
            hash_builder,
        })
    }

    /// The number of buckets right now.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.options.load_factor
    }

    /// Whether one more entry would push a table of `capacity` buckets past
    /// the load factor.
    fn overloaded_at(&self, capacity: usize) -> bool {
        (self.len + 1) as f64 / capacity as f64 > self.options.load_factor
    }

    /// Iterates over the entries, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }

    /// Iterates over the keys, bucket by bucket.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn index_for(&self, key: &K) -> usize {
        bucket_index(hash_key(&self.hash_builder, key), self.capacity())
    }

    /// Rehashes every entry into a fresh table of `capacity` buckets.
    fn resize(&mut self, capacity: usize) {
        tracing::debug!(
            from = self.capacity(),
            to = capacity,
            entries = self.len,
            "resizing chained hash map"
        );

        let old = mem::replace(&mut self.buckets, new_table(capacity));
        for entry in old.into_iter().flatten() {
            let idx = bucket_index(hash_key(&self.hash_builder, &entry.key), capacity);
            self.buckets[idx].push(entry);
        }
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;

        // every entry has to be sitting in the bucket its key hashes to
        for (idx, bucket) in self.buckets.iter().enumerate() {
            for entry in bucket {
                assert_eq!(idx, self.index_for(&entry.key));
                count += 1;
            }
        }

        assert_eq!(self.len, count);
        assert_eq!(self.len, self.iter().count());
        assert!(self.len as f64 / self.capacity() as f64 <= self.options.load_factor);
    }
}

impl<K, V, S> Map<K, V> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn clear(&mut self) {
        tracing::trace!(entries = self.len, "clearing chained hash map");
        self.buckets = new_table(self.options.capacity);
        self.len = 0;
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.index_for(key)]
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.index_for(key);
        self.buckets[idx]
            .iter_mut()
            .find(|entry| entry.key == *key)
            .map(|entry| &mut entry.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.overloaded_at(self.capacity()) {
            // one doubling is all a sane load factor ever needs, but a tiny
            // one can need a few before the rehash
            let mut capacity = self.capacity().saturating_mul(2);
            while self.overloaded_at(capacity) && capacity < usize::MAX / 2 {
                capacity *= 2;
            }
            self.resize(capacity);
        }

        let idx = self.index_for(&key);
        let bucket = &mut self.buckets[idx];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            // update the entry if it already exists
            return Some(mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { key, value });
        self.len += 1;

        #[cfg(test)]
        self.continuity_test();

        None
    }

    fn len(&self) -> usize {
        self.len
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index_for(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|entry| entry.key == *key)?;

        // Vec::remove rather than swap_remove, the chain stays in arrival order
        let entry = bucket.remove(pos);
        self.len -= 1;

        #[cfg(test)]
        self.continuity_test();

        Some(entry.value)
    }

    fn remove_if_eq(&mut self, key: &K, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        let idx = self.index_for(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket
            .iter()
            .position(|entry| entry.key == *key && entry.value == *value)?;

        let entry = bucket.remove(pos);
        self.len -= 1;

        #[cfg(test)]
        self.continuity_test();

        Some(entry.value)
    }

    fn iter_keys(&self) -> BoxedKeys<'_, K> {
        Box::new(self.keys())
    }
}

impl<K, V> Default for ChainedHashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// Walks a [`ChainedHashMap`] bucket by bucket, each chain oldest first.
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Bucket<K, V>>,
    chain: slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }

            // empty buckets are skipped over here
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// The keys of a [`ChainedHashMap`], bucket by bucket.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}
