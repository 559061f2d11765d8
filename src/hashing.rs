//! Turning hashes into bucket indices, plus a hasher which just proxies for
//! the integer it's given. The latter makes it possible to say exactly which
//! bucket a key lands in, which is handy when poking at ChainedHashMap's
//! iteration order.

use std::hash::{BuildHasher, Hash, Hasher};

/// Smears the high bits of a hash down into the low bits. Bucket indices are
/// taken from the low bits, so without this a hasher that only varies in its
/// high bits would pile everything into a handful of buckets.
pub fn spread(hash: u64) -> u64 {
    let h = hash ^ (hash >> 32);
    h ^ (h >> 20) ^ (h >> 12) ^ (h >> 7) ^ (h >> 4)
}

/// Maps a raw hash onto `[0, capacity)`.
pub fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "a table needs at least one bucket");

    let h = spread(hash);
    if capacity.is_power_of_two() {
        (h & (capacity as u64 - 1)) as usize
    } else {
        (h % capacity as u64) as usize
    }
}

/// Hashes `key` with a fresh hasher from `hash_builder`.
pub(crate) fn hash_key<K, S>(hash_builder: &S, key: &K) -> u64
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    let mut h = hash_builder.build_hasher();
    key.hash(&mut h);
    h.finish()
}

/// Proxies integers for themselves. Each write is folded into what came
/// before, so a lone integer hashes to its own value while strings, tuples and
/// anything else built from several writes still tell their parts apart.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    fn fold(&mut self, i: u64) {
        self.0 = self.0.wrapping_mul(31).wrapping_add(i);
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.fold(*byte as u64);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.fold(i as u32 as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.fold(i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}
