//! The simplest map that could possibly work: one chain of entries, scanned
//! front to back on every operation. Everything else in this crate is
//! checked against it.

use std::{fmt, iter::FusedIterator};

use crate::{
    linked_list::{self, LinkedList},
    map::{Keys as BoxedKeys, Map},
};

/// A map kept as a singly-linked chain, newest entry first. Every operation
/// is a linear scan.
pub struct LinkedScanMap<K, V> {
    chain: LinkedList<K, V>,
}

impl<K, V> LinkedScanMap<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Makes a map with room for `capacity` entries before its storage has
    /// to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chain: LinkedList::with_capacity(capacity),
        }
    }

    /// Makes a map holding a single entry.
    pub fn singleton(key: K, value: V) -> Self {
        let mut map = Self::with_capacity(1);
        map.chain.push_front(key, value);
        map
    }

    /// Iterates over the entries, newest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.chain.iter(),
        }
    }

    /// Iterates over the keys, newest first.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    #[cfg(test)]
    fn continuity_test(&self)
    where
        K: Eq,
    {
        let mut count = 0;

        // walk the chain and make sure it matches the number of live slots,
        // and that no key shows up twice
        for (i, (key, _)) in self.chain.iter().enumerate() {
            count += 1;
            assert!(count <= self.chain.len());
            assert_eq!(1, self.keys().filter(|k| *k == key).count(), "duplicate at {}", i);
        }

        assert_eq!(self.chain.len(), count);
    }
}

impl<K, V> Map<K, V> for LinkedScanMap<K, V>
where
    K: Eq,
{
    fn clear(&mut self) {
        tracing::trace!(entries = self.chain.len(), "clearing linked scan map");
        self.chain.clear();
    }

    fn get(&self, key: &K) -> Option<&V> {
        let (_, node) = self.chain.find(|k, _| k == key)?;
        self.chain.get(node).map(|n| &n.value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (_, node) = self.chain.find(|k, _| k == key)?;
        self.chain.get_mut(node).map(|n| &mut n.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        let replaced = match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, value)),
            None => {
                self.chain.push_front(key, value);
                None
            }
        };

        #[cfg(test)]
        self.continuity_test();

        replaced
    }

    fn len(&self) -> usize {
        self.chain.len()
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let (prev, node) = self.chain.find(|k, _| k == key)?;
        let removed = self.chain.unlink(prev, node).map(|n| n.value);

        #[cfg(test)]
        self.continuity_test();

        removed
    }

    fn remove_if_eq(&mut self, key: &K, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        let (prev, node) = self.chain.find(|k, v| k == key && v == value)?;
        let removed = self.chain.unlink(prev, node).map(|n| n.value);

        #[cfg(test)]
        self.continuity_test();

        removed
    }

    fn iter_keys(&self) -> BoxedKeys<'_, K> {
        Box::new(self.keys())
    }
}

impl<K, V> Default for LinkedScanMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for LinkedScanMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for LinkedScanMap<K, V>
where
    K: Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for LinkedScanMap<K, V>
where
    K: Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LinkedScanMap<K, V> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// Walks a [`LinkedScanMap`] in chain order.
pub struct Iter<'a, K, V> {
    inner: linked_list::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// The keys of a [`LinkedScanMap`], in chain order.
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

#[cfg(test)]
mod tests {
    use super::LinkedScanMap;
    use crate::map::Map;

    fn fruit() -> LinkedScanMap<&'static str, i32> {
        let mut map = LinkedScanMap::new();
        map.put("apple", 10);
        map.put("banana", 20);
        map.put("cherry", 30);
        map
    }

    #[test]
    fn test_put_and_get() {
        let map = fruit();

        assert_eq!(Some(&10), map.get(&"apple"));
        assert_eq!(Some(&20), map.get(&"banana"));
        assert_eq!(Some(&30), map.get(&"cherry"));
        assert_eq!(None, map.get(&"grape"));
    }

    #[test]
    fn overwriting_keeps_the_size() {
        let mut map = fruit();

        assert_eq!(Some(10), map.put("apple", 50));
        assert_eq!(Some(&50), map.get(&"apple"));
        assert_eq!(3, map.len());
    }

    #[test]
    fn newest_comes_first() {
        let map = fruit();

        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(vec!["cherry", "banana", "apple"], keys);
    }

    #[test]
    fn overwriting_does_not_move_an_entry() {
        let mut map = fruit();
        map.put("apple", 11);

        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(vec!["cherry", "banana", "apple"], keys);
    }

    #[test]
    fn test_remove_key() {
        let mut map = fruit();

        assert_eq!(Some(10), map.remove(&"apple"));
        assert_eq!(None, map.get(&"apple"));
        assert_eq!(2, map.len());

        assert_eq!(None, map.remove(&"grape"));
        assert_eq!(2, map.len());

        // the head is a different code path to the rest
        assert_eq!(Some(30), map.remove(&"cherry"));
        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(vec!["banana"], keys);
    }

    #[test]
    fn test_remove_key_value() {
        let mut map = LinkedScanMap::new();
        map.put("apple", 10);
        map.put("banana", 20);

        assert_eq!(None, map.remove_if_eq(&"banana", &50));
        assert_eq!(Some(&20), map.get(&"banana"));

        assert_eq!(Some(20), map.remove_if_eq(&"banana", &20));
        assert_eq!(None, map.get(&"banana"));
        assert_eq!(1, map.len());
    }

    #[test]
    fn slots_are_recycled_after_removal() {
        let mut map = fruit();
        map.remove(&"banana");
        map.put("date", 40);

        assert_eq!(3, map.len());
        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(vec!["date", "cherry", "apple"], keys);
    }

    #[test]
    fn test_clear() {
        let mut map = fruit();
        map.clear();

        assert_eq!(0, map.len());
        assert_eq!(None, map.get(&"apple"));
        assert_eq!(0, map.keys().count());
    }

    #[test]
    fn singleton_holds_one_entry() {
        let map = LinkedScanMap::singleton("kiwi", 1);
        assert_eq!(1, map.len());
        assert_eq!(Some(&1), map.get(&"kiwi"));
        assert_eq!(r#"{"kiwi": 1}"#, format!("{:?}", map));
    }
}
