use crate::error::{MapError, Result};

/// A boxed, borrowing iterator over the keys of a map.
pub type Keys<'a, K> = Box<dyn Iterator<Item = &'a K> + 'a>;

/// Describes what a map is. Every backing in this crate implements it, and
/// they are all expected to behave identically except for the order their
/// keys come out in.
///
/// The trait is dyn-compatible, so the backing can be picked at runtime with
/// `Box<dyn Map<K, V>>`.
pub trait Map<K, V> {
    /// Drops every entry.
    fn clear(&mut self);

    /// Whether a value is stored under `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Get the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Get a mutable reference to the value stored under `key`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Stores `value` under `key`. If the key already had a value it is
    /// replaced in place and handed back; the number of entries only changes
    /// when the key is new.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// The number of entries in the map right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bust a move, returning whatever was there.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes the entry under `key` only if its value equals `value`.
    /// Otherwise nothing happens and `None` comes back.
    fn remove_if_eq(&mut self, key: &K, value: &V) -> Option<V>
    where
        V: PartialEq;

    /// A fresh iterator over the keys, in whatever order the backing keeps
    /// them. It borrows the map, so the map can't change underneath it.
    fn iter_keys(&self) -> Keys<'_, K>;

    /// Every key, once each, in iteration order.
    fn key_set(&self) -> Vec<&K> {
        self.iter_keys().collect()
    }

    /// [`Map::contains_key`] for callers whose key may be absent.
    fn try_contains_key(&self, key: Option<&K>) -> Result<bool> {
        Ok(self.contains_key(require_key(key)?))
    }

    /// [`Map::get`] for callers whose key may be absent.
    fn try_get(&self, key: Option<&K>) -> Result<Option<&V>> {
        Ok(self.get(require_key(key)?))
    }

    /// [`Map::put`] for callers whose key may be absent. An absent key is
    /// rejected before the map is touched.
    fn try_put(&mut self, key: Option<K>, value: V) -> Result<Option<V>> {
        Ok(self.put(require_key(key)?, value))
    }

    /// [`Map::remove`] for callers whose key may be absent.
    fn try_remove(&mut self, key: Option<&K>) -> Result<Option<V>> {
        Ok(self.remove(require_key(key)?))
    }

    /// [`Map::remove_if_eq`] for callers whose key may be absent.
    fn try_remove_if_eq(&mut self, key: Option<&K>, value: &V) -> Result<Option<V>>
    where
        V: PartialEq,
    {
        Ok(self.remove_if_eq(require_key(key)?, value))
    }
}

fn require_key<K>(key: Option<K>) -> Result<K> {
    key.ok_or_else(|| {
        tracing::debug!("rejected an absent key");
        MapError::InvalidArgument("key is absent")
    })
}
