//! An insertion-ordered map used for JKSN [maps][`crate::Value::Map`].
//!
//! JKSN map keys can be any value, including floats and other maps. Entries are kept in
//! insertion order alongside a hash index, so lookups and inserts do not scan the
//! entries.
//!
//! # Example
//!
//! ```
//! use jksn::prelude::*;
//!
//! let mut vmap = VecMap::new();
//!
//! vmap.insert(Value::from("a"), Value::from(1));
//! vmap.insert(Value::from(2), Value::from("b"));
//!
//! // a later insert of an equal key overwrites the value in place
//! vmap.insert(Value::from("a"), Value::from(3));
//!
//! assert_eq!(vmap.len(), 2);
//! assert_eq!(vmap.get(&Value::from("a")), Some(&Value::from(3)));
//! ```

use indexmap::{map, IndexMap};
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    iter::FromIterator,
};

#[derive(Clone, Debug)]
/// A map that remembers insertion order, backed by an [`IndexMap`].
///
/// Equality ignores order: two maps are equal when they hold the same entries.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(IndexMap<K, V>);

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(IndexMap::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(IndexMap::with_capacity(cap)) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::*;
    ///
    /// let vmap: VecMap<u8, u8> = vec![(1, 2)].into_iter().collect();
    ///
    /// // should have one element
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns the key value pairs, in insertion order.
    pub fn iter(&self) -> map::Iter<K, V> { self.0.iter() }

    /// Returns the keys, in insertion order.
    pub fn keys(&self) -> map::Keys<K, V> { self.0.keys() }

    /// Returns the values, in insertion order.
    pub fn values(&self) -> map::Values<K, V> { self.0.values() }
}

impl<K: Hash + Eq, V> VecMap<K, V> {
    /// Inserts a key-value pair.
    ///
    /// If an equal key is already present its value is replaced, keeping the position of
    /// the original entry, and the old value is returned.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> { self.0.insert(k, v) }

    /// Returns a reference to the value stored under `k`.
    pub fn get(&self, k: &K) -> Option<&V> { self.0.get(k) }

    /// Indicates whether `k` is present.
    pub fn contains_key(&self, k: &K) -> bool { self.0.contains_key(k) }

    /// Removes `k`, returning its value if it was present. The other entries keep their
    /// order.
    pub fn remove(&mut self, k: &K) -> Option<V> { self.0.shift_remove(k) }
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap::new() }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for VecMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for VecMap<K, V> {}

impl<K: Hash, V: Hash> Hash for VecMap<K, V> {
    /// Entries are hashed on their own and summed, so the hash does not depend on order.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.iter().fold(0u64, |acc, entry| {
            let mut h = DefaultHasher::new();
            entry.hash(&mut h);
            acc.wrapping_add(h.finish())
        });
        self.len().hash(state);
        sum.hash(state);
    }
}

impl<K: Hash + Eq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { v.into_iter().collect() }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = map::IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> map::IntoIter<K, V> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = map::Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> map::Iter<'a, K, V> { self.0.iter() }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let iter = iter.into_iter();
        let mut out = VecMap::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of<T: Hash>(t: &T) -> u64 {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn keeps_insertion_order() {
        let vmap: VecMap<&str, u8> = vec![("b", 1), ("a", 2), ("c", 3)].into();
        let keys: Vec<&&str> = vmap.keys().collect();
        assert_eq!(keys, vec![&"b", &"a", &"c"]);
    }

    #[test]
    fn later_key_overwrites() {
        let vmap: VecMap<&str, u8> = vec![("a", 1), ("b", 2), ("a", 3)].into();
        assert_eq!(vmap.len(), 2);
        assert_eq!(vmap.get(&"a"), Some(&3));
        assert_eq!(vmap.iter().next(), Some((&"a", &3)));
    }

    #[test]
    fn equality_ignores_order() {
        let a: VecMap<u8, u8> = vec![(1, 1), (2, 2)].into();
        let b: VecMap<u8, u8> = vec![(2, 2), (1, 1)].into();
        let c: VecMap<u8, u8> = vec![(2, 2), (1, 3)].into();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn remove_keeps_order() {
        let mut vmap: VecMap<u8, u8> = vec![(1, 1), (2, 2), (3, 3)].into();
        assert_eq!(vmap.remove(&1), Some(1));
        assert_eq!(vmap.remove(&1), None);
        assert!(vmap.contains_key(&2));
        assert_eq!(vmap.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn large_maps_insert_in_linear_time() {
        let n = 200_000u32;
        let vmap: VecMap<u32, u32> = (0..n).map(|i| (i, i)).collect();
        assert_eq!(vmap.len(), n as usize);
        assert_eq!(vmap.get(&(n - 1)), Some(&(n - 1)));
    }
}
