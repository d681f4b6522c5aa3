//! Typed façades over [`RobinHoodTable`]: [`HashMap`] and [`HashSet`].
//!
//! The original implementation type-erased the value payload at runtime —
//! every `VoidHashTable` operation took a `pair_size` byte count so that one
//! engine could back both a map and a set. Here the pair shape is a
//! compile-time type parameter instead, so `HashMap<K, V>` and `HashSet<K>`
//! are thin wrappers with no runtime size argument. Both still require `K`
//! to satisfy [`RawKey`] (a pointer-sized, bitwise-comparable identity) —
//! the same precondition the original placed on its `Key` type.
//!
//! # Examples
//!
//! ```
//! use faxc_util::arena::Zone;
//! use faxc_util::collections::{HashMap, HashSet};
//!
//! let zone = Zone::new();
//! let mut map: HashMap<i64, &str> = HashMap::new();
//! *map.at_put(&zone, 1) = "one";
//! assert_eq!(map[1], "one");
//!
//! let mut set: HashSet<i64> = HashSet::new();
//! set.insert(&zone, 7);
//! assert!(set.contains(7));
//! ```

use crate::arena::Zone;
use crate::robin_hood::{RawKey, RobinHoodTable};
use std::ops::Index;

/// A zone-backed hash map keyed by a pointer-sized identity.
///
/// Mirrors the original `HashMap<Key, Mapped>`: [`HashMap::at_put`] inserts
/// a default-valued entry if absent and returns a mutable reference (the
/// original's `AtPut`); [`Index`] panics on a missing key, matching the
/// original's zone-free `operator[]` which asserts the entry exists.
pub struct HashMap<'zone, K: RawKey + Default, V: Default + Copy>(RobinHoodTable<'zone, K, V>);

impl<'zone, K: RawKey + Default, V: Default + Copy> HashMap<'zone, K, V> {
    pub fn new() -> Self {
        Self(RobinHoodTable::new())
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value for `key`, inserting a default-valued entry if
    /// absent.
    pub fn at_put(&mut self, zone: &'zone Zone, key: K) -> &mut V {
        self.0.look_up(zone, key)
    }

    pub fn at(&mut self, key: K) -> Option<&V> {
        self.0.at(key)
    }

    pub fn at_mut(&mut self, key: K) -> Option<&mut V> {
        self.0.at_mut(key)
    }

    /// Inserts or overwrites `key` with `value`. Returns `true` if newly
    /// created.
    pub fn insert(&mut self, zone: &'zone Zone, key: K, value: V) -> bool {
        self.0.insert(zone, key, value)
    }

    pub fn erase(&mut self, key: K) -> bool {
        self.0.erase(key)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> crate::robin_hood::Iter<'_, K, V> {
        self.0.iter()
    }
}

impl<'zone, K: RawKey + Default, V: Default + Copy> Default for HashMap<'zone, K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'zone, K: RawKey + Default, V: Default + Copy> Index<K> for HashMap<'zone, K, V> {
    type Output = V;

    /// Precondition: `key` is present. Fatal (panics) on violation, matching
    /// the original's `ASSERT(mapped != NULL)`.
    fn index(&self, key: K) -> &V {
        self.0.get(key).expect("HashMap::index: key not present")
    }
}

/// A zone-backed hash set keyed by a pointer-sized identity.
pub struct HashSet<'zone, K: RawKey + Default>(RobinHoodTable<'zone, K, ()>);

impl<'zone, K: RawKey + Default> HashSet<'zone, K> {
    pub fn new() -> Self {
        Self(RobinHoodTable::new())
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts `key`. Returns `true` if it was newly added.
    pub fn insert(&mut self, zone: &'zone Zone, key: K) -> bool {
        self.0.insert(zone, key, ())
    }

    pub fn contains(&mut self, key: K) -> bool {
        self.0.at(key).is_some()
    }

    pub fn erase(&mut self, key: K) -> bool {
        self.0.erase(key)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.0.iter().map(|(k, _)| k)
    }
}

impl<'zone, K: RawKey + Default> Default for HashSet<'zone, K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_put_creates_default_then_assigns() {
        let zone = Zone::new();
        let mut map: HashMap<i64, i64> = HashMap::new();
        *map.at_put(&zone, 1) += 41;
        assert_eq!(map.at(1), Some(&41));
    }

    #[test]
    fn index_returns_existing_value() {
        let zone = Zone::new();
        let mut map: HashMap<i64, &str> = HashMap::new();
        map.insert(&zone, 1, "one");
        assert_eq!(map[1], "one");
    }

    #[test]
    #[should_panic(expected = "key not present")]
    fn index_panics_on_missing_key() {
        let map: HashMap<i64, &str> = HashMap::new();
        let _ = map[1];
    }

    #[test]
    fn set_insert_and_contains() {
        let zone = Zone::new();
        let mut set: HashSet<i64> = HashSet::new();
        assert!(set.insert(&zone, 7));
        assert!(!set.insert(&zone, 7));
        assert!(set.contains(7));
        assert!(!set.contains(8));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn set_erase_removes_member() {
        let zone = Zone::new();
        let mut set: HashSet<i64> = HashSet::new();
        set.insert(&zone, 1);
        set.insert(&zone, 2);
        assert!(set.erase(1));
        assert!(!set.contains(1));
        assert!(set.contains(2));
    }
}
