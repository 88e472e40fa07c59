//! Ordered map type for untyped objects.
//!
//! [`Map`] wraps an [`IndexMap`] so that keys keep the order in which they
//! were inserted. Normalization copies records key by key, and builders emit
//! keys in iteration order, so this order is what ends up on the wire.
//!
//! ## Examples
//!
//! ```rust
//! use serde_record::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered map of string keys to [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position; the old value is returned.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = Map::new();
        map.insert("a".to_string(), Value::from(1));
        map.insert("b".to_string(), Value::from(2));
        assert_eq!(map.insert("a".to_string(), Value::from(3)), Some(Value::from(1)));

        let entries: Vec<_> = map.into_iter().collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), Value::from(3)),
                ("b".to_string(), Value::from(2)),
            ]
        );
    }

    #[test]
    fn test_collect() {
        let map: Map = (0..3)
            .map(|i| (i.to_string(), Value::from(i)))
            .collect();
        assert_eq!(map.len(), 3);
        assert!(map.contains_key("2"));
        assert!(!map.is_empty());
    }
}
