use indexmap::IndexMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Named parameters for one query.
///
/// Iteration order is insertion order, which is also the order positional slots are handed out
/// in. Inserting an existing name replaces its value and keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params<V>(IndexMap<String, V>);

impl<V> Params<V> {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.0.insert(name.into(), value)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for Params<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Params<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for Params<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v)))
    }
}

impl<V> From<IndexMap<String, V>> for Params<V> {
    fn from(value: IndexMap<String, V>) -> Self {
        Self(value)
    }
}

impl<V, S: BuildHasher> From<HashMap<String, V, S>> for Params<V> {
    fn from(value: HashMap<String, V, S>) -> Self {
        value.into_iter().collect()
    }
}

impl<V> IntoIterator for Params<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
