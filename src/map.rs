//! Ordered, name-keyed map used by every aggregate in this crate.
//!
//! [`NameMap`] wraps an [`IndexMap`] so that sections, options and their schemas
//! iterate in insertion order. Serialization relies on that order: a config is
//! written back in the order it was read.
//!
//! ## Examples
//!
//! ```rust
//! use typed_ini::NameMap;
//!
//! let mut map = NameMap::new();
//! map.insert("second".to_string(), 2);
//! map.insert("first".to_string(), 1);
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["second", "first"]);
//! ```

use indexmap::IndexMap;

/// An insertion-ordered map from names to `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameMap<V>(IndexMap<String, V>);

impl<V> NameMap<V> {
    /// Creates an empty `NameMap`.
    #[must_use]
    pub fn new() -> Self {
        NameMap(IndexMap::new())
    }

    /// Inserts a value, returning the previous value stored under the same name.
    ///
    /// Replacing keeps the original position.
    pub fn insert(&mut self, name: String, value: V) -> Option<V> {
        self.0.insert(name, value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.0.get_mut(name)
    }

    /// Returns the entry for `name`, inserting `make()` at the end if absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, name: &str, make: F) -> &mut V {
        self.0.entry(name.to_string()).or_insert_with(make)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Removes an entry, preserving the order of the remaining ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_ini::NameMap;
    ///
    /// let mut map: NameMap<i32> = ["a", "b", "c"]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, k)| (k.to_string(), i as i32))
    ///     .collect();
    /// assert_eq!(map.remove("b"), Some(1));
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "c"]);
    /// ```
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.0.shift_remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns an iterator over the name-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for NameMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a NameMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for NameMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        NameMap(IndexMap::from_iter(iter))
    }
}
