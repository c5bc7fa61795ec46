//! Ordered field storage for one template block

use indexmap::IndexMap;

/// Ordered `key -> raw value` store
///
/// Keys are unique. Encounter order is kept and used only to break ties
/// between fields of equal canonical rank; it does not decide render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: IndexMap<String, String>,
}

impl FieldMap {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite `key`
    ///
    /// An existing key keeps its encounter position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove `key` if present, returning its value
    ///
    /// Remaining fields keep their relative order.
    pub fn clear(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Fields in encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in encounter order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_idempotent() {
        let mut once = FieldMap::new();
        once.set("idh", "0.800");

        let mut twice = once.clone();
        twice.set("idh", "0.800");

        assert_eq!(once, twice);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut map: FieldMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        map.set("a", "9");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(map.get("a"), Some("9"));
    }

    #[test]
    fn clear_absent_is_noop() {
        let mut map: FieldMap = [("a", "1")].into_iter().collect();
        let before = map.clone();
        assert_eq!(map.clear("zzz"), None);
        assert_eq!(map, before);
    }

    #[test]
    fn clear_preserves_order() {
        let mut map: FieldMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(map.clear("b").as_deref(), Some("2"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(!map.contains_key("b"));
    }
}
