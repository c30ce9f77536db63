//! Key-value index with a reverse value-count mapping.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// Forward `key → value` mapping plus the derived `value → count` mapping.
///
/// The index knows nothing about transactions. Mutations return the value
/// they displaced so the caller can build a compensation.
///
/// # Invariants
///
/// - `counts[v]` equals the number of keys whose value is `v`.
/// - A value held by no key has no entry in `counts`.
///
/// # Example
///
/// ```rust
/// use txkv_core::KeyValueIndex;
///
/// let mut index = KeyValueIndex::new();
/// assert_eq!(index.set("a", "foo"), None);
/// assert_eq!(index.set("b", "foo"), None);
/// assert_eq!(index.count_equal_to("foo"), 2);
///
/// assert_eq!(index.unset("a"), Some("foo".to_string()));
/// assert_eq!(index.count_equal_to("foo"), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct KeyValueIndex {
    /// Key to current value.
    entries: HashMap<String, String>,
    /// Value to number of keys holding it.
    counts: HashMap<String, usize>,
}

impl KeyValueIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        self.increment(&value);
        let prior = self.entries.insert(key.into(), value);
        if let Some(prior) = &prior {
            self.decrement(prior);
        }
        prior
    }

    /// Removes `key`, returning the value it held.
    ///
    /// `None` means the key was absent and nothing changed.
    pub fn unset(&mut self, key: &str) -> Option<String> {
        let prior = self.entries.remove(key)?;
        self.decrement(&prior);
        Some(prior)
    }

    /// Returns how many keys currently hold `value`.
    #[must_use]
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of keys set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct values currently held.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.counts.len()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Recomputes the reverse mapping and compares it with the stored one.
    pub fn check_consistency(&self) -> CoreResult<()> {
        let mut expected: HashMap<&str, usize> = HashMap::new();
        for value in self.entries.values() {
            *expected.entry(value.as_str()).or_default() += 1;
        }

        if expected.len() != self.counts.len() {
            return Err(CoreError::index_corruption(format!(
                "{} distinct values held, {} counted",
                expected.len(),
                self.counts.len()
            )));
        }

        for (value, count) in &self.counts {
            let actual = expected.get(value.as_str()).copied().unwrap_or(0);
            if actual != *count {
                return Err(CoreError::index_corruption(format!(
                    "value {value:?} counted {count} times, held by {actual} keys"
                )));
            }
        }

        Ok(())
    }

    fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.counts.remove(value);
            }
        }
    }
}
