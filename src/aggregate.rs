//! Counting and summing accumulators
//!
//! [`CounterMap`] and [`SumMap`] are used to aggregate values per key
//! during a single computation. They are plain owned maps and are never
//! shared between calls or threads.

use std::borrow::Borrow;
use std::collections::hash_map::Iter;
use std::collections::HashMap;
use std::hash::Hash;

/// Counts how often each key was added
///
/// # Examples
///
/// ```
/// use phenodiff::aggregate::CounterMap;
///
/// let mut counts = CounterMap::new();
/// counts.add_to("foo");
/// counts.add_to("foo");
/// counts.add_to("bar");
///
/// assert_eq!(counts.get("foo"), 2);
/// assert_eq!(counts.get("baz"), 0);
/// assert_eq!(counts.min_value(), Some(1));
/// assert_eq!(counts.max_value(), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct CounterMap<K> {
    inner: HashMap<K, usize>,
}

impl<K> Default for CounterMap<K> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> CounterMap<K> {
    /// Constructs a new, empty `CounterMap`
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count of `key`, starting at `1` for new keys
    pub fn add_to(&mut self, key: K) {
        self.inner
            .entry(key)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    /// Returns the count of `key`, `0` if the key was never added
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).copied().unwrap_or_default()
    }

    /// Returns the smallest count of all keys
    ///
    /// An empty map has no minimum and returns `None`.
    pub fn min_value(&self) -> Option<usize> {
        self.inner.values().copied().min()
    }

    /// Returns the largest count of all keys
    ///
    /// An empty map has no maximum and returns `None`.
    pub fn max_value(&self) -> Option<usize> {
        self.inner.values().copied().max()
    }

    /// Returns the number of keys
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no key was added
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates all keys and their counts in arbitrary order
    pub fn iter(&self) -> Iter<'_, K, usize> {
        self.inner.iter()
    }
}

/// Sums all values that were added per key
///
/// # Examples
///
/// ```
/// use phenodiff::aggregate::SumMap;
///
/// let mut sums = SumMap::new();
/// sums.add_to("foo", 1.5);
/// sums.add_to("foo", 2.0);
///
/// assert_eq!(sums.get("foo"), 3.5);
/// assert_eq!(sums.get("bar"), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SumMap<K> {
    inner: HashMap<K, f64>,
}

impl<K> Default for SumMap<K> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> SumMap<K> {
    /// Constructs a new, empty `SumMap`
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the sum of `key`, starting at `value` for new keys
    pub fn add_to(&mut self, key: K, value: f64) {
        self.inner
            .entry(key)
            .and_modify(|sum| *sum += value)
            .or_insert(value);
    }

    /// Returns the sum of `key`, `0.0` if the key was never added
    pub fn get<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).copied().unwrap_or_default()
    }

    /// Returns the number of keys
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no key was added
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates all keys and their sums in arbitrary order
    pub fn iter(&self) -> Iter<'_, K, f64> {
        self.inner.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counter_counts_every_add() {
        let mut counts = CounterMap::new();
        for n in 1..=7 {
            counts.add_to("HP:1");
            assert_eq!(counts.get("HP:1"), n);
        }
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn counter_min_max() {
        let mut counts = CounterMap::new();
        assert_eq!(counts.min_value(), None);
        assert_eq!(counts.max_value(), None);
        assert!(counts.is_empty());

        counts.add_to(1);
        counts.add_to(2);
        counts.add_to(2);
        counts.add_to(3);
        counts.add_to(3);
        counts.add_to(3);
        assert_eq!(counts.min_value(), Some(1));
        assert_eq!(counts.max_value(), Some(3));
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 6);
    }

    #[test]
    fn sum_adds_every_value() {
        let values = [10.0, 8.0, 6.0, 4.0];
        let mut sums = SumMap::new();
        for value in values {
            sums.add_to(String::from("HP:1"), value);
        }
        assert_eq!(sums.get("HP:1"), values.iter().sum::<f64>());
        assert_eq!(sums.get("HP:2"), 0.0);
        assert_eq!(sums.len(), 1);
    }

    #[test]
    fn sum_starts_at_first_value() {
        let mut sums = SumMap::new();
        sums.add_to(1u8, -2.5);
        assert_eq!(sums.get(&1u8), -2.5);
        assert!(!sums.is_empty());
    }
}
