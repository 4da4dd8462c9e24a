//! Order-preserving frequency counter
//!
//! Counts keys and remembers when each key was first seen, so ranking by
//! count breaks ties by first-seen order.

use std::collections::HashMap;
use std::hash::Hash;

/// Counter whose iteration order is first-insertion order
#[derive(Debug, Clone)]
pub struct OrderedCounter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> Default for OrderedCounter<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> OrderedCounter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `key` by one
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Increment `key` by `n`
    pub fn add_n(&mut self, key: K, n: u64) {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 += n;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, n));
        }
    }

    /// Current count for `key`
    pub fn get(&self, key: &K) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// The `n` highest counts; equal counts keep first-seen order
    pub fn most_common(self, n: usize) -> Vec<(K, u64)> {
        let mut sorted = self.entries;
        // sort_by is stable, which is what carries the tie-break
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for OrderedCounter<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for OrderedCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count() {
        let counter: OrderedCounter<&str> =
            ["one", "two", "two", "three", "three", "three"].into_iter().collect();
        assert_eq!(counter.get(&"one"), 1);
        assert_eq!(counter.get(&"two"), 2);
        assert_eq!(counter.get(&"three"), 3);
        assert_eq!(counter.get(&"four"), 0);
        assert_eq!(counter.len(), 3);
        assert_eq!(counter.total(), 6);
    }

    #[test]
    fn test_most_common_ties_keep_first_seen() {
        let counter: OrderedCounter<&str> = ["b", "a", "c", "a", "d", "c"].into_iter().collect();
        assert_eq!(
            counter.most_common(4),
            vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]
        );
    }

    #[test]
    fn test_most_common_past_len() {
        let counter: OrderedCounter<&str> = ["x", "y"].into_iter().collect();
        assert_eq!(counter.most_common(10).len(), 2);
        assert!(OrderedCounter::<String>::new().most_common(5).is_empty());
    }

    #[test]
    fn test_iter_first_seen_order() {
        let mut counter = OrderedCounter::new();
        counter.add_n("late", 1);
        counter.add_n("early", 5);
        counter.add("late");
        let keys: Vec<_> = counter.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["late", "early"]);
    }
}
