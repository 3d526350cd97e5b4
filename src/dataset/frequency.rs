//! Insertion-ordered occurrence counts.
//!
//! Key order is first-insertion order and defines the one-hot index of each
//! key, so counts are kept in a `Vec` with a hash index on the side rather
//! than relying on map iteration order.

use super::LabelValue;
use crate::preprocessing::encoding::Range;
use std::collections::HashMap;
use std::hash::Hash;

/// Counts per label value, in first-seen order.
pub type LabelFrequencies = Frequencies<LabelValue>;
/// Counts per range, in range-set order.
pub type RangeFrequencies = Frequencies<Range>;
/// Counts per one-hot index.
pub type IndexFrequencies = Frequencies<usize>;

/// Ordered map from key to occurrence count.
#[derive(Clone, Debug)]
pub struct Frequencies<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Frequencies<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Every key present with a count of zero. Repeated keys collapse into
    /// the first occurrence.
    pub fn with_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut frequencies = Self::new();
        for key in keys {
            frequencies.insert_zero(key);
        }
        frequencies
    }

    /// Add one occurrence, creating the entry if needed. Returns the new count.
    pub fn increment(&mut self, key: K) -> usize {
        let slot = self.slot(key);
        self.entries[slot].1 += 1;
        self.entries[slot].1
    }

    /// Make sure `key` is present without changing its count.
    pub fn insert_zero(&mut self, key: K) {
        self.slot(key);
    }

    pub fn get(&self, key: &K) -> Option<usize> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Position of `key` in insertion order.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn key_at(&self, position: usize) -> Option<&K> {
        self.entries.get(position).map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    fn slot(&mut self, key: K) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(key.clone(), slot);
        self.entries.push((key, 0));
        slot
    }
}

impl<K: Eq + Hash + Clone> Default for Frequencies<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both hold the same keys in the same order with the same counts.
impl<K: Eq + Hash + Clone> PartialEq for Frequencies<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Frequencies<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut frequencies = Self::new();
        for key in iter {
            frequencies.increment(key);
        }
        frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_keeps_first_seen_order() {
        let mut freq = LabelFrequencies::new();
        freq.increment(LabelValue::from("dog"));
        freq.increment(LabelValue::from("cat"));
        assert_eq!(freq.increment(LabelValue::from("dog")), 2);

        let keys: Vec<_> = freq.keys().cloned().collect();
        assert_eq!(keys, vec![LabelValue::from("dog"), LabelValue::from("cat")]);
        assert_eq!(freq.get(&LabelValue::from("dog")), Some(2));
        assert_eq!(freq.get(&LabelValue::from("cat")), Some(1));
        assert_eq!(freq.get(&LabelValue::from("cow")), None);
        assert_eq!(freq.total(), 3);
    }

    #[test]
    fn test_with_keys_zero_counts_and_duplicates() {
        let freq = IndexFrequencies::with_keys(vec![0, 1, 2, 1]);
        assert_eq!(freq.len(), 3);
        assert!(freq.iter().all(|(_, count)| count == 0));
        assert_eq!(freq.position(&2), Some(2));
    }

    #[test]
    fn test_insert_zero_does_not_reset() {
        let mut freq: Frequencies<usize> = [4, 4].into_iter().collect();
        freq.insert_zero(4);
        assert_eq!(freq.get(&4), Some(2));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: Frequencies<usize> = [1, 2].into_iter().collect();
        let b: Frequencies<usize> = [2, 1].into_iter().collect();
        let c: Frequencies<usize> = [1, 2].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_key_at() {
        let freq: Frequencies<usize> = [7, 3].into_iter().collect();
        assert_eq!(freq.key_at(1), Some(&3));
        assert_eq!(freq.key_at(2), None);
        assert!(Frequencies::<usize>::default().is_empty());
    }
}
