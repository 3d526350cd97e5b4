//! Label encoding transformers.
//!
//! Both encoders read a label field from every record and append a one-hot
//! vector as a new trailing field.
//!
//! ## LabelEncoder
//! Discrete labels. The vocabulary is the key order of a label frequency
//! map; the label field is removed before the vector is appended.
//!
//! ```ignore
//! // [1.0, 2.0, "cat"] with vocabulary ["cat", "dog"]
//! // -> [1.0, 2.0, [1, 0]]
//! ```
//!
//! ## RangeEncoder
//! Continuous labels bucketed by inclusive `[min, max]` ranges. The label
//! field is kept and the vector appended after it.
//!
//! ```ignore
//! // [0.3, 5.0] with ranges [(0, 10), (11, 20)]
//! // -> [0.3, 5.0, [1, 0]]
//! ```
//!
//! # Design Notes
//!
//! Encoders never touch the input table. Each record is cloned before the
//! label is removed or the vector appended.

mod label;
mod range;

pub use label::{
    convert_labels, FittedLabelEncoder, LabelEncoder, LabelEncoderParams, Vocabulary,
};
pub use range::{convert_ranged_labels, Range, RangeEncoder, RangeEncoding};

use crate::dataset::{Frequencies, IndexFrequencies, Table};
use crate::error::{DatasetError, Result};
use log::debug;
use std::hash::Hash;

/// Strategy for labels missing from the vocabulary during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HandleUnknown {
    /// Fail with [`DatasetError::UnknownLabel`].
    #[default]
    Error,
    /// Append an all-zero vector.
    Ignore,
}

/// Zero vector of `len` entries with a 1 at `hot`, if given.
pub(crate) fn one_hot(len: usize, hot: Option<usize>) -> Vec<u8> {
    let mut vector = vec![0u8; len];
    if let Some(index) = hot {
        vector[index] = 1;
    }
    vector
}

/// Recount labels of an encoded table by one-hot index.
///
/// `reference` only sizes the result: indices `0..reference.len()` start at
/// zero. Each record adds one to the index holding the `1` of its trailing
/// vector; all-zero vectors are not counted. An index past the reference size
/// is appended as a new key.
///
/// # Errors
/// [`DatasetError::NotEncoded`] if a record has no trailing one-hot field.
pub fn update_label_frequencies<K: Eq + Hash + Clone>(
    table: &Table,
    reference: &Frequencies<K>,
) -> Result<IndexFrequencies> {
    let mut counts = IndexFrequencies::with_keys(0..reference.len());
    let mut unset = 0usize;

    for (row, record) in table.iter().enumerate() {
        let vector = record.one_hot().ok_or(DatasetError::NotEncoded { row })?;
        match vector.iter().position(|&bit| bit == 1) {
            Some(index) => {
                counts.increment(index);
            }
            None => unset += 1,
        }
    }

    if unset > 0 {
        debug!("{} records carry an all-zero label vector", unset);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Field, LabelFrequencies, LabelValue, Record};

    fn encoded(vectors: &[&[u8]]) -> Table {
        vectors
            .iter()
            .map(|v| Record::new(vec![Field::Number(0.0), Field::OneHot(v.to_vec())]))
            .collect()
    }

    fn reference(n: usize) -> LabelFrequencies {
        (0..n).map(|i| LabelValue::Number(i as f64)).collect()
    }

    #[test]
    fn test_one_hot_helper() {
        assert_eq!(one_hot(3, Some(1)), vec![0, 1, 0]);
        assert_eq!(one_hot(2, None), vec![0, 0]);
        assert!(one_hot(0, None).is_empty());
    }

    #[test]
    fn test_update_counts_by_index() {
        let table = encoded(&[&[1, 0, 0], &[0, 0, 1], &[1, 0, 0]]);
        let counts = update_label_frequencies(&table, &reference(3)).unwrap();

        let entries: Vec<_> = counts.iter().map(|(k, c)| (*k, c)).collect();
        assert_eq!(entries, vec![(0, 2), (1, 0), (2, 1)]);
    }

    #[test]
    fn test_update_skips_all_zero_vectors() {
        let table = encoded(&[&[0, 0], &[0, 1]]);
        let counts = update_label_frequencies(&table, &reference(2)).unwrap();
        assert_eq!(counts.get(&0), Some(0));
        assert_eq!(counts.get(&1), Some(1));
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_update_index_beyond_reference() {
        let table = encoded(&[&[0, 0, 0, 1]]);
        let counts = update_label_frequencies(&table, &reference(2)).unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get(&3), Some(1));
    }

    #[test]
    fn test_update_requires_encoded_table() {
        let table = Table::from_records(vec![Record::new(vec![Field::from("cat")])]);
        let result = update_label_frequencies(&table, &reference(1));
        assert!(matches!(result, Err(DatasetError::NotEncoded { row: 0 })));
    }

    #[test]
    fn test_update_empty_table() {
        let counts = update_label_frequencies(&Table::new(), &reference(2)).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 0);
    }
}
