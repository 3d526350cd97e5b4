//! One-hot encoding of discrete labels.
//!
//! The vocabulary is fixed by a label frequency map: its first-seen key order
//! gives each label its index in the output vector.

use super::{one_hot, HandleUnknown};
use crate::dataset::{Field, LabelFrequencies, LabelPosition, LabelValue, Table};
use crate::error::{DatasetError, Result};
use crate::serialization::SerializableParams;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered, duplicate-free list of labels with an index for lookups.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    labels: Vec<LabelValue>,
    index: HashMap<LabelValue, usize>,
}

impl Vocabulary {
    /// Labels in the key order of `frequencies`.
    pub fn from_frequencies(frequencies: &LabelFrequencies) -> Self {
        Self::from_labels(frequencies.keys().cloned())
    }

    /// Labels in iteration order; repeats keep their first index.
    pub fn from_labels<I: IntoIterator<Item = LabelValue>>(labels: I) -> Self {
        let mut vocabulary = Self::default();
        for label in labels {
            if !vocabulary.index.contains_key(&label) {
                vocabulary.index.insert(label.clone(), vocabulary.labels.len());
                vocabulary.labels.push(label);
            }
        }
        vocabulary
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[LabelValue] {
        &self.labels
    }

    pub fn index_of(&self, label: &LabelValue) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label_at(&self, index: usize) -> Option<&LabelValue> {
        self.labels.get(index)
    }

    /// One-hot vector for `label`, `None` if it is not in the vocabulary.
    pub fn one_hot(&self, label: &LabelValue) -> Option<Vec<u8>> {
        self.index_of(label)
            .map(|index| one_hot(self.len(), Some(index)))
    }
}

/// Discrete label encoder (unfitted).
///
/// # Example
/// ```rust
/// use tabular_labels::dataset::{Loader, LoadOptions, Field};
/// use tabular_labels::preprocessing::LabelEncoder;
///
/// let (table, labels) = Loader::new(LoadOptions::default())
///     .load_reader("1,2,cat\n3,4,dog\n".as_bytes())
///     .unwrap();
///
/// let fitted = LabelEncoder::new().fit(&labels);
/// let encoded = fitted.transform(&table).unwrap();
/// assert_eq!(encoded.records()[1].fields()[2], Field::OneHot(vec![0, 1]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LabelEncoder {
    label_position: LabelPosition,
    handle_unknown: HandleUnknown,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative positions count from the end, `-1` being the last field.
    pub fn with_label_position(mut self, position: isize) -> Self {
        self.label_position = LabelPosition::new(position);
        self
    }

    /// Set the strategy for labels outside the vocabulary.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Build the vocabulary from the key order of `labels`. Counts are ignored.
    pub fn fit(&self, labels: &LabelFrequencies) -> FittedLabelEncoder {
        let vocabulary = Vocabulary::from_frequencies(labels);
        debug!("label vocabulary of {} entries", vocabulary.len());
        FittedLabelEncoder {
            vocabulary,
            label_position: self.label_position,
            handle_unknown: self.handle_unknown,
        }
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&self, table: &Table, labels: &LabelFrequencies) -> Result<Table> {
        self.fit(labels).transform(table)
    }
}

/// Serializable parameters for a fitted LabelEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoderParams {
    /// Vocabulary in index order.
    pub labels: Vec<LabelValue>,
    pub label_position: LabelPosition,
    pub handle_unknown: HandleUnknown,
}

/// Fitted LabelEncoder holding a fixed vocabulary.
#[derive(Clone, Debug)]
pub struct FittedLabelEncoder {
    vocabulary: Vocabulary,
    label_position: LabelPosition,
    handle_unknown: HandleUnknown,
}

impl FittedLabelEncoder {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    /// Remove the label field of every record and append its one-hot vector.
    ///
    /// Record lengths are unchanged. The input table is left untouched.
    ///
    /// # Errors
    /// - [`DatasetError::LabelOutOfBounds`] if a record is too short
    /// - [`DatasetError::UnknownLabel`] for a label outside the vocabulary
    ///   (unless [`HandleUnknown::Ignore`] is set)
    pub fn transform(&self, table: &Table) -> Result<Table> {
        let mut records = Vec::with_capacity(table.len());

        for (row, record) in table.iter().enumerate() {
            let mut record = record.clone();
            let field = record.remove_at(self.label_position, row)?;
            let hot = match field.label_value() {
                Some(label) => match self.vocabulary.index_of(&label) {
                    Some(index) => Some(index),
                    None if self.handle_unknown == HandleUnknown::Ignore => None,
                    None => {
                        return Err(DatasetError::UnknownLabel {
                            row,
                            label: label.to_string(),
                        })
                    }
                },
                None => {
                    return Err(DatasetError::UnknownLabel {
                        row,
                        label: format!("{:?}", field),
                    })
                }
            };
            record.push(Field::OneHot(one_hot(self.vocabulary.len(), hot)));
            records.push(record);
        }

        Ok(Table::from_records(records))
    }

    /// Replace each trailing one-hot vector by its label, reinserted at the
    /// label position.
    ///
    /// # Errors
    /// - [`DatasetError::NotEncoded`] if a record has no trailing one-hot field
    /// - [`DatasetError::InvalidParameter`] if a vector has the wrong width or
    ///   no active index
    pub fn inverse_transform(&self, table: &Table) -> Result<Table> {
        let mut records = Vec::with_capacity(table.len());

        for (row, record) in table.iter().enumerate() {
            let vector = record.one_hot().ok_or(DatasetError::NotEncoded { row })?;
            if vector.len() != self.vocabulary.len() {
                return Err(DatasetError::InvalidParameter(format!(
                    "row {}: one-hot width {} does not match vocabulary size {}",
                    row,
                    vector.len(),
                    self.vocabulary.len()
                )));
            }
            let label = vector
                .iter()
                .position(|&bit| bit == 1)
                .and_then(|index| self.vocabulary.label_at(index))
                .ok_or_else(|| {
                    DatasetError::InvalidParameter(format!(
                        "row {}: one-hot vector has no active index",
                        row
                    ))
                })?;

            let mut record = record.clone();
            record.pop();
            record.insert_at(self.label_position, Field::from(label.clone()), row)?;
            records.push(record);
        }

        Ok(Table::from_records(records))
    }

    /// Extract parameters for serialization.
    pub fn extract_params(&self) -> LabelEncoderParams {
        LabelEncoderParams {
            labels: self.vocabulary.labels().to_vec(),
            label_position: self.label_position,
            handle_unknown: self.handle_unknown,
        }
    }

    /// Reconstruct from parameters.
    pub fn from_params(params: LabelEncoderParams) -> Result<Self> {
        let expected = params.labels.len();
        let vocabulary = Vocabulary::from_labels(params.labels);
        if vocabulary.len() != expected {
            return Err(DatasetError::InvalidParameter(
                "vocabulary contains duplicate labels".to_string(),
            ));
        }
        Ok(Self {
            vocabulary,
            label_position: params.label_position,
            handle_unknown: params.handle_unknown,
        })
    }

    /// Encode the fitted state as bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.extract_params().to_bytes()?)
    }

    /// Decode a fitted state produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_params(LabelEncoderParams::from_bytes(bytes)?)
    }
}

/// Encode `table` with the vocabulary taken from `labels`.
pub fn convert_labels(
    table: &Table,
    labels: &LabelFrequencies,
    label_position: isize,
) -> Result<Table> {
    LabelEncoder::new()
        .with_label_position(label_position)
        .fit_transform(table, labels)
}
