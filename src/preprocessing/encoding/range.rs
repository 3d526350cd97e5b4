//! One-hot encoding of continuous labels by numeric range.

use super::one_hot;
use crate::dataset::{Field, IndexFrequencies, LabelPosition, RangeFrequencies, Table};
use crate::error::{DatasetError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Inclusive interval `[min, max]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// # Errors
    /// [`DatasetError::InvalidParameter`] if a bound is NaN or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(DatasetError::InvalidParameter(
                "range bounds must not be NaN".to_string(),
            ));
        }
        if min > max {
            return Err(DatasetError::InvalidParameter(format!(
                "range min {} is greater than max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Both ends inclusive. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn bits(value: f64) -> u64 {
        if value == 0.0 {
            0
        } else {
            value.to_bits()
        }
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

// Bounds are never NaN.
impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::bits(self.min).hash(state);
        Self::bits(self.max).hash(state);
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl TryFrom<(f64, f64)> for Range {
    type Error = DatasetError;

    fn try_from((min, max): (f64, f64)) -> Result<Self> {
        Self::new(min, max)
    }
}

/// Output of [`RangeEncoder::transform`].
#[derive(Clone, Debug, PartialEq)]
pub struct RangeEncoding {
    /// Records with a one-hot vector appended after all original fields.
    pub table: Table,
    /// Matches per range, every range present even at zero.
    pub range_counts: RangeFrequencies,
    /// Matches per range index `0..ranges.len()`.
    pub index_counts: IndexFrequencies,
}

/// Encoder for continuous labels.
///
/// Ranges are checked in order and the first one containing the label wins,
/// so overlapping ranges are allowed. A label outside every range gets an
/// all-zero vector and is not counted. Unlike [`LabelEncoder`](super::LabelEncoder),
/// the label field stays in the record.
#[derive(Clone, Debug)]
pub struct RangeEncoder {
    ranges: Vec<Range>,
    label_position: LabelPosition,
}

impl RangeEncoder {
    pub fn new<I: IntoIterator<Item = Range>>(ranges: I) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
            label_position: LabelPosition::LAST,
        }
    }

    /// Build from `(min, max)` pairs, validating each one.
    pub fn from_bounds(bounds: &[(f64, f64)]) -> Result<Self> {
        let ranges = bounds
            .iter()
            .map(|&pair| Range::try_from(pair))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(ranges))
    }

    /// Negative positions count from the end, `-1` being the last field.
    pub fn with_label_position(mut self, position: isize) -> Self {
        self.label_position = LabelPosition::new(position);
        self
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Index of the first range containing `value`.
    pub fn bucket(&self, value: f64) -> Option<usize> {
        self.ranges.iter().position(|range| range.contains(value))
    }

    /// Append a range one-hot vector to every record and count matches.
    ///
    /// # Errors
    /// - [`DatasetError::LabelOutOfBounds`] if a record is too short
    /// - [`DatasetError::NonNumericLabel`] if a label is not a number
    pub fn transform(&self, table: &Table) -> Result<RangeEncoding> {
        let mut range_counts = RangeFrequencies::with_keys(self.ranges.iter().copied());
        let mut index_counts = IndexFrequencies::with_keys(0..self.ranges.len());
        let mut records = Vec::with_capacity(table.len());
        let mut unmatched = 0usize;

        for (row, record) in table.iter().enumerate() {
            let field = record.field_at(self.label_position, row)?;
            let value = field.as_number().ok_or_else(|| DatasetError::NonNumericLabel {
                row,
                found: format!("{:?}", field),
            })?;

            let hot = self.bucket(value);
            match hot {
                Some(index) => {
                    range_counts.increment(self.ranges[index]);
                    index_counts.increment(index);
                }
                None => {
                    trace!("row {}: label {} outside every range", row, value);
                    unmatched += 1;
                }
            }

            let mut record = record.clone();
            record.push(Field::OneHot(one_hot(self.ranges.len(), hot)));
            records.push(record);
        }

        debug!(
            "range encoded {} records over {} ranges, {} unmatched",
            records.len(),
            self.ranges.len(),
            unmatched
        );
        Ok(RangeEncoding {
            table: Table::from_records(records),
            range_counts,
            index_counts,
        })
    }
}

/// Encode `table` by the given ranges, keeping the label field.
pub fn convert_ranged_labels(
    table: &Table,
    ranges: &[Range],
    label_position: isize,
) -> Result<RangeEncoding> {
    RangeEncoder::new(ranges.iter().copied())
        .with_label_position(label_position)
        .transform(table)
}
