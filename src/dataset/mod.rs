//! In-memory tabular data loaded from delimited text.
//!
//! # Core Concepts
//!
//! - **Field** — One cell of a record: a number, a piece of text, or (after
//!   encoding) a one-hot vector.
//! - **Record** — One parsed line, an ordered sequence of fields.
//! - **Table** — Records in file line order.
//! - **Label** — The field at a configured [`LabelPosition`], used as a
//!   classification key.
//!
//! # Example
//!
//! ```rust
//! use tabular_labels::dataset::{Loader, LoadOptions, Field, LabelValue};
//!
//! let loader = Loader::new(LoadOptions::default());
//! let (table, labels) = loader.load_reader("1,2,cat\n3,4,dog\n".as_bytes()).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.records()[0].fields()[0], Field::Number(1.0));
//! assert_eq!(labels.get(&LabelValue::from("cat")), Some(1));
//! ```

use crate::error::{DatasetError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod frequency;
pub mod loader;

pub use self::frequency::{Frequencies, IndexFrequencies, LabelFrequencies, RangeFrequencies};
pub use self::loader::{is_numeric, load_file, parse_line, LoadOptions, Loader};

/// A single typed cell of a [`Record`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Value that passed the numeric coercion check.
    Number(f64),
    /// Whitespace-stripped text that is not numeric.
    Text(String),
    /// One-hot vector appended by a label encoder.
    OneHot(Vec<u8>),
}

impl Field {
    /// Parse a raw field: strip surrounding whitespace, then store as a
    /// number if the host float parser accepts it, as text otherwise.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(value) => Field::Number(value),
            Err(_) => Field::Text(trimmed.to_string()),
        }
    }

    /// Whether this field can be read as a floating-point number.
    pub fn is_numeric(&self) -> bool {
        match self {
            Field::Number(_) => true,
            Field::Text(text) => is_numeric(text),
            Field::OneHot(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_one_hot(&self) -> Option<&[u8]> {
        match self {
            Field::OneHot(vector) => Some(vector),
            _ => None,
        }
    }

    /// The label key for this field, `None` for one-hot vectors.
    pub fn label_value(&self) -> Option<LabelValue> {
        match self {
            Field::Number(value) => Some(LabelValue::Number(*value)),
            Field::Text(text) => Some(LabelValue::Text(text.clone())),
            Field::OneHot(_) => None,
        }
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Field::Text(text.to_string())
    }
}

impl From<LabelValue> for Field {
    fn from(label: LabelValue) -> Self {
        match label {
            LabelValue::Number(value) => Field::Number(value),
            LabelValue::Text(text) => Field::Text(text),
        }
    }
}

/// A raw label used as a vocabulary key.
///
/// Numbers compare by value with `-0.0 == 0.0`, and every NaN is the same key,
/// so labels can live in hash maps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LabelValue {
    Number(f64),
    Text(String),
}

impl LabelValue {
    fn number_bits(value: f64) -> u64 {
        if value.is_nan() {
            f64::NAN.to_bits()
        } else if value == 0.0 {
            0
        } else {
            value.to_bits()
        }
    }
}

impl PartialEq for LabelValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LabelValue::Number(a), LabelValue::Number(b)) => {
                Self::number_bits(*a) == Self::number_bits(*b)
            }
            (LabelValue::Text(a), LabelValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for LabelValue {}

impl Hash for LabelValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            LabelValue::Number(value) => {
                0u8.hash(state);
                Self::number_bits(*value).hash(state);
            }
            LabelValue::Text(text) => {
                1u8.hash(state);
                text.hash(state);
            }
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Number(value) => write!(f, "{}", value),
            LabelValue::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<f64> for LabelValue {
    fn from(value: f64) -> Self {
        LabelValue::Number(value)
    }
}

impl From<&str> for LabelValue {
    fn from(text: &str) -> Self {
        LabelValue::Text(text.to_string())
    }
}

/// Position of the label field within a record.
///
/// Non-negative values index from the start; negative values count from the
/// end, so `-1` is the last field and `-len` the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPosition(isize);

impl LabelPosition {
    /// The last field of the record.
    pub const LAST: Self = Self(-1);

    pub fn new(index: isize) -> Self {
        Self(index)
    }

    pub fn index(self) -> isize {
        self.0
    }

    /// Resolve against a record of `len` fields.
    pub fn resolve(self, len: usize) -> Option<usize> {
        if self.0 < 0 {
            let back = self.0.unsigned_abs();
            (back <= len).then(|| len - back)
        } else {
            let index = self.0 as usize;
            (index < len).then_some(index)
        }
    }
}

impl Default for LabelPosition {
    fn default() -> Self {
        Self::LAST
    }
}

impl From<isize> for LabelPosition {
    fn from(index: isize) -> Self {
        Self(index)
    }
}

/// One parsed line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// The field at `position`; `row` is only used for error reporting.
    pub fn field_at(&self, position: LabelPosition, row: usize) -> Result<&Field> {
        let index = self.resolve(position, self.len(), row)?;
        Ok(&self.fields[index])
    }

    /// Trailing one-hot vector, if the record has been encoded.
    pub fn one_hot(&self) -> Option<&[u8]> {
        self.fields.last().and_then(Field::as_one_hot)
    }

    pub(crate) fn remove_at(&mut self, position: LabelPosition, row: usize) -> Result<Field> {
        let index = self.resolve(position, self.len(), row)?;
        Ok(self.fields.remove(index))
    }

    /// Insert so that, afterwards, `position` addresses the new field.
    pub(crate) fn insert_at(
        &mut self,
        position: LabelPosition,
        field: Field,
        row: usize,
    ) -> Result<()> {
        let index = self.resolve(position, self.len() + 1, row)?;
        self.fields.insert(index, field);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Option<Field> {
        self.fields.pop()
    }

    fn resolve(&self, position: LabelPosition, len: usize, row: usize) -> Result<usize> {
        position
            .resolve(len)
            .ok_or(DatasetError::LabelOutOfBounds {
                row,
                position: position.index(),
                fields: len,
            })
    }
}

impl From<Vec<Field>> for Record {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Records in insertion (file line) order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Stack every record's trailing one-hot vector into a `(rows, width)` matrix.
    ///
    /// # Errors
    /// - [`DatasetError::NotEncoded`] if a record has no trailing one-hot field
    /// - [`DatasetError::InvalidParameter`] if vector lengths differ
    pub fn one_hot_matrix(&self) -> Result<Array2<f32>> {
        let width = match self.records.first() {
            Some(record) => record.one_hot().ok_or(DatasetError::NotEncoded { row: 0 })?.len(),
            None => return Ok(Array2::zeros((0, 0))),
        };

        let mut matrix = Array2::zeros((self.len(), width));
        for (row, record) in self.records.iter().enumerate() {
            let vector = record.one_hot().ok_or(DatasetError::NotEncoded { row })?;
            if vector.len() != width {
                return Err(DatasetError::InvalidParameter(format!(
                    "one-hot width mismatch at row {}: expected {}, got {}",
                    row,
                    width,
                    vector.len()
                )));
            }
            for (col, &bit) in vector.iter().enumerate() {
                matrix[[row, col]] = f32::from(bit);
            }
        }
        Ok(matrix)
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_parse_numeric_and_text() {
        assert_eq!(Field::parse(" 7.0 "), Field::Number(7.0));
        assert_eq!(Field::parse("-2"), Field::Number(-2.0));
        assert_eq!(Field::parse("  cat\n"), Field::Text("cat".to_string()));
        assert_eq!(Field::parse(""), Field::Text(String::new()));
    }

    #[test]
    fn test_field_is_numeric() {
        assert!(Field::Number(1.0).is_numeric());
        assert!(Field::Text("3.5".to_string()).is_numeric());
        assert!(!Field::Text("cat".to_string()).is_numeric());
        assert!(!Field::OneHot(vec![1, 0]).is_numeric());
    }

    #[test]
    fn test_label_value_zero_and_nan_keys() {
        assert_eq!(LabelValue::Number(0.0), LabelValue::Number(-0.0));
        assert_eq!(LabelValue::Number(f64::NAN), LabelValue::Number(f64::NAN));
        assert_ne!(LabelValue::Number(1.0), LabelValue::Text("1".to_string()));

        let mut set = HashSet::new();
        set.insert(LabelValue::Number(0.0));
        set.insert(LabelValue::Number(-0.0));
        set.insert(LabelValue::from("0"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_label_position_resolve() {
        assert_eq!(LabelPosition::LAST.resolve(3), Some(2));
        assert_eq!(LabelPosition::new(-3).resolve(3), Some(0));
        assert_eq!(LabelPosition::new(-4).resolve(3), None);
        assert_eq!(LabelPosition::new(0).resolve(3), Some(0));
        assert_eq!(LabelPosition::new(3).resolve(3), None);
        assert_eq!(LabelPosition::LAST.resolve(0), None);
    }

    #[test]
    fn test_record_field_at_out_of_bounds() {
        let record = Record::new(vec![Field::Number(1.0), Field::from("a")]);
        assert_eq!(
            record.field_at(LabelPosition::new(-2), 0).unwrap(),
            &Field::Number(1.0)
        );

        let err = record.field_at(LabelPosition::new(5), 4).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::LabelOutOfBounds {
                row: 4,
                position: 5,
                fields: 2
            }
        ));
    }

    #[test]
    fn test_record_insert_restores_position() {
        let mut record = Record::new(vec![Field::Number(1.0), Field::from("a"), Field::Number(2.0)]);
        let removed = record.remove_at(LabelPosition::new(-2), 0).unwrap();
        assert_eq!(removed, Field::from("a"));

        record.insert_at(LabelPosition::new(-2), removed, 0).unwrap();
        assert_eq!(
            record.fields(),
            &[Field::Number(1.0), Field::from("a"), Field::Number(2.0)]
        );
    }

    #[test]
    fn test_one_hot_matrix() {
        let table: Table = vec![
            Record::new(vec![Field::Number(1.0), Field::OneHot(vec![1, 0])]),
            Record::new(vec![Field::Number(2.0), Field::OneHot(vec![0, 1])]),
        ]
        .into_iter()
        .collect();

        let matrix = table.one_hot_matrix().unwrap();
        assert_eq!(matrix.shape(), &[2, 2]);
        assert_eq!(matrix[[0, 0]], 1.0);
        assert_eq!(matrix[[1, 1]], 1.0);
        assert_eq!(matrix[[1, 0]], 0.0);
    }

    #[test]
    fn test_one_hot_matrix_not_encoded() {
        let table = Table::from_records(vec![
            Record::new(vec![Field::OneHot(vec![1])]),
            Record::new(vec![Field::Number(2.0)]),
        ]);
        assert!(matches!(
            table.one_hot_matrix(),
            Err(DatasetError::NotEncoded { row: 1 })
        ));
    }

    #[test]
    fn test_one_hot_matrix_empty_table() {
        let matrix = Table::new().one_hot_matrix().unwrap();
        assert_eq!(matrix.shape(), &[0, 0]);
    }

    #[test]
    fn test_table_json_round_trip() {
        let table = Table::from_records(vec![Record::new(vec![
            Field::Number(1.5),
            Field::from("cat"),
            Field::OneHot(vec![0, 1]),
        ])]);

        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
