//! Error types for loading and encoding operations.

use std::fmt;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Error type for dataset loading and label encoding.
#[derive(Debug)]
pub enum DatasetError {
    /// The source could not be opened or read.
    Io(std::io::Error),
    /// Invalid argument (empty separator, malformed range, ...).
    InvalidParameter(String),
    /// A label value is not part of the vocabulary.
    UnknownLabel { row: usize, label: String },
    /// A range comparison needed a number but got something else.
    NonNumericLabel { row: usize, found: String },
    /// The label position does not address a field of the record.
    LabelOutOfBounds {
        row: usize,
        position: isize,
        fields: usize,
    },
    /// The record has no trailing one-hot field.
    NotEncoded { row: usize },
    /// Serialization or deserialization error.
    SerializationError(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "I/O error: {}", err),
            DatasetError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            DatasetError::UnknownLabel { row, label } => {
                write!(f, "Unknown label {} at row {}", label, row)
            }
            DatasetError::NonNumericLabel { row, found } => {
                write!(f, "Non-numeric label {} at row {}", found, row)
            }
            DatasetError::LabelOutOfBounds {
                row,
                position,
                fields,
            } => write!(
                f,
                "Label position {} out of bounds for row {} with {} fields",
                position, row, fields
            ),
            DatasetError::NotEncoded { row } => {
                write!(f, "Row {} has no trailing one-hot field", row)
            }
            DatasetError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl From<bincode::Error> for DatasetError {
    fn from(err: bincode::Error) -> Self {
        DatasetError::SerializationError(err.to_string())
    }
}
