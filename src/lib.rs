//! # tabular-labels
//!
//! Loads delimited text datasets into memory and turns their label column
//! into one-hot vectors.
//!
//! ## Pipeline
//!
//! 1. [`load_file`] parses each non-blank line into a [`Record`], coercing
//!    numeric-looking fields to `f64`, and counts label occurrences.
//! 2. [`convert_labels`] replaces discrete labels with one-hot vectors using
//!    the first-seen label order as vocabulary; [`convert_ranged_labels`]
//!    appends one-hot vectors that bucket numeric labels by range.
//! 3. [`update_label_frequencies`] recounts labels of an encoded table.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabular_labels::{convert_labels, Field, Loader, LoadOptions};
//!
//! let (table, labels) = Loader::new(LoadOptions::default())
//!     .load_reader("1,2,cat\n3,4,dog\n1,1,cat\n".as_bytes())
//!     .unwrap();
//! assert_eq!(labels.len(), 2);
//!
//! let encoded = convert_labels(&table, &labels, -1).unwrap();
//! assert_eq!(encoded.records()[1].fields()[2], Field::OneHot(vec![0, 1]));
//! ```
//!
//! All functions are synchronous and leave their inputs untouched. A call
//! either returns a complete result or an error, never a partial table.

/// Tables, records, label frequencies and file loading.
pub mod dataset;

/// Error type shared by all operations.
pub mod error;

/// Label encoders.
pub mod preprocessing;

/// Byte serialization of fitted encoder parameters.
pub mod serialization;

pub use dataset::{
    is_numeric, load_file, Field, Frequencies, IndexFrequencies, LabelFrequencies, LabelPosition,
    LabelValue, LoadOptions, Loader, RangeFrequencies, Record, Table,
};
pub use error::{DatasetError, Result};
pub use preprocessing::{
    convert_labels, convert_ranged_labels, update_label_frequencies, HandleUnknown, LabelEncoder,
    Range, RangeEncoder, RangeEncoding,
};
