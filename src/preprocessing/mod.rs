//! Label preprocessing for loaded tables.
//!
//! # Available Transformers
//!
//! - [`LabelEncoder`]: discrete labels to one-hot vectors, vocabulary taken
//!   from a label frequency map
//! - [`RangeEncoder`]: continuous labels to one-hot vectors by numeric range
//! - [`update_label_frequencies`]: recount labels of an encoded table
//!
//! # Example
//!
//! ```rust
//! use tabular_labels::dataset::{Loader, LoadOptions};
//! use tabular_labels::preprocessing::{convert_labels, update_label_frequencies};
//!
//! let (table, labels) = Loader::new(LoadOptions::default())
//!     .load_reader("1,2,cat\n3,4,dog\n1,1,cat\n".as_bytes())
//!     .unwrap();
//!
//! let encoded = convert_labels(&table, &labels, -1).unwrap();
//! let counts = update_label_frequencies(&encoded, &labels).unwrap();
//! assert_eq!(counts.get(&0), Some(2));
//! assert_eq!(counts.get(&1), Some(1));
//! ```

pub mod encoding;

pub use encoding::{
    convert_labels, convert_ranged_labels, update_label_frequencies, FittedLabelEncoder,
    HandleUnknown, LabelEncoder, LabelEncoderParams, Range, RangeEncoder, RangeEncoding,
    Vocabulary,
};
