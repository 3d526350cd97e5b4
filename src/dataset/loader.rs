//! Line-oriented loading of delimited text into a [`Table`].
//!
//! Each non-blank line becomes one [`Record`]. Fields are split on the
//! separator, stripped, and stored as numbers when they pass [`is_numeric`].
//! There is no quoting, escaping, header detection or schema check: lines
//! with a different number of fields are kept as they are.

use super::{Field, LabelFrequencies, LabelPosition, Record, Table};
use crate::error::{DatasetError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parsing options for [`Loader`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field separator. May be longer than one character.
    pub separator: String,
    /// Position of the label field in each record.
    pub label_position: LabelPosition,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            label_position: LabelPosition::LAST,
        }
    }
}

impl LoadOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Negative positions count from the end, `-1` being the last field.
    pub fn with_label_position(mut self, position: isize) -> Self {
        self.label_position = LabelPosition::new(position);
        self
    }
}

/// Reads delimited text and tallies label frequencies.
#[derive(Clone, Debug, Default)]
pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a file from disk.
    ///
    /// # Errors
    /// - [`DatasetError::InvalidParameter`] for an empty separator
    /// - [`DatasetError::Io`] if the file is missing or unreadable
    /// - [`DatasetError::LabelOutOfBounds`] if a line is too short for the label position
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<(Table, LabelFrequencies)> {
        self.validate()?;
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("loading {}", path.display());
        self.load_reader(BufReader::new(file))
    }

    /// Load from any buffered text source.
    ///
    /// Blank lines are skipped. Nothing is returned unless every line parses.
    pub fn load_reader<R: BufRead>(&self, reader: R) -> Result<(Table, LabelFrequencies)> {
        self.validate()?;

        let mut table = Table::new();
        let mut labels = LabelFrequencies::new();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                trace!("line {}: blank, skipped", line_no + 1);
                skipped += 1;
                continue;
            }

            let record = parse_line(&line, &self.options.separator);
            let row = table.len();
            let label = record.field_at(self.options.label_position, row)?;
            if let Some(label) = label.label_value() {
                trace!("line {}: {} fields, label {}", line_no + 1, record.len(), label);
                labels.increment(label);
            }
            table.push(record);
        }

        debug!(
            "loaded {} records ({} blank lines skipped), {} distinct labels",
            table.len(),
            skipped,
            labels.len()
        );
        Ok((table, labels))
    }

    fn validate(&self) -> Result<()> {
        if self.options.separator.is_empty() {
            return Err(DatasetError::InvalidParameter(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split one line into coerced fields.
pub fn parse_line(line: &str, separator: &str) -> Record {
    line.split(separator).map(Field::parse).collect()
}

/// Whether `value` reads as a floating-point number once surrounding
/// whitespace is stripped. Accepts a sign, decimal point, exponent and the
/// `inf`/`infinity`/`nan` tokens in any case.
pub fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// Load `path`, splitting on `separator`, with the label at `label_position`.
pub fn load_file<P: AsRef<Path>>(
    path: P,
    separator: &str,
    label_position: isize,
) -> Result<(Table, LabelFrequencies)> {
    let options = LoadOptions::default()
        .with_separator(separator)
        .with_label_position(label_position);
    Loader::new(options).load_path(path)
}
