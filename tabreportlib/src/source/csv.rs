//! Loading a [`RecordSet`] from delimited text.

use std::io::Read;
use std::path::Path;

use super::{RecordSet, SourceValue};
use crate::error::ReportError;
use crate::Result;

impl RecordSet {
    /// Load a CSV file whose first record holds the column names.
    ///
    /// Each field is typed on its own: blank fields become
    /// [`SourceValue::Null`] and anything that parses as a finite `f64`
    /// becomes [`SourceValue::Number`]. Digit strings with leading zeros
    /// (`007`, zip codes) are therefore read as numbers and the zeros are
    /// not preserved. Build the [`RecordSet`] with explicit
    /// [`SourceValue::Text`] values when such fields must stay verbatim.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| source_error(path, e))?;
        read_records(reader).map_err(|e| source_error(path, e))
    }

    /// Load CSV data from any reader; the first record holds the column names.
    ///
    /// Fields are typed as in [`RecordSet::from_csv_path`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        read_records(reader).map_err(|e| source_error(Path::new("<reader>"), e))
    }
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> std::result::Result<RecordSet, csv::Error> {
    let names = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut set = RecordSet::new(names);

    for record in reader.records() {
        let record = record?;
        set.push_row(record.iter().map(detect_value).collect());
    }

    tracing::debug!(
        columns = set.names.len(),
        rows = set.remaining(),
        "loaded delimited source"
    );
    Ok(set)
}

/// Empty fields are nulls, numeric fields numbers, everything else text.
fn detect_value(field: &str) -> SourceValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return SourceValue::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => SourceValue::Number(n),
        _ => SourceValue::Text(field.to_string()),
    }
}

fn source_error(path: &Path, err: csv::Error) -> ReportError {
    ReportError::SourceRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
