//! Error types for tabreportlib

use std::path::PathBuf;
use thiserror::Error;

use crate::calc::{Arity, Calculation, SummaryKind};

/// Errors raised while building a report.
///
/// Every builder operation that returns one of these leaves the builder's
/// existing state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Filename contains characters outside `[A-Za-z0-9_-]` or ends in a space/period
    #[error("invalid filename '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidFilename(String),

    /// Column content is empty or mixes text and numbers
    #[error("unsupported column type: {0}")]
    UnsupportedColumnType(String),

    /// Header and content collections differ in length
    #[error("length mismatch: {headers} headers for {columns} columns")]
    LengthMismatch { headers: usize, columns: usize },

    /// Calculation called with the wrong number of source columns
    #[error("{operation} requires {expected} source columns, got {actual}")]
    InvalidArity {
        operation: Calculation,
        expected: Arity,
        actual: usize,
    },

    /// Division by a zero divisor
    #[error("division by zero at row {row}")]
    DivisionByZero { row: usize },

    /// A report needs at least one column
    #[error("report has no columns")]
    EmptyReport,

    /// Column index does not address an existing column
    #[error("column index {index} out of range ({count} columns)")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    /// Aggregation not defined for the column's content type
    #[error("{kind} is not defined for text column '{header}'")]
    UnsupportedSummary { kind: SummaryKind, header: String },

    /// Failed to read a tabular source
    #[error("failed to read source '{path}': {message}")]
    SourceRead { path: PathBuf, message: String },

    /// Failed to parse a keyword (operation, summary kind, style, color...)
    #[error("cannot parse '{value}' as {expected}")]
    Parse { value: String, expected: &'static str },
}

/// Errors raised by exporters.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing the output file failed
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The report has no columns; nothing was written
    #[error("report cannot be empty")]
    EmptyReport,

    /// Serializing the report failed
    #[error("failed to serialize report: {0}")]
    Serialize(String),
}

impl ExportError {
    /// Wrap any writer failure for `path` as an I/O failure.
    pub fn io(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        ExportError::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ReportError::DivisionByZero { row: 1 };
        assert_eq!(err.to_string(), "division by zero at row 1");

        let err = ReportError::InvalidArity {
            operation: Calculation::Sub,
            expected: Arity::Exactly(2),
            actual: 3,
        };
        assert_eq!(err.to_string(), "SUB requires exactly 2 source columns, got 3");

        let err = ReportError::LengthMismatch {
            headers: 2,
            columns: 3,
        };
        assert!(err.to_string().contains("2 headers"));
    }

    #[test]
    fn test_export_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ExportError::io("out/report.txt", io);
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("out/report.txt"));
    }
}
