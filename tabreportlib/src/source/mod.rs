//! Tabular record sources: where report columns come from.
//!
//! A [`TabularSource`] is a forward-only cursor over named columns, the
//! shape a database result set or a delimited file naturally has:
//!
//! - **TabularSource**: column names, optional declared types, row cursor
//! - **RecordSet**: in-memory implementation, also loadable from CSV
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::source::{RecordSet, SourceValue, TabularSource};
//!
//! let mut rows = RecordSet::new(vec!["name".into(), "qty".into()]);
//! rows.push_row(vec![SourceValue::text("bolts"), SourceValue::Number(40.0)]);
//!
//! assert_eq!(rows.column_names(), ["name", "qty"]);
//! assert!(rows.next_row().is_some());
//! assert!(rows.next_row().is_none());
//! ```

pub mod csv;

use std::collections::VecDeque;

/// One value read from a source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    /// SQL NULL or an empty delimited field
    Null,
    Text(String),
    Number(f64),
    /// Any other native value, already stringified (dates, booleans...)
    Other(String),
}

impl SourceValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        SourceValue::Text(value.into())
    }

    /// Numeric content, if the value is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SourceValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Display text used when the value lands in a text column.
    ///
    /// Nulls become the empty string.
    pub fn into_text(self) -> String {
        match self {
            SourceValue::Null => String::new(),
            SourceValue::Text(s) | SourceValue::Other(s) => s,
            SourceValue::Number(n) => n.to_string(),
        }
    }
}

/// Column type declared by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Text,
    Number,
    /// Anything else; stored as text
    Other,
}

/// Forward-only cursor over rows of named columns.
pub trait TabularSource {
    /// Column names, in order
    fn column_names(&self) -> Vec<String>;

    /// Declared column types, when the source knows them.
    ///
    /// Returning `None` makes consumers infer each column from its values.
    fn column_types(&self) -> Option<Vec<SourceType>> {
        None
    }

    /// Advance to the next row. `None` once the source is exhausted.
    fn next_row(&mut self) -> Option<Vec<SourceValue>>;
}

/// In-memory rows with named columns.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    names: Vec<String>,
    types: Option<Vec<SourceType>>,
    rows: VecDeque<Vec<SourceValue>>,
}

impl RecordSet {
    /// Create an empty record set with the given column names
    pub fn new(names: Vec<String>) -> Self {
        RecordSet {
            names,
            types: None,
            rows: VecDeque::new(),
        }
    }

    /// Builder: declare column types
    pub fn with_types(mut self, types: Vec<SourceType>) -> Self {
        self.types = Some(types);
        self
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<SourceValue>) {
        self.rows.push_back(row);
    }

    /// Rows not yet consumed
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl TabularSource for RecordSet {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn column_types(&self) -> Option<Vec<SourceType>> {
        self.types.clone()
    }

    fn next_row(&mut self) -> Option<Vec<SourceValue>> {
        self.rows.pop_front()
    }
}
