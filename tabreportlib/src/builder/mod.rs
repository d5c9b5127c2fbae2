//! Report construction: the mutable side of the pipeline.
//!
//! Two façades share one [`ReportCore`]:
//!
//! - [`ReportBuilder`]: builds a plain [`Report`](crate::report::Report)
//! - [`FormatReportBuilder`]: additionally carries title, table, header,
//!   row-number and summary formats and builds a
//!   [`FormattedReport`](crate::report::FormattedReport)
//!
//! Operations common to both live on the [`ReportDraft`] trait. Any operation
//! that fails leaves the builder exactly as it was.
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::builder::{ReportBuilder, ReportDraft};
//! use tabreportlib::calc::Calculation;
//!
//! let mut builder = ReportBuilder::new("sales_q1").unwrap();
//! builder.set_title("Q1 sales");
//! builder.add_text_column("region", vec!["north".into(), "south".into()]);
//! builder.add_number_column("units", vec![10.0, 20.0]);
//! builder.add_number_column("price", vec![2.0, 4.0]);
//! builder
//!     .add_calculated_column_from("revenue", &[1, 2], Calculation::Prod)
//!     .unwrap();
//!
//! let report = builder.build().unwrap();
//! assert_eq!(report.columns().len(), 4);
//! assert_eq!(report.row_count(), 2);
//! ```

pub mod formatted;
pub mod plain;
pub mod report_core;

pub use formatted::FormatReportBuilder;
pub use plain::ReportBuilder;
pub use report_core::ReportCore;

use regex::Regex;
use std::sync::LazyLock;

use crate::calc::{Calculation, SummaryKind};
use crate::data::{CellValue, Column, SummaryValue};
use crate::error::ReportError;
use crate::source::TabularSource;
use crate::Result;

static FILENAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("filename pattern is a valid regex"));

/// Check an output filename (without extension).
///
/// Only ASCII letters, digits, `_` and `-` are allowed, and the name may not
/// end in a space or a period.
pub fn validate_filename(name: &str) -> Result<()> {
    let trailing = name.ends_with(' ') || name.ends_with('.');
    if trailing || !FILENAME_PATTERN.is_match(name) {
        return Err(ReportError::InvalidFilename(name.to_string()));
    }
    Ok(())
}

/// Operations shared by every report builder.
///
/// Implementors only expose their [`ReportCore`]; every other method has a
/// default that forwards to it.
pub trait ReportDraft {
    /// Shared builder state
    fn core(&self) -> &ReportCore;

    /// Shared builder state, mutably
    fn core_mut(&mut self) -> &mut ReportCore;

    /// Output filename (without extension)
    fn filename(&self) -> &str {
        self.core().filename()
    }

    /// Replace the filename. Fails with [`ReportError::InvalidFilename`].
    fn set_filename(&mut self, name: &str) -> Result<()> {
        self.core_mut().set_filename(name)
    }

    /// Report title
    fn title(&self) -> &str {
        self.core().title()
    }

    /// Replace the title
    fn set_title(&mut self, title: impl Into<String>) {
        self.core_mut().set_title(title.into());
    }

    /// Whether the built report gets a leading row-number column
    fn include_row_numbers(&self) -> bool {
        self.core().include_row_numbers()
    }

    /// Toggle the leading row-number column
    fn set_include_row_numbers(&mut self, include: bool) {
        self.core_mut().set_include_row_numbers(include);
    }

    /// Append a column, inferring its type from the first value
    fn add_column(&mut self, header: impl Into<String>, values: Vec<CellValue>) -> Result<()> {
        let column = Column::from_values(header, values)?;
        self.core_mut().push_column(column);
        Ok(())
    }

    /// Append a column with an empty header
    fn add_unnamed_column(&mut self, values: Vec<CellValue>) -> Result<()> {
        self.add_column(String::new(), values)
    }

    /// Append a text column
    fn add_text_column(&mut self, header: impl Into<String>, values: Vec<String>) {
        self.core_mut().push_column(Column::text(header, values));
    }

    /// Append a number column
    fn add_number_column(&mut self, header: impl Into<String>, values: Vec<f64>) {
        self.core_mut().push_column(Column::number(header, values));
    }

    /// Append one column per header/content pair.
    ///
    /// Fails with [`ReportError::LengthMismatch`] when the two lists differ
    /// in length. Nothing is appended unless every column is valid.
    fn add_columns(&mut self, headers: Vec<String>, content: Vec<Vec<CellValue>>) -> Result<()> {
        let columns = report_core::columns_from_lists(headers, content)?;
        self.core_mut().extend_columns(columns);
        Ok(())
    }

    /// Append columns from header/values pairs, in iteration order
    fn add_columns_from<I, K>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Vec<CellValue>)>,
        K: Into<String>,
    {
        let columns = pairs
            .into_iter()
            .map(|(header, values)| Column::from_values(header, values))
            .collect::<Result<Vec<_>>>()?;
        self.core_mut().extend_columns(columns);
        Ok(())
    }

    /// Replace the whole column list
    fn set_columns(&mut self, columns: Vec<Column>) {
        self.core_mut().set_columns(columns);
    }

    /// Remove the column at `index`; out-of-range indices are ignored
    fn remove_column_at(&mut self, index: usize) -> Option<Column> {
        self.core_mut().remove_column_at(index)
    }

    /// Column at `index`
    fn column(&self, index: usize) -> Option<&Column> {
        self.core().columns().get(index)
    }

    /// All columns, in order
    fn columns(&self) -> &[Column] {
        self.core().columns()
    }

    /// Number of columns
    fn column_count(&self) -> usize {
        self.core().columns().len()
    }

    /// Append a column computed from the given number sequences
    fn add_calculated_column(
        &mut self,
        header: impl Into<String>,
        sources: &[&[f64]],
        op: Calculation,
    ) -> Result<()> {
        let column = report_core::calculated_column(header.into(), sources, op)?;
        self.core_mut().push_column(column);
        Ok(())
    }

    /// Append a column computed from existing number columns
    fn add_calculated_column_from(
        &mut self,
        header: impl Into<String>,
        indices: &[usize],
        op: Calculation,
    ) -> Result<()> {
        let column = self.core().calculated_from_indices(header.into(), indices, op)?;
        self.core_mut().push_column(column);
        Ok(())
    }

    /// Insert a summary entry; an existing key keeps its position
    fn add_summary_entry(&mut self, key: impl Into<String>, value: impl Into<SummaryValue>) {
        self.core_mut().summary_mut().insert(key, value);
    }

    /// Insert several summary entries, in iteration order
    fn add_summary_entries<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SummaryValue>,
    {
        let summary = self.core_mut().summary_mut();
        for (key, value) in entries {
            summary.insert(key, value);
        }
    }

    /// Replace every summary entry
    fn set_summary_entries<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SummaryValue>,
    {
        self.core_mut().summary_mut().clear();
        self.add_summary_entries(entries);
    }

    /// Insert a summary entry aggregated from the column at `index`.
    ///
    /// Only cells satisfying `predicate` take part. SUM and AVERAGE on a
    /// text column fail with [`ReportError::UnsupportedSummary`].
    fn add_summary_from_column<P>(
        &mut self,
        key: impl Into<String>,
        index: usize,
        kind: SummaryKind,
        predicate: P,
    ) -> Result<f64>
    where
        P: Fn(&CellValue) -> bool,
    {
        let value = self.core().summarize_column(index, kind, predicate)?;
        self.core_mut().summary_mut().insert(key, value);
        Ok(value)
    }

    /// Append one column per source column. Never fails.
    fn populate_from_source<S>(&mut self, source: &mut S)
    where
        S: TabularSource + ?Sized,
    {
        let columns = report_core::columns_from_source(source);
        self.core_mut().extend_columns(columns);
    }

    /// Replace the column list with the source's columns. Never fails.
    fn replace_from_source<S>(&mut self, source: &mut S)
    where
        S: TabularSource + ?Sized,
    {
        let columns = report_core::columns_from_source(source);
        self.core_mut().set_columns(columns);
    }
}
