//! Immutable report snapshots handed to exporters.

use serde::Serialize;

use crate::data::{Column, Summary};
use crate::format::{CellFormat, SummaryFormat, TableFormat, TitleFormat};

/// A built report: title, columns, row-number flag and summary.
///
/// Created once by a builder's `build()` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    filename: String,
    title: String,
    columns: Vec<Column>,
    include_row_numbers: bool,
    summary: Summary,
}

impl Report {
    pub(crate) fn new(
        filename: String,
        title: String,
        columns: Vec<Column>,
        include_row_numbers: bool,
        summary: Summary,
    ) -> Self {
        Report {
            filename,
            title,
            columns,
            include_row_numbers,
            summary,
        }
    }

    /// Output filename, without extension
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Title; may be empty
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Columns in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether a leading row-number column is rendered
    pub fn include_row_numbers(&self) -> bool {
        self.include_row_numbers
    }

    /// Summary entries in display order
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Number of table rows: the longest column's length
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// Check if the report has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A report plus the formats of each of its sections.
///
/// Every column of the inner report carries a [`CellFormat`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedReport {
    report: Report,
    title_format: TitleFormat,
    table_format: TableFormat,
    header_format: CellFormat,
    row_number_format: CellFormat,
    summary_format: SummaryFormat,
}

impl FormattedReport {
    pub(crate) fn new(
        report: Report,
        title_format: TitleFormat,
        table_format: TableFormat,
        header_format: CellFormat,
        row_number_format: CellFormat,
        summary_format: SummaryFormat,
    ) -> Self {
        FormattedReport {
            report,
            title_format,
            table_format,
            header_format,
            row_number_format,
            summary_format,
        }
    }

    /// The unformatted content
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Drop the formats, keeping the content
    pub fn into_report(self) -> Report {
        self.report
    }

    pub fn title_format(&self) -> &TitleFormat {
        &self.title_format
    }

    pub fn table_format(&self) -> &TableFormat {
        &self.table_format
    }

    pub fn header_format(&self) -> &CellFormat {
        &self.header_format
    }

    pub fn row_number_format(&self) -> &CellFormat {
        &self.row_number_format
    }

    pub fn summary_format(&self) -> &SummaryFormat {
        &self.summary_format
    }

    /// Format of the column at `index`
    pub fn column_format(&self, index: usize) -> Option<&CellFormat> {
        self.report.columns.get(index).and_then(Column::format)
    }
}
