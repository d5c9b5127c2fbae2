//! Table-ready data structures for report output.
//!
//! The data flow is:
//! 1. Builder state (columns of typed cells, summary map)
//! 2. Report (immutable snapshot)
//! 3. ReportTable (formatted strings for display)
//!
//! ReportTable only formats; the report already holds every computed value.

use serde::{Deserialize, Serialize};

use crate::report::Report;

/// Header of the row-number column.
pub const ROW_NUMBER_HEADER: &str = "#";

/// A single rendered summary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: String,
    pub value: String,
}

/// Table-ready report data.
///
/// Exporters iterate over headers/rows/summary and apply layout; no
/// computation happens past this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    /// Report title; `None` when the report has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers, row-number header first when enabled
    pub headers: Vec<String>,
    /// Data rows, each with exactly one cell per header
    pub rows: Vec<Vec<String>>,
    /// Summary entries in display order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub summary: Vec<SummaryRow>,
}

impl ReportTable {
    /// Project a report into display strings.
    ///
    /// Rows run to the longest column; shorter columns render empty cells.
    pub fn from_report(report: &Report) -> Self {
        let headers = build_headers(report);
        let rows = (0..report.row_count())
            .map(|row| build_row(report, row))
            .collect();
        let summary = report
            .summary()
            .iter()
            .map(|(key, value)| SummaryRow {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();

        ReportTable {
            title: (!report.title().is_empty()).then(|| report.title().to_string()),
            headers,
            rows,
            summary,
        }
    }

    /// Widths of each column: the longest of header and cells, in chars
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }
}

fn build_headers(report: &Report) -> Vec<String> {
    let mut headers = Vec::with_capacity(report.columns().len() + 1);
    if report.include_row_numbers() {
        headers.push(ROW_NUMBER_HEADER.to_string());
    }
    headers.extend(report.columns().iter().map(|c| c.header().to_string()));
    headers
}

fn build_row(report: &Report, row: usize) -> Vec<String> {
    let mut cells = Vec::with_capacity(report.columns().len() + 1);
    if report.include_row_numbers() {
        cells.push((row + 1).to_string());
    }
    cells.extend(report.columns().iter().map(|c| c.display_cell(row)));
    cells
}
