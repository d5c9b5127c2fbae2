//! # tabreportlib
//!
//! A library for building flat tabular reports and exporting them through
//! interchangeable backends.
//!
//! ## Overview
//!
//! A report is a title, an ordered list of typed columns, an optional
//! leading row-number column and an ordered summary map. Reports are
//! assembled with a mutable builder, frozen into an immutable snapshot and
//! handed to one exporter:
//!
//! - **Data**: text, number and calculated columns plus summary values
//! - **Calculations**: ADD/SUB/PROD/DIV columns and SUM/AVERAGE/COUNT figures
//! - **Builders**: [`ReportBuilder`] for plain reports, [`FormatReportBuilder`]
//!   when title, header, borders, columns and summary carry formats
//! - **Sources**: populate columns from any [`TabularSource`], such as a CSV file
//! - **Exporters**: TXT, CSV, XLSX and JSON behind one [`Exporter`] contract,
//!   selected through an explicit [`ExporterRegistry`]
//!
//! ## Features
//!
//! - **Typed columns**: a column's variant is fixed when it is created
//! - **Atomic builder operations**: a failed call leaves the builder unchanged
//! - **Snapshot semantics**: built reports never observe later builder changes
//! - **Formatting fallback**: formatted reports degrade to plain output on
//!   backends without formatting support
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::{
//!     export_report, Calculation, ExportOptions, ExporterRegistry, ReportBuilder, ReportDraft,
//!     ReportPayload, SummaryKind,
//! };
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//!
//! let mut builder = ReportBuilder::new("orders").unwrap();
//! builder.set_title("Orders");
//! builder.set_include_row_numbers(true);
//! builder.add_text_column("item", vec!["bolt".into(), "nut".into()]);
//! builder.add_number_column("qty", vec![40.0, 100.0]);
//! builder.add_number_column("price", vec![0.25, 0.1]);
//! builder
//!     .add_calculated_column_from("total", &[1, 2], Calculation::Prod)
//!     .unwrap();
//! builder
//!     .add_summary_from_column("Grand total", 3, SummaryKind::Sum, |_| true)
//!     .unwrap();
//!
//! let report = builder.build().unwrap();
//!
//! let registry = ExporterRegistry::builtin(ExportOptions::new().output_dir(dir.path()));
//! let exporter = registry.get("txt").unwrap();
//! let path = export_report(exporter, &ReportPayload::Plain(report)).unwrap();
//!
//! let text = fs::read_to_string(path).unwrap();
//! assert!(text.contains("Grand total: 20"));
//! ```

pub mod builder;
pub mod calc;
pub mod data;
pub mod error;
pub mod export;
pub mod format;
pub mod options;
pub mod output;
pub mod report;
pub mod source;

pub use builder::{validate_filename, FormatReportBuilder, ReportBuilder, ReportCore, ReportDraft};
pub use calc::{compute_column, compute_summary, compute_summary_filtered, Calculation, SummaryKind};
pub use data::{CellValue, Column, ColumnData, ColumnKind, Summary, SummaryValue};
pub use error::{ExportError, ReportError};
pub use export::{
    export_report, CsvExporter, ExportResult, Exporter, ExporterRegistry, FormattingExporter,
    JsonExporter, ReportPayload, TextExporter, XlsxExporter,
};
pub use format::{
    Alignment, BorderStyle, CellFormat, Color, FontStyle, SummaryFormat, TableFormat, TitleFormat,
};
pub use options::ExportOptions;
pub use output::{ReportTable, SummaryRow};
pub use report::{FormattedReport, Report};
pub use source::{RecordSet, SourceType, SourceValue, TabularSource};

/// Result type for tabreportlib operations
pub type Result<T> = std::result::Result<T, ReportError>;
