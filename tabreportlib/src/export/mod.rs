//! Exporters: turn a built report into a file.
//!
//! This module is the last stage of the pipeline. It provides:
//!
//! - **Exporter**: the contract every output backend implements
//! - **FormattingExporter**: backends that also render a [`FormattedReport`]
//! - **ExporterRegistry**: the set of backends available at runtime
//! - **export_report**: dispatch of a plain or formatted payload
//!
//! Built-in backends:
//!
//! | Kind | Extension | Formatting |
//! |------|-----------|------------|
//! | TXT  | `.txt`    | no         |
//! | CSV  | `.csv`    | no         |
//! | XLSX | `.xlsx`   | yes        |
//! | JSON | `.json`   | no         |
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::builder::{ReportBuilder, ReportDraft};
//! use tabreportlib::export::{export_report, ExporterRegistry, ReportPayload};
//! use tabreportlib::ExportOptions;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let registry = ExporterRegistry::builtin(ExportOptions::new().output_dir(dir.path()));
//!
//! let mut builder = ReportBuilder::new("totals").unwrap();
//! builder.add_number_column("amount", vec![1.0, 2.0]);
//! let payload = ReportPayload::Plain(builder.build().unwrap());
//!
//! let csv = registry.get("csv").unwrap();
//! let path = export_report(csv, &payload).unwrap();
//! assert!(path.ends_with("totals.csv"));
//! ```

pub mod csv;
pub mod json;
pub mod text;
pub mod xlsx;

pub use self::csv::CsvExporter;
pub use json::JsonExporter;
pub use text::TextExporter;
pub use xlsx::XlsxExporter;

use std::fs;
use std::path::PathBuf;

use crate::error::ExportError;
use crate::options::ExportOptions;
use crate::report::{FormattedReport, Report};

/// Result type for exporter operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// An output backend.
pub trait Exporter {
    /// Short identifier, e.g. `"CSV"`
    fn kind(&self) -> &str;

    /// Extension appended to the report filename, without the dot
    fn file_extension(&self) -> &str;

    /// Write `report` and return the path of the written file.
    ///
    /// Fails with [`ExportError::EmptyReport`] before touching the
    /// filesystem when the report has no columns.
    fn export(&self, report: &Report) -> ExportResult<PathBuf>;

    /// Formatting capability, if this backend has it
    fn as_formatting(&self) -> Option<&dyn FormattingExporter> {
        None
    }

    /// Check if this backend renders formatted reports
    fn supports_formatting(&self) -> bool {
        self.as_formatting().is_some()
    }
}

/// A backend that also renders section and column formats.
pub trait FormattingExporter: Exporter {
    /// Write `report` with its formats applied and return the written path.
    fn export_formatted(&self, report: &FormattedReport) -> ExportResult<PathBuf>;
}

/// A report handed to [`export_report`].
#[derive(Debug, Clone)]
pub enum ReportPayload {
    Plain(Report),
    Formatted(FormattedReport),
}

impl ReportPayload {
    /// The content, formats aside
    pub fn report(&self) -> &Report {
        match self {
            ReportPayload::Plain(report) => report,
            ReportPayload::Formatted(formatted) => formatted.report(),
        }
    }
}

/// Export `payload` with `exporter`.
///
/// A formatted payload goes through the formatting path when the exporter
/// has one; otherwise its plain content is exported and a warning logged.
pub fn export_report(exporter: &dyn Exporter, payload: &ReportPayload) -> ExportResult<PathBuf> {
    match payload {
        ReportPayload::Plain(report) => exporter.export(report),
        ReportPayload::Formatted(formatted) => match exporter.as_formatting() {
            Some(formatting) => formatting.export_formatted(formatted),
            None => {
                tracing::warn!(
                    kind = exporter.kind(),
                    "exporter does not support formatting, exporting plain report"
                );
                exporter.export(formatted.report())
            }
        },
    }
}

/// Exporters available at runtime.
///
/// Populated once at startup and read-only afterwards.
#[derive(Default)]
pub struct ExporterRegistry {
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in exporter, sharing `options`
    pub fn builtin(options: ExportOptions) -> Self {
        Self::new()
            .register(TextExporter::new(options.clone()))
            .register(CsvExporter::new(options.clone()))
            .register(XlsxExporter::new(options.clone()))
            .register(JsonExporter::new(options))
    }

    /// Builder: add an exporter
    pub fn register(mut self, exporter: impl Exporter + 'static) -> Self {
        self.exporters.push(Box::new(exporter));
        self
    }

    /// Exporters in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Exporter> {
        self.exporters.iter().map(|e| e.as_ref())
    }

    /// Number of registered exporters
    pub fn len(&self) -> usize {
        self.exporters.len()
    }

    /// Check if no exporter is registered
    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }

    /// Look up an exporter by kind, ignoring case
    pub fn get(&self, kind: &str) -> Option<&dyn Exporter> {
        self.iter().find(|e| e.kind().eq_ignore_ascii_case(kind))
    }

    /// Look up an exporter by its 1-based position
    pub fn by_index(&self, index: usize) -> Option<&dyn Exporter> {
        index
            .checked_sub(1)
            .and_then(|i| self.exporters.get(i))
            .map(|e| e.as_ref())
    }

    /// Look up an exporter by kind or by 1-based position
    pub fn select(&self, selector: &str) -> Option<&dyn Exporter> {
        match selector.trim().parse::<usize>() {
            Ok(index) => self.by_index(index),
            Err(_) => self.get(selector.trim()),
        }
    }
}

impl std::fmt::Debug for ExporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.exporters.iter().map(|e| e.kind()))
            .finish()
    }
}

/// Reject an empty report and resolve (creating directories if allowed)
/// the output path for it.
pub(crate) fn prepare_output(
    options: &ExportOptions,
    report: &Report,
    extension: &str,
) -> ExportResult<PathBuf> {
    if report.is_empty() {
        return Err(ExportError::EmptyReport);
    }
    if options.create_dirs && !options.output_dir.as_os_str().is_empty() {
        fs::create_dir_all(&options.output_dir)
            .map_err(|e| ExportError::io(&options.output_dir, e))?;
    }
    Ok(options.path_for(report.filename(), extension))
}
