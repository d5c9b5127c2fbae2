//! CSV exporter.

use std::path::{Path, PathBuf};

use super::{prepare_output, ExportResult, Exporter};
use crate::error::ExportError;
use crate::options::ExportOptions;
use crate::output::ReportTable;
use crate::report::Report;

/// Writes `<filename>.csv`.
///
/// Record layout: title (when set), header, data rows, then a `Summary`
/// record followed by one `key,value` record per entry. Record lengths
/// vary, so the writer runs in flexible mode.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    options: ExportOptions,
}

impl CsvExporter {
    pub fn new(options: ExportOptions) -> Self {
        CsvExporter { options }
    }
}

impl Exporter for CsvExporter {
    fn kind(&self) -> &str {
        "CSV"
    }

    fn file_extension(&self) -> &str {
        "csv"
    }

    fn export(&self, report: &Report) -> ExportResult<PathBuf> {
        let path = prepare_output(&self.options, report, self.file_extension())?;
        let table = ReportTable::from_report(report);

        write_table(&path, &table).map_err(|e| ExportError::io(&path, e))?;

        tracing::info!(path = %path.display(), kind = self.kind(), "export successful");
        Ok(path)
    }
}

fn write_table(path: &Path, table: &ReportTable) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

    if let Some(title) = &table.title {
        writer.write_record([title])?;
    }
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    if !table.summary.is_empty() {
        writer.write_record(["Summary"])?;
        for entry in &table.summary {
            writer.write_record([&entry.key, &entry.value])?;
        }
    }

    writer.flush()?;
    Ok(())
}
