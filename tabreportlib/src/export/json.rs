//! JSON exporter: the table projection as a pretty-printed document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::{prepare_output, ExportResult, Exporter};
use crate::error::ExportError;
use crate::options::ExportOptions;
use crate::output::ReportTable;
use crate::report::Report;

/// Writes `<filename>.json` holding title, headers, rows and summary.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    options: ExportOptions,
}

impl JsonExporter {
    pub fn new(options: ExportOptions) -> Self {
        JsonExporter { options }
    }
}

impl Exporter for JsonExporter {
    fn kind(&self) -> &str {
        "JSON"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn export(&self, report: &Report) -> ExportResult<PathBuf> {
        let path = prepare_output(&self.options, report, self.file_extension())?;
        let table = ReportTable::from_report(report);

        let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &table).map_err(|e| {
            if e.is_io() {
                ExportError::io(&path, e)
            } else {
                ExportError::Serialize(e.to_string())
            }
        })?;
        writeln!(out)
            .and_then(|_| out.flush())
            .map_err(|e| ExportError::io(&path, e))?;

        tracing::info!(path = %path.display(), kind = self.kind(), "export successful");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ReportBuilder, ReportDraft};
    use crate::data::Summary;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_export_round_trips_table() {
        let mut b = ReportBuilder::new("stock").unwrap();
        b.set_title("Stock");
        b.add_text_column("item", vec!["bolt".into(), "nut".into()]);
        b.add_number_column("qty", vec![40.0, 12.5]);
        b.add_summary_entry("items", 2);
        let report = b.build().unwrap();

        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(ExportOptions::new().output_dir(dir.path()));
        let path = exporter.export(&report).unwrap();

        let parsed: ReportTable = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed, ReportTable::from_report(&report));
        assert_eq!(parsed.rows[1], ["nut", "12.5"]);
    }

    #[test]
    fn test_empty_report_rejected() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(ExportOptions::new().output_dir(dir.path()));
        let empty = Report::new("empty".into(), String::new(), vec![], false, Summary::new());
        assert!(matches!(exporter.export(&empty), Err(ExportError::EmptyReport)));
        assert!(!dir.path().join("empty.json").exists());
    }
}
