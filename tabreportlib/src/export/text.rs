//! Plain-text exporter: space-padded columns.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{prepare_output, ExportResult, Exporter};
use crate::error::ExportError;
use crate::options::ExportOptions;
use crate::output::ReportTable;
use crate::report::Report;

/// Gap between columns, in spaces
const COLUMN_GAP: usize = 4;

/// Writes `<filename>.txt`: title, padded table, then a `Summary:` section.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    options: ExportOptions,
}

impl TextExporter {
    pub fn new(options: ExportOptions) -> Self {
        TextExporter { options }
    }
}

impl Exporter for TextExporter {
    fn kind(&self) -> &str {
        "TXT"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }

    fn export(&self, report: &Report) -> ExportResult<PathBuf> {
        let path = prepare_output(&self.options, report, self.file_extension())?;
        let table = ReportTable::from_report(report);

        write_table(&path, &table).map_err(|e| ExportError::io(&path, e))?;

        tracing::info!(path = %path.display(), kind = self.kind(), "export successful");
        Ok(path)
    }
}

fn write_table(path: &Path, table: &ReportTable) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    render(&mut out, table)?;
    out.flush()
}

/// Render the table as padded text.
pub fn render<W: Write>(out: &mut W, table: &ReportTable) -> std::io::Result<()> {
    let widths = table.column_widths();

    if let Some(title) = &table.title {
        writeln!(out, "{}", title)?;
        writeln!(out)?;
    }

    write_row(out, &table.headers, &widths)?;
    for row in &table.rows {
        write_row(out, row, &widths)?;
    }

    if !table.summary.is_empty() {
        writeln!(out)?;
        writeln!(out, "Summary:")?;
        for entry in &table.summary {
            writeln!(out, "{}: {}", entry.key, entry.value)?;
        }
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    for (cell, width) in cells.iter().zip(widths) {
        write!(out, "{:<width$}", cell, width = width + COLUMN_GAP)?;
    }
    writeln!(out)
}
