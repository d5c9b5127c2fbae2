//! Terminal rendering for CLI output

use console::Style;
use serde::Serialize;
use tabreportlib::ExporterRegistry;

/// One registered exporter, as listed by `tabreport exporters`
#[derive(Debug, Serialize)]
pub struct ExporterRow {
    /// 1-based position, usable with `--exporter`
    pub index: usize,
    pub kind: String,
    pub extension: String,
    pub formatting: bool,
}

/// Collect listing rows in registration order
pub fn exporter_rows(registry: &ExporterRegistry) -> Vec<ExporterRow> {
    registry
        .iter()
        .enumerate()
        .map(|(i, exporter)| ExporterRow {
            index: i + 1,
            kind: exporter.kind().to_string(),
            extension: format!(".{}", exporter.file_extension()),
            formatting: exporter.supports_formatting(),
        })
        .collect()
}

/// Render the exporter listing as an aligned table
pub fn render_exporters(rows: &[ExporterRow]) -> String {
    let header = Style::new().bold();
    let kind = Style::new().cyan();
    let kind_width = rows
        .iter()
        .map(|r| r.kind.len())
        .chain(std::iter::once("Kind".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{}  {}  {}  {}\n",
        header.apply_to(format!("{:>3}", "#")),
        header.apply_to(format!("{:<width$}", "Kind", width = kind_width)),
        header.apply_to(format!("{:<9}", "Extension")),
        header.apply_to("Formatting"),
    );

    for row in rows {
        out.push_str(&format!(
            "{:>3}  {}  {:<9}  {}\n",
            row.index,
            kind.apply_to(format!("{:<width$}", row.kind, width = kind_width)),
            row.extension,
            if row.formatting { "yes" } else { "no" },
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabreportlib::ExportOptions;

    #[test]
    fn test_exporter_rows() {
        let registry = ExporterRegistry::builtin(ExportOptions::new());
        let rows = exporter_rows(&registry);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[2].kind, "XLSX");
        assert_eq!(rows[2].extension, ".xlsx");
        assert!(rows[2].formatting);
        assert!(!rows[0].formatting);
    }

    #[test]
    fn test_render_lists_every_exporter() {
        console::set_colors_enabled(false);
        let registry = ExporterRegistry::builtin(ExportOptions::new());
        let text = render_exporters(&exporter_rows(&registry));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Formatting"));
        assert!(lines[3].contains("XLSX") && lines[3].ends_with("yes"));
    }
}
