//! Spreadsheet exporter, the only built-in backend that renders formats.
//!
//! Sheet layout (0-based rows):
//!
//! - title in row 0 followed by an empty row, when the report has a title
//! - header row, then one row per data row
//! - an empty row, a `Summary` label and one key/value row per entry
//!
//! Numbers are written as numeric cells so the sheet stays computable.

use rust_xlsxwriter::{
    Color as XlsxColor, Format, FormatAlign, FormatBorder, FormatPattern, FormatUnderline,
    Workbook, Worksheet, XlsxError,
};
use std::path::{Path, PathBuf};

use super::{prepare_output, ExportResult, Exporter, FormattingExporter};
use crate::data::{CellValue, SummaryValue};
use crate::error::ExportError;
use crate::format::{
    Alignment, BorderStyle, CellFormat, Color, FontStyle, SummaryFormat, TableFormat,
};
use crate::options::ExportOptions;
use crate::output::ROW_NUMBER_HEADER;
use crate::report::{FormattedReport, Report};

const SHEET_NAME: &str = "Report";
const SUMMARY_LABEL: &str = "Summary";

/// Writes `<filename>.xlsx`, plain or formatted.
#[derive(Debug, Clone, Default)]
pub struct XlsxExporter {
    options: ExportOptions,
}

impl XlsxExporter {
    pub fn new(options: ExportOptions) -> Self {
        XlsxExporter { options }
    }

    fn write(&self, report: &Report, styles: Option<&FormattedReport>) -> ExportResult<PathBuf> {
        let path = prepare_output(&self.options, report, self.file_extension())?;

        write_workbook(&path, report, styles).map_err(|e| xlsx_error(&path, e))?;

        tracing::info!(
            path = %path.display(),
            kind = self.kind(),
            formatted = styles.is_some(),
            "export successful"
        );
        Ok(path)
    }
}

impl Exporter for XlsxExporter {
    fn kind(&self) -> &str {
        "XLSX"
    }

    fn file_extension(&self) -> &str {
        "xlsx"
    }

    fn export(&self, report: &Report) -> ExportResult<PathBuf> {
        self.write(report, None)
    }

    fn as_formatting(&self) -> Option<&dyn FormattingExporter> {
        Some(self)
    }
}

impl FormattingExporter for XlsxExporter {
    fn export_formatted(&self, report: &FormattedReport) -> ExportResult<PathBuf> {
        self.write(report.report(), Some(report))
    }
}

fn xlsx_error(path: &Path, err: XlsxError) -> ExportError {
    match err {
        XlsxError::IoError(io) => ExportError::io(path, io),
        other => ExportError::io(path, std::io::Error::other(other.to_string())),
    }
}

/// Cell position helpers; rust_xlsxwriter rejects out-of-range positions.
fn row_at(row: usize) -> u32 {
    u32::try_from(row).unwrap_or(u32::MAX)
}

fn col_at(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

fn write_workbook(
    path: &Path,
    report: &Report,
    styles: Option<&FormattedReport>,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let width = report.columns().len() + usize::from(report.include_row_numbers());
    let mut row = 0;

    if !report.title().is_empty() {
        write_title(sheet, report.title(), width, styles)?;
        row += 2;
    }

    let table = TableBox {
        first_row: row,
        last_row: row + report.row_count(),
        last_col: width.saturating_sub(1),
    };
    write_header(sheet, row, report, styles, &table)?;
    row += 1;

    for index in 0..report.row_count() {
        write_data_row(sheet, row, index, report, styles, &table)?;
        row += 1;
    }

    if !report.summary().is_empty() {
        write_summary(sheet, row + 1, report, styles.map(|s| s.summary_format()))?;
    }

    sheet.autofit();
    workbook.save(path)?;
    Ok(())
}

fn write_title(
    sheet: &mut Worksheet,
    title: &str,
    width: usize,
    styles: Option<&FormattedReport>,
) -> Result<(), XlsxError> {
    let Some(styles) = styles else {
        sheet.write_string(0, 0, title)?;
        return Ok(());
    };

    let tf = styles.title_format();
    let format = font_format(
        tf.font_style,
        tf.font_size,
        tf.alignment,
        tf.text_color,
        tf.background_color,
    );
    if width > 1 {
        sheet.merge_range(0, 0, 0, col_at(width - 1), title, &format)?;
    } else {
        sheet.write_string_with_format(0, 0, title, &format)?;
    }
    Ok(())
}

fn write_header(
    sheet: &mut Worksheet,
    row: usize,
    report: &Report,
    styles: Option<&FormattedReport>,
    table: &TableBox,
) -> Result<(), XlsxError> {
    let mut headers: Vec<&str> = Vec::with_capacity(report.columns().len() + 1);
    if report.include_row_numbers() {
        headers.push(ROW_NUMBER_HEADER);
    }
    headers.extend(report.columns().iter().map(|c| c.header()));

    for (col, header) in headers.into_iter().enumerate() {
        match styles {
            Some(styles) => {
                let format = with_borders(
                    cell_format(styles.header_format()),
                    table.edges(row, col),
                    styles.table_format(),
                );
                sheet.write_string_with_format(row_at(row), col_at(col), header, &format)?;
            }
            None => {
                sheet.write_string(row_at(row), col_at(col), header)?;
            }
        }
    }
    Ok(())
}

fn write_data_row(
    sheet: &mut Worksheet,
    row: usize,
    index: usize,
    report: &Report,
    styles: Option<&FormattedReport>,
    table: &TableBox,
) -> Result<(), XlsxError> {
    let mut col = 0;

    if report.include_row_numbers() {
        let number = (index + 1) as f64;
        match styles {
            Some(styles) => {
                let format = with_borders(
                    cell_format(styles.row_number_format()),
                    table.edges(row, col),
                    styles.table_format(),
                );
                sheet.write_number_with_format(row_at(row), col_at(col), number, &format)?;
            }
            None => {
                sheet.write_number(row_at(row), col_at(col), number)?;
            }
        }
        col += 1;
    }

    for (column_index, column) in report.columns().iter().enumerate() {
        let cell = column.cell(index);
        match styles {
            Some(styles) => {
                let base = styles
                    .column_format(column_index)
                    .map(cell_format)
                    .unwrap_or_else(Format::new);
                let format =
                    with_borders(base, table.edges(row, col), styles.table_format());
                write_cell_with_format(sheet, row, col, cell.as_ref(), &format)?;
            }
            None => write_cell(sheet, row, col, cell.as_ref())?,
        }
        col += 1;
    }
    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet,
    row: usize,
    col: usize,
    cell: Option<&CellValue>,
) -> Result<(), XlsxError> {
    match cell {
        Some(CellValue::Number(n)) => {
            write_number_cell(sheet, row_at(row), col_at(col), *n, None)?;
        }
        Some(CellValue::Text(s)) => {
            sheet.write_string(row_at(row), col_at(col), s)?;
        }
        None => {}
    }
    Ok(())
}

fn write_cell_with_format(
    sheet: &mut Worksheet,
    row: usize,
    col: usize,
    cell: Option<&CellValue>,
    format: &Format,
) -> Result<(), XlsxError> {
    let (row, col) = (row_at(row), col_at(col));
    match cell {
        Some(CellValue::Number(n)) => {
            write_number_cell(sheet, row, col, *n, Some(format))?;
        }
        Some(CellValue::Text(s)) => {
            sheet.write_string_with_format(row, col, s, format)?;
        }
        // Blank cells still carry borders and fill
        None => {
            sheet.write_blank(row, col, format)?;
        }
    }
    Ok(())
}

/// Numeric cell; infinities and NaN have no spreadsheet encoding and are
/// written as text (`inf`, `-inf`, `NaN`).
fn write_number_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    n: f64,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (n.is_finite(), format) {
        (true, Some(format)) => sheet.write_number_with_format(row, col, n, format)?,
        (true, None) => sheet.write_number(row, col, n)?,
        (false, Some(format)) => sheet.write_string_with_format(row, col, n.to_string(), format)?,
        (false, None) => sheet.write_string(row, col, n.to_string())?,
    };
    Ok(())
}

fn write_summary(
    sheet: &mut Worksheet,
    first_row: usize,
    report: &Report,
    styles: Option<&SummaryFormat>,
) -> Result<(), XlsxError> {
    sheet.write_string(row_at(first_row), 0, SUMMARY_LABEL)?;

    let (key_format, value_format) = match styles {
        Some(sf) => (
            font_format(
                sf.key_style,
                sf.font_size,
                sf.alignment,
                sf.key_color,
                sf.key_background_color,
            ),
            font_format(
                sf.value_style,
                sf.font_size,
                sf.alignment,
                sf.value_color,
                sf.value_background_color,
            )
            .set_num_format(number_pattern(sf.rounding_precision)),
        ),
        None => (Format::new(), Format::new()),
    };

    for (offset, (key, value)) in report.summary().iter().enumerate() {
        let row = row_at(first_row + 1 + offset);
        sheet.write_string_with_format(row, 0, key, &key_format)?;
        match value {
            SummaryValue::Number(n) => {
                write_number_cell(sheet, row, 1, *n, Some(&value_format))?;
            }
            SummaryValue::Text(s) => {
                sheet.write_string_with_format(row, 1, s, &value_format)?;
            }
        }
    }
    Ok(())
}

/// Excel number format showing `precision` decimal places
fn number_pattern(precision: usize) -> String {
    if precision == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(precision))
    }
}

fn cell_format(format: &CellFormat) -> Format {
    font_format(
        format.font_style,
        format.font_size,
        format.alignment,
        format.text_color,
        format.background_color,
    )
}

fn font_format(
    style: FontStyle,
    size: u32,
    alignment: Alignment,
    text: Color,
    background: Color,
) -> Format {
    let mut format = Format::new()
        .set_font_size(size)
        .set_font_color(xlsx_color(text))
        .set_background_color(xlsx_color(background))
        .set_pattern(FormatPattern::Solid)
        .set_align(match alignment {
            Alignment::Left => FormatAlign::Left,
            Alignment::Center => FormatAlign::Center,
            Alignment::Right => FormatAlign::Right,
        });

    if style.is_bold() {
        format = format.set_bold();
    }
    if style.is_italic() {
        format = format.set_italic();
    }
    if style.is_underline() {
        format = format.set_underline(FormatUnderline::Single);
    }
    format
}

fn xlsx_color(color: Color) -> XlsxColor {
    XlsxColor::RGB(color.to_hex())
}

fn xlsx_border(style: BorderStyle) -> FormatBorder {
    match style {
        BorderStyle::Normal => FormatBorder::Thin,
        BorderStyle::Bold => FormatBorder::Thick,
        BorderStyle::Dashed => FormatBorder::Dashed,
    }
}

/// Which edge class each side of a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edges {
    top: Edge,
    bottom: Edge,
    left: Edge,
    right: Edge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Outer,
    Horizontal,
    Vertical,
}

/// Bounds of the bordered table: header row through last data row.
#[derive(Debug, Clone, Copy)]
struct TableBox {
    first_row: usize,
    last_row: usize,
    last_col: usize,
}

impl TableBox {
    fn edges(&self, row: usize, col: usize) -> Edges {
        let horizontal = |outer: bool| if outer { Edge::Outer } else { Edge::Horizontal };
        let vertical = |outer: bool| if outer { Edge::Outer } else { Edge::Vertical };
        Edges {
            top: horizontal(row == self.first_row),
            bottom: horizontal(row == self.last_row),
            left: vertical(col == 0),
            right: vertical(col == self.last_col),
        }
    }
}

fn with_borders(format: Format, edges: Edges, table: &TableFormat) -> Format {
    let side = |edge: Edge| match edge {
        Edge::Outer => (table.outer_border_style, table.outer_border_color),
        Edge::Horizontal => (table.horizontal_border_style, table.horizontal_border_color),
        Edge::Vertical => (table.vertical_border_style, table.vertical_border_color),
    };

    let (top, top_color) = side(edges.top);
    let (bottom, bottom_color) = side(edges.bottom);
    let (left, left_color) = side(edges.left);
    let (right, right_color) = side(edges.right);

    format
        .set_border_top(xlsx_border(top))
        .set_border_top_color(xlsx_color(top_color))
        .set_border_bottom(xlsx_border(bottom))
        .set_border_bottom_color(xlsx_color(bottom_color))
        .set_border_left(xlsx_border(left))
        .set_border_left_color(xlsx_color(left_color))
        .set_border_right(xlsx_border(right))
        .set_border_right_color(xlsx_color(right_color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{FormatReportBuilder, ReportBuilder, ReportDraft};
    use crate::calc::{Calculation, SummaryKind};
    use crate::data::Summary;
    use crate::format::TitleFormat;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    const SHEET_XML: &str = "xl/worksheets/sheet1.xml";

    fn is_zip(path: &Path) -> bool {
        fs::read(path).map(|b| b.starts_with(b"PK")).unwrap_or(false)
    }

    /// Read one XML part out of the written workbook
    fn read_part(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        let mut xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    /// The `<c r="..">..</c>` element of one cell, if written
    fn cell_xml<'a>(sheet: &'a str, cell: &str) -> Option<&'a str> {
        let start = sheet.find(&format!("<c r=\"{}\"", cell))?;
        let rest = &sheet[start..];
        let end = rest.find("</c>").map(|i| i + 4).unwrap_or(rest.len());
        Some(&rest[..end])
    }

    #[test]
    fn test_plain_export() {
        let mut b = ReportBuilder::new("plain_sheet").unwrap();
        b.set_title("Plain");
        b.set_include_row_numbers(true);
        b.add_text_column("name", vec!["a".into(), "b".into()]);
        b.add_number_column("value", vec![1.0]);
        b.add_summary_entry("count", 2);

        let dir = tempdir().unwrap();
        let exporter = XlsxExporter::new(ExportOptions::new().output_dir(dir.path()));
        let path = exporter.export(&b.build().unwrap()).unwrap();

        assert_eq!(path, dir.path().join("plain_sheet.xlsx"));
        assert!(is_zip(&path));

        // Title in row 1, header in row 3, data from row 4
        let sheet = read_part(&path, SHEET_XML);
        assert!(cell_xml(&sheet, "A3").unwrap().contains("t=\"s\""));
        for (cell, value) in [("A4", "<v>1</v>"), ("A5", "<v>2</v>"), ("C4", "<v>1</v>")] {
            let xml = cell_xml(&sheet, cell).unwrap();
            assert!(xml.contains(value), "{cell}: {xml}");
            assert!(!xml.contains("t=\"s\""), "{cell} should be numeric: {xml}");
        }
        assert!(cell_xml(&sheet, "C5").is_none());
    }

    #[test]
    fn test_formatted_export() {
        let mut b = FormatReportBuilder::new("styled").unwrap();
        b.set_title("Styled");
        b.set_title_format(TitleFormat::new().font_style(FontStyle::BoldItalic));
        b.set_table_format(TableFormat::all_borders(BorderStyle::Dashed, Color::BLUE));
        b.add_number_column("a", vec![1.0, 2.0]);
        b.add_formatted_text_column(
            "b",
            vec!["x".into()],
            CellFormat::new().background_color(Color::YELLOW),
        );
        b.add_summary_entry("mean", 1.5);
        b.add_summary_entry("note", "ok");

        let dir = tempdir().unwrap();
        let exporter = XlsxExporter::new(ExportOptions::new().output_dir(dir.path()));
        let path = exporter.export_formatted(&b.build().unwrap()).unwrap();
        assert!(is_zip(&path));

        let sheet = read_part(&path, SHEET_XML);
        assert!(sheet.contains("<mergeCell ref=\"A1:B1\""));
        let number = cell_xml(&sheet, "A4").unwrap();
        assert!(number.contains(" s=\"") && number.contains("<v>1</v>"));
        // Missing text cell is a styled blank
        assert!(cell_xml(&sheet, "B5").unwrap().contains(" s=\""));

        let styles = read_part(&path, "xl/styles.xml");
        assert!(styles.contains("style=\"dashed\""));
        assert!(styles.contains("FFFF00"));
    }

    #[test]
    fn test_non_finite_numbers_written_as_text() {
        let mut b = ReportBuilder::new("overflow").unwrap();
        b.add_number_column("a", vec![1e200]);
        b.add_number_column("b", vec![1e200]);
        b.add_calculated_column_from("p", &[0, 1], Calculation::Prod)
            .unwrap();
        b.add_summary_from_column("total", 2, SummaryKind::Sum, |_| true)
            .unwrap();

        let dir = tempdir().unwrap();
        let exporter = XlsxExporter::new(ExportOptions::new().output_dir(dir.path()));
        let path = exporter.export(&b.build().unwrap()).unwrap();

        let sheet = read_part(&path, SHEET_XML);
        assert!(!sheet.contains("<v>inf</v>"));
        assert!(cell_xml(&sheet, "C2").unwrap().contains("t=\"s\""));
        // Summary value sits below the label row
        assert!(cell_xml(&sheet, "B5").unwrap().contains("t=\"s\""));
        assert!(read_part(&path, "xl/sharedStrings.xml").contains(">inf</t>"));
    }

    #[test]
    fn test_nan_in_formatted_column() {
        let mut b = FormatReportBuilder::new("nan_sheet").unwrap();
        b.add_formatted_number_column("x", vec![f64::NAN, 2.0], CellFormat::new());

        let dir = tempdir().unwrap();
        let exporter = XlsxExporter::new(ExportOptions::new().output_dir(dir.path()));
        let path = exporter.export_formatted(&b.build().unwrap()).unwrap();

        let sheet = read_part(&path, SHEET_XML);
        assert!(!sheet.contains("<v>NaN</v>"));
        let nan = cell_xml(&sheet, "A2").unwrap();
        assert!(nan.contains("t=\"s\"") && nan.contains(" s=\""));
        assert!(cell_xml(&sheet, "A3").unwrap().contains("<v>2</v>"));
    }

    #[test]
    fn test_single_column_title_is_not_merged() {
        let mut b = FormatReportBuilder::new("narrow").unwrap();
        b.set_title("Narrow");
        b.add_number_column("only", vec![1.0]);

        let dir = tempdir().unwrap();
        let exporter = XlsxExporter::new(ExportOptions::new().output_dir(dir.path()));
        assert!(exporter.export_formatted(&b.build().unwrap()).is_ok());
    }

    #[test]
    fn test_empty_report_rejected() {
        let dir = tempdir().unwrap();
        let exporter = XlsxExporter::new(ExportOptions::new().output_dir(dir.path()));
        let empty = Report::new("empty".into(), String::new(), vec![], false, Summary::new());
        assert!(matches!(exporter.export(&empty), Err(ExportError::EmptyReport)));
        assert!(!dir.path().join("empty.xlsx").exists());
    }

    #[test]
    fn test_table_edges() {
        let table = TableBox {
            first_row: 2,
            last_row: 4,
            last_col: 2,
        };
        assert_eq!(
            table.edges(2, 0),
            Edges {
                top: Edge::Outer,
                bottom: Edge::Horizontal,
                left: Edge::Outer,
                right: Edge::Vertical,
            }
        );
        assert_eq!(
            table.edges(3, 1),
            Edges {
                top: Edge::Horizontal,
                bottom: Edge::Horizontal,
                left: Edge::Vertical,
                right: Edge::Vertical,
            }
        );
        assert_eq!(table.edges(4, 2).bottom, Edge::Outer);
        assert_eq!(table.edges(4, 2).right, Edge::Outer);
    }

    #[test]
    fn test_number_pattern() {
        assert_eq!(number_pattern(0), "0");
        assert_eq!(number_pattern(2), "0.00");
        assert_eq!(number_pattern(4), "0.0000");
    }
}
