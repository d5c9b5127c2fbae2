//! Builder for formatted reports.

use super::plain::snapshot;
use super::report_core::{calculated_column, columns_from_lists, columns_from_source};
use super::{ReportCore, ReportDraft};
use crate::calc::Calculation;
use crate::data::{CellValue, Column};
use crate::format::{CellFormat, SummaryFormat, TableFormat, TitleFormat};
use crate::report::FormattedReport;
use crate::source::TabularSource;
use crate::Result;

/// Accumulates columns, summary entries and section formats into a
/// [`FormattedReport`].
///
/// Formats are independent of content: they can be set before or after
/// columns are added.
#[derive(Debug, Clone)]
pub struct FormatReportBuilder {
    core: ReportCore,
    title_format: TitleFormat,
    table_format: TableFormat,
    header_format: CellFormat,
    row_number_format: CellFormat,
    summary_format: SummaryFormat,
}

impl FormatReportBuilder {
    /// Create a builder with default formats. Fails with
    /// [`ReportError::InvalidFilename`](crate::error::ReportError::InvalidFilename).
    pub fn new(filename: &str) -> Result<Self> {
        Ok(FormatReportBuilder {
            core: ReportCore::new(filename)?,
            title_format: TitleFormat::default(),
            table_format: TableFormat::default(),
            header_format: CellFormat::default(),
            row_number_format: CellFormat::default(),
            summary_format: SummaryFormat::default(),
        })
    }

    pub fn title_format(&self) -> &TitleFormat {
        &self.title_format
    }

    pub fn set_title_format(&mut self, format: TitleFormat) {
        self.title_format = format;
    }

    pub fn table_format(&self) -> &TableFormat {
        &self.table_format
    }

    pub fn set_table_format(&mut self, format: TableFormat) {
        self.table_format = format;
    }

    pub fn header_format(&self) -> &CellFormat {
        &self.header_format
    }

    pub fn set_header_format(&mut self, format: CellFormat) {
        self.header_format = format;
    }

    pub fn row_number_format(&self) -> &CellFormat {
        &self.row_number_format
    }

    pub fn set_row_number_format(&mut self, format: CellFormat) {
        self.row_number_format = format;
    }

    pub fn summary_format(&self) -> &SummaryFormat {
        &self.summary_format
    }

    pub fn set_summary_format(&mut self, format: SummaryFormat) {
        self.summary_format = format;
    }

    /// Append a column with a format, inferring its type from the first value
    pub fn add_formatted_column(
        &mut self,
        header: impl Into<String>,
        values: Vec<CellValue>,
        format: CellFormat,
    ) -> Result<()> {
        let column = Column::from_values(header, values)?.with_format(format);
        self.core.push_column(column);
        Ok(())
    }

    /// Append a formatted text column
    pub fn add_formatted_text_column(
        &mut self,
        header: impl Into<String>,
        values: Vec<String>,
        format: CellFormat,
    ) {
        self.core
            .push_column(Column::text(header, values).with_format(format));
    }

    /// Append a formatted number column
    pub fn add_formatted_number_column(
        &mut self,
        header: impl Into<String>,
        values: Vec<f64>,
        format: CellFormat,
    ) {
        self.core
            .push_column(Column::number(header, values).with_format(format));
    }

    /// Append columns sharing one format. Atomic, like
    /// [`ReportDraft::add_columns`].
    pub fn add_formatted_columns(
        &mut self,
        headers: Vec<String>,
        content: Vec<Vec<CellValue>>,
        format: CellFormat,
    ) -> Result<()> {
        let columns = columns_from_lists(headers, content)?;
        self.core.extend_columns(
            columns
                .into_iter()
                .map(|c| c.with_format(format.clone()))
                .collect(),
        );
        Ok(())
    }

    /// Append a formatted calculated column
    pub fn add_formatted_calculated_column(
        &mut self,
        header: impl Into<String>,
        sources: &[&[f64]],
        op: Calculation,
        format: CellFormat,
    ) -> Result<()> {
        let column = calculated_column(header.into(), sources, op)?.with_format(format);
        self.core.push_column(column);
        Ok(())
    }

    /// Append one column per source column, all sharing `format`. Never fails.
    pub fn populate_from_source_formatted<S>(&mut self, source: &mut S, format: CellFormat)
    where
        S: TabularSource + ?Sized,
    {
        let columns = columns_from_source(source)
            .into_iter()
            .map(|c| c.with_format(format.clone()))
            .collect();
        self.core.extend_columns(columns);
    }

    /// Replace the format of the column at `index`, keeping its header and
    /// content. Out-of-range indices are ignored.
    pub fn set_column_format_at(&mut self, index: usize, format: CellFormat) {
        if let Some(column) = self.core.columns_mut().get_mut(index) {
            column.set_format(format);
        }
    }

    /// Snapshot the current state into an immutable formatted report.
    ///
    /// Fails with [`ReportError::EmptyReport`](crate::error::ReportError::EmptyReport)
    /// when no column was added.
    /// Columns without a format get the default [`CellFormat`].
    pub fn build(&self) -> Result<FormattedReport> {
        self.core.ensure_not_empty()?;

        let mut core = self.core.clone();
        for column in core.columns_mut() {
            if column.format().is_none() {
                column.set_format(CellFormat::default());
            }
        }

        tracing::debug!(
            filename = core.filename(),
            columns = core.columns().len(),
            "built formatted report"
        );
        Ok(FormattedReport::new(
            snapshot(&core),
            self.title_format.clone(),
            self.table_format.clone(),
            self.header_format.clone(),
            self.row_number_format.clone(),
            self.summary_format.clone(),
        ))
    }
}

impl ReportDraft for FormatReportBuilder {
    fn core(&self) -> &ReportCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ReportCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::format::{Alignment, Color, FontStyle};
    use crate::source::{RecordSet, SourceValue};

    fn three_columns() -> FormatReportBuilder {
        let mut b = FormatReportBuilder::new("formatted").unwrap();
        b.add_number_column("a", vec![1.0]);
        b.add_text_column("b", vec!["x".into()]);
        b.add_formatted_number_column("c", vec![2.0], CellFormat::new().font_size(9));
        b
    }

    #[test]
    fn test_set_column_format_out_of_range_is_noop() {
        let mut b = three_columns();
        let before: Vec<Column> = b.columns().to_vec();
        b.set_column_format_at(99, CellFormat::new().font_style(FontStyle::Bold));
        assert_eq!(b.columns(), before.as_slice());
    }

    #[test]
    fn test_set_column_format_replaces_only_format() {
        let mut b = three_columns();
        let format = CellFormat::new()
            .alignment(Alignment::Right)
            .text_color(Color::RED);
        b.set_column_format_at(1, format.clone());

        let column = b.column(1).unwrap();
        assert_eq!(column.header(), "b");
        assert_eq!(column.texts().unwrap(), ["x"]);
        assert_eq!(column.format(), Some(&format));
    }

    #[test]
    fn test_build_defaults_column_formats() {
        let report = three_columns().build().unwrap();
        assert_eq!(report.column_format(0), Some(&CellFormat::default()));
        assert_eq!(report.column_format(2).unwrap().font_size, 9);
        assert_eq!(report.title_format(), &TitleFormat::default());
    }

    #[test]
    fn test_build_empty_fails() {
        let b = FormatReportBuilder::new("formatted").unwrap();
        assert_eq!(b.build().unwrap_err(), ReportError::EmptyReport);
    }

    #[test]
    fn test_section_formats_are_carried() {
        let mut b = three_columns();
        b.set_title_format(TitleFormat::new().font_size(30));
        b.set_summary_format(SummaryFormat::new().rounding_precision(4));
        b.set_header_format(CellFormat::new().background_color(Color::LIGHT_GRAY));

        let report = b.build().unwrap();
        assert_eq!(report.title_format().font_size, 30);
        assert_eq!(report.summary_format().rounding_precision, 4);
        assert_eq!(report.header_format().background_color, Color::LIGHT_GRAY);
    }

    #[test]
    fn test_formatted_columns_and_source() {
        let mut b = FormatReportBuilder::new("formatted").unwrap();
        let bold = CellFormat::new().font_style(FontStyle::Bold);
        b.add_formatted_columns(
            vec!["a".into(), "b".into()],
            vec![vec![1.0.into()], vec!["x".into()]],
            bold.clone(),
        )
        .unwrap();

        let mut source = RecordSet::new(vec!["s".into()]);
        source.push_row(vec![SourceValue::Number(3.0)]);
        b.populate_from_source_formatted(&mut source, bold.clone());

        b.add_formatted_calculated_column("sum", &[&[1.0], &[2.0]], Calculation::Add, bold.clone())
            .unwrap();

        assert_eq!(b.column_count(), 4);
        assert!(b.columns().iter().all(|c| c.format() == Some(&bold)));
        assert_eq!(b.column(3).unwrap().numbers().unwrap(), [3.0]);
    }
}
