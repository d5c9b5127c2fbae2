//! State shared by both report builders.

use crate::builder::validate_filename;
use crate::calc::{compute_column, compute_summary_filtered, Calculation, SummaryKind};
use crate::data::{CellValue, Column, Summary};
use crate::error::ReportError;
use crate::source::{SourceType, SourceValue, TabularSource};
use crate::Result;

/// Filename, title, row-number flag, columns and summary of a report draft.
#[derive(Debug, Clone)]
pub struct ReportCore {
    filename: String,
    title: String,
    include_row_numbers: bool,
    columns: Vec<Column>,
    summary: Summary,
}

impl ReportCore {
    /// Create an empty draft. Fails with [`ReportError::InvalidFilename`].
    pub fn new(filename: &str) -> Result<Self> {
        validate_filename(filename)?;
        Ok(ReportCore {
            filename: filename.to_string(),
            title: String::new(),
            include_row_numbers: false,
            columns: Vec::new(),
            summary: Summary::new(),
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, name: &str) -> Result<()> {
        validate_filename(name)?;
        self.filename = name.to_string();
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn include_row_numbers(&self) -> bool {
        self.include_row_numbers
    }

    pub fn set_include_row_numbers(&mut self, include: bool) {
        self.include_row_numbers = include;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn extend_columns(&mut self, columns: Vec<Column>) {
        self.columns.extend(columns);
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn remove_column_at(&mut self, index: usize) -> Option<Column> {
        (index < self.columns.len()).then(|| self.columns.remove(index))
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn summary_mut(&mut self) -> &mut Summary {
        &mut self.summary
    }

    /// Fail with [`ReportError::EmptyReport`] when there are no columns
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ReportError::EmptyReport);
        }
        Ok(())
    }

    /// Compute a calculated column whose sources are existing columns.
    pub fn calculated_from_indices(
        &self,
        header: String,
        indices: &[usize],
        op: Calculation,
    ) -> Result<Column> {
        let sources = indices
            .iter()
            .map(|&index| self.number_column(index))
            .collect::<Result<Vec<_>>>()?;
        calculated_column(header, &sources, op)
    }

    /// Aggregate one column with the summary engine.
    pub fn summarize_column<P>(&self, index: usize, kind: SummaryKind, predicate: P) -> Result<f64>
    where
        P: Fn(&CellValue) -> bool,
    {
        let column = self.column_at(index)?;
        if !column.is_numeric() && !kind.accepts_text() {
            return Err(ReportError::UnsupportedSummary {
                kind,
                header: column.header().to_string(),
            });
        }
        Ok(compute_summary_filtered(&column.values(), kind, predicate))
    }

    fn column_at(&self, index: usize) -> Result<&Column> {
        self.columns
            .get(index)
            .ok_or(ReportError::ColumnIndexOutOfRange {
                index,
                count: self.columns.len(),
            })
    }

    fn number_column(&self, index: usize) -> Result<&[f64]> {
        let column = self.column_at(index)?;
        column.numbers().ok_or_else(|| {
            ReportError::UnsupportedColumnType(format!(
                "column {} ('{}') is not numeric",
                index,
                column.header()
            ))
        })
    }
}

/// Run the calculation engine and wrap its result as a column.
pub(crate) fn calculated_column(
    header: String,
    sources: &[&[f64]],
    op: Calculation,
) -> Result<Column> {
    let values = compute_column(sources, op)?;
    Ok(Column::calculated(header, values, op))
}

/// Pair headers with content, failing before anything is kept.
pub(crate) fn columns_from_lists(
    headers: Vec<String>,
    content: Vec<Vec<CellValue>>,
) -> Result<Vec<Column>> {
    if headers.len() != content.len() {
        return Err(ReportError::LengthMismatch {
            headers: headers.len(),
            columns: content.len(),
        });
    }
    headers
        .into_iter()
        .zip(content)
        .map(|(header, values)| Column::from_values(header, values))
        .collect()
}

/// Drain a tabular source into columns.
///
/// Declared column types win; undeclared columns are numeric only when
/// every value is a number. Anything else becomes text, with nulls as empty
/// strings. Short rows are padded with nulls.
pub(crate) fn columns_from_source<S>(source: &mut S) -> Vec<Column>
where
    S: TabularSource + ?Sized,
{
    let names = source.column_names();
    let types = source.column_types();
    let mut cells: Vec<Vec<SourceValue>> = vec![Vec::new(); names.len()];

    while let Some(row) = source.next_row() {
        let mut row = row.into_iter();
        for column in cells.iter_mut() {
            column.push(row.next().unwrap_or(SourceValue::Null));
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (name, values))| {
            let declared = types.as_ref().and_then(|t| t.get(i).copied());
            source_column(name, values, declared)
        })
        .collect();

    tracing::debug!(
        columns = columns.len(),
        rows = columns.first().map(Column::len).unwrap_or(0),
        "populated columns from tabular source"
    );
    columns
}

fn source_column(name: String, values: Vec<SourceValue>, declared: Option<SourceType>) -> Column {
    let wants_number = match declared {
        Some(SourceType::Number) | None => true,
        Some(SourceType::Text) | Some(SourceType::Other) => false,
    };

    if wants_number && !values.is_empty() {
        let numbers: Option<Vec<f64>> = values.iter().map(SourceValue::as_number).collect();
        if let Some(numbers) = numbers {
            return Column::number(name, numbers);
        }
    }

    Column::text(name, values.into_iter().map(SourceValue::into_text).collect())
}
