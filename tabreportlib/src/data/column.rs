//! Named, homogeneous columns of cell values.

use serde::{Deserialize, Serialize};

use crate::calc::Calculation;
use crate::data::cell::{CellKind, CellValue};
use crate::error::ReportError;
use crate::format::CellFormat;
use crate::Result;

/// Typed column content. The variant is the column's type, so every
/// element of one column carries the same tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Text(Vec<String>),
    Number(Vec<f64>),
}

impl ColumnData {
    /// Number of cells
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Number(v) => v.len(),
        }
    }

    /// Check if the column has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tag shared by all cells
    pub fn kind(&self) -> CellKind {
        match self {
            ColumnData::Text(_) => CellKind::Text,
            ColumnData::Number(_) => CellKind::Number,
        }
    }
}

/// Column variant as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Number,
    /// A number column derived once from other number columns
    Calculated(Calculation),
}

/// A named, ordered sequence of same-typed cells with an optional format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    header: String,
    data: ColumnData,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<CellFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    calculation: Option<Calculation>,
}

impl Column {
    /// Create a text column
    pub fn text(header: impl Into<String>, values: Vec<String>) -> Self {
        Self::from_data(header, ColumnData::Text(values))
    }

    /// Create a number column
    pub fn number(header: impl Into<String>, values: Vec<f64>) -> Self {
        Self::from_data(header, ColumnData::Number(values))
    }

    /// Create a calculated column from already computed values
    pub fn calculated(header: impl Into<String>, values: Vec<f64>, calculation: Calculation) -> Self {
        Column {
            calculation: Some(calculation),
            ..Self::number(header, values)
        }
    }

    /// Create a column from typed content
    pub fn from_data(header: impl Into<String>, data: ColumnData) -> Self {
        Column {
            header: header.into(),
            data,
            format: None,
            calculation: None,
        }
    }

    /// Create a column from untyped cell values.
    ///
    /// The first element decides between text and number. Fails with
    /// [`ReportError::UnsupportedColumnType`] when `values` is empty or
    /// when a later element carries a different tag than the first.
    pub fn from_values(header: impl Into<String>, values: Vec<CellValue>) -> Result<Self> {
        let header = header.into();
        let first = values.first().ok_or_else(|| {
            ReportError::UnsupportedColumnType(format!(
                "column '{}' has no values to infer a type from",
                header
            ))
        })?;

        let mismatch = |row: usize| {
            ReportError::UnsupportedColumnType(format!(
                "column '{}' mixes text and numbers (row {})",
                header, row
            ))
        };

        let data = match first.kind() {
            CellKind::Text => {
                let mut texts = Vec::with_capacity(values.len());
                for (row, value) in values.into_iter().enumerate() {
                    match value {
                        CellValue::Text(s) => texts.push(s),
                        CellValue::Number(_) => return Err(mismatch(row)),
                    }
                }
                ColumnData::Text(texts)
            }
            CellKind::Number => {
                let mut numbers = Vec::with_capacity(values.len());
                for (row, value) in values.iter().enumerate() {
                    match value {
                        CellValue::Number(v) => numbers.push(*v),
                        CellValue::Text(_) => return Err(mismatch(row)),
                    }
                }
                ColumnData::Number(numbers)
            }
        };

        Ok(Self::from_data(header, data))
    }

    /// Builder: attach a cell format
    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Replace the attached format, keeping header and content
    pub fn set_format(&mut self, format: CellFormat) {
        self.format = Some(format);
    }

    /// Column header (may be empty)
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Typed content
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Attached format, if any
    pub fn format(&self) -> Option<&CellFormat> {
        self.format.as_ref()
    }

    /// Calculation this column was derived with, if any
    pub fn calculation(&self) -> Option<Calculation> {
        self.calculation
    }

    /// Column variant
    pub fn kind(&self) -> ColumnKind {
        match (&self.data, self.calculation) {
            (ColumnData::Number(_), Some(op)) => ColumnKind::Calculated(op),
            (ColumnData::Number(_), None) => ColumnKind::Number,
            (ColumnData::Text(_), _) => ColumnKind::Text,
        }
    }

    /// Check if the column holds numbers (plain or calculated)
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Number(_))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the column has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric content, if this is a number column
    pub fn numbers(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Number(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Text content, if this is a text column
    pub fn texts(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            ColumnData::Number(_) => None,
        }
    }

    /// Cell at `row`, or `None` past the column's end
    pub fn cell(&self, row: usize) -> Option<CellValue> {
        match &self.data {
            ColumnData::Text(v) => v.get(row).map(|s| CellValue::Text(s.clone())),
            ColumnData::Number(v) => v.get(row).map(|n| CellValue::Number(*n)),
        }
    }

    /// Display text of the cell at `row`; empty past the column's end
    pub fn display_cell(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Text(v) => v.get(row).cloned().unwrap_or_default(),
            ColumnData::Number(v) => v.get(row).map(|n| n.to_string()).unwrap_or_default(),
        }
    }

    /// All cells as untyped values
    pub fn values(&self) -> Vec<CellValue> {
        match &self.data {
            ColumnData::Text(v) => v.iter().cloned().map(CellValue::Text).collect(),
            ColumnData::Number(v) => v.iter().copied().map(CellValue::Number).collect(),
        }
    }
}
