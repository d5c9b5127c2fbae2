//! Single table-cell values.

use serde::{Deserialize, Serialize};

/// One table-cell value: text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Free text
    Text(String),
    /// Numeric value
    Number(f64),
}

/// The tag of a [`CellValue`], used to decide a column's variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Text,
    Number,
}

impl CellValue {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Create a number cell
    pub fn number(value: f64) -> Self {
        CellValue::Number(value)
    }

    /// Tag of this value
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Text(_) => CellKind::Text,
            CellValue::Number(_) => CellKind::Number,
        }
    }

    /// Numeric content, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }

    /// Text content, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// Check if this is a text value
    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }

    /// Check if this is a number value
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(CellValue::text("a").kind(), CellKind::Text);
        assert_eq!(CellValue::number(1.5).kind(), CellKind::Number);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from("x"), CellValue::Text("x".to_string()));
        assert_eq!(CellValue::from(3), CellValue::Number(3.0));
        assert_eq!(CellValue::from(2.5).as_number(), Some(2.5));
        assert_eq!(CellValue::from("y").as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::number(2.0).to_string(), "2");
        assert_eq!(CellValue::number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::text("ab").to_string(), "ab");
    }
}
