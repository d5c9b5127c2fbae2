//! Calculation engine: derived columns and summary figures.
//!
//! Both entry points are pure functions over borrowed data:
//!
//! - [`compute_column`]: elementwise ADD/SUB/PROD/DIV over number columns
//! - [`compute_summary`]: SUM/AVERAGE/COUNT over one column's cells,
//!   optionally filtered by a predicate ([`compute_summary_filtered`])
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::calc::{compute_column, Calculation};
//!
//! let a = [10.0, 20.0];
//! let b = [2.0, 4.0];
//! let quotient = compute_column(&[&a, &b], Calculation::Div).unwrap();
//! assert_eq!(quotient, vec![5.0, 5.0]);
//! ```

pub mod column;
pub mod summary;

pub use column::compute_column;
pub use summary::{compute_summary, compute_summary_filtered};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ReportError;

/// Elementwise operation producing a calculated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Calculation {
    Add,
    Sub,
    Prod,
    Div,
}

impl Calculation {
    /// Number of source columns the operation accepts
    pub fn arity(self) -> Arity {
        match self {
            Calculation::Add | Calculation::Prod => Arity::AtLeast(2),
            Calculation::Sub | Calculation::Div => Arity::Exactly(2),
        }
    }

    /// All operations, in display order
    pub fn all() -> [Calculation; 4] {
        [
            Calculation::Add,
            Calculation::Sub,
            Calculation::Prod,
            Calculation::Div,
        ]
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Calculation::Add => "ADD",
            Calculation::Sub => "SUB",
            Calculation::Prod => "PROD",
            Calculation::Div => "DIV",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Calculation {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADD" => Ok(Calculation::Add),
            "SUB" => Ok(Calculation::Sub),
            "PROD" => Ok(Calculation::Prod),
            "DIV" => Ok(Calculation::Div),
            _ => Err(ReportError::Parse {
                value: s.to_string(),
                expected: "calculation (ADD, SUB, PROD, DIV)",
            }),
        }
    }
}

/// Source-column count accepted by a [`Calculation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    /// Check if `count` source columns satisfy this arity
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::AtLeast(n) => count >= n,
            Arity::Exactly(n) => count == n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Exactly(n) => write!(f, "exactly {}", n),
        }
    }
}

/// Aggregation producing a summary figure from one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryKind {
    Sum,
    Average,
    Count,
}

impl SummaryKind {
    /// Check if the aggregation is defined for text columns
    pub fn accepts_text(self) -> bool {
        matches!(self, SummaryKind::Count)
    }
}

impl std::fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SummaryKind::Sum => "SUM",
            SummaryKind::Average => "AVERAGE",
            SummaryKind::Count => "COUNT",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SummaryKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUM" => Ok(SummaryKind::Sum),
            "AVERAGE" | "AVG" => Ok(SummaryKind::Average),
            "COUNT" => Ok(SummaryKind::Count),
            _ => Err(ReportError::Parse {
                value: s.to_string(),
                expected: "summary kind (SUM, AVERAGE, COUNT)",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert!(Calculation::Add.arity().accepts(3));
        assert!(!Calculation::Add.arity().accepts(1));
        assert!(Calculation::Div.arity().accepts(2));
        assert!(!Calculation::Div.arity().accepts(3));
        assert_eq!(Calculation::Sub.arity().to_string(), "exactly 2");
        assert_eq!(Calculation::Prod.arity().to_string(), "at least 2");
    }

    #[test]
    fn test_calculation_from_str() {
        assert_eq!("add".parse::<Calculation>().unwrap(), Calculation::Add);
        assert_eq!("DIV".parse::<Calculation>().unwrap(), Calculation::Div);
        assert!("mod".parse::<Calculation>().is_err());
        for op in Calculation::all() {
            assert_eq!(op.to_string().parse::<Calculation>().unwrap(), op);
        }
    }

    #[test]
    fn test_summary_kind_from_str() {
        assert_eq!("sum".parse::<SummaryKind>().unwrap(), SummaryKind::Sum);
        assert_eq!("avg".parse::<SummaryKind>().unwrap(), SummaryKind::Average);
        assert!("median".parse::<SummaryKind>().is_err());
        assert!(SummaryKind::Count.accepts_text());
        assert!(!SummaryKind::Sum.accepts_text());
    }
}
