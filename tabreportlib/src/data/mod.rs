//! Report data model: cells, columns and the summary map.
//!
//! This module holds the value types every other stage works with:
//!
//! - **CellValue**: one table cell, text or number
//! - **Column**: a named, typed, ordered sequence of cells
//! - **Summary**: insertion-ordered key/value figures shown after the table
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::data::{CellValue, Column, ColumnKind};
//!
//! let column = Column::from_values("price", vec![CellValue::number(9.5)]).unwrap();
//! assert_eq!(column.kind(), ColumnKind::Number);
//! ```

pub mod cell;
pub mod column;
pub mod summary;

pub use cell::{CellKind, CellValue};
pub use column::{Column, ColumnData, ColumnKind};
pub use summary::{Summary, SummaryValue};
