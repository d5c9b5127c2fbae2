//! Output projection: present a report as a grid of strings.
//!
//! Text-oriented exporters never look at typed columns directly. They work
//! from this projection:
//!
//! - **ReportTable**: title, headers, padded rows and summary lines
//! - **SummaryRow**: one rendered summary entry
//!
//! ReportTable is a pure presentation layer: every number is already a
//! display string and every row has one cell per header.
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::builder::{ReportBuilder, ReportDraft};
//! use tabreportlib::output::ReportTable;
//!
//! let mut builder = ReportBuilder::new("stock").unwrap();
//! builder.set_include_row_numbers(true);
//! builder.add_text_column("item", vec!["bolt".into(), "nut".into()]);
//! builder.add_number_column("qty", vec![40.0]);
//!
//! let table = ReportTable::from_report(&builder.build().unwrap());
//! assert_eq!(table.headers, ["#", "item", "qty"]);
//! assert_eq!(table.rows[1], ["2", "nut", ""]);
//! ```

pub mod table;

pub use table::{ReportTable, SummaryRow, ROW_NUMBER_HEADER};
