//! Core types for the csv-to-json pipeline.
//!
//! This crate provides the row representation shared by the loader
//! (`csv-source`) and the writer (`json-sink`):
//!
//! - [`Row`] - One CSV data row, an ordered mapping from column name to cell text
//! - [`RowSequence`] - All rows parsed from one CSV file, in file order
//!
//! # Architecture
//!
//! ```text
//! row-core (this crate)
//!    │
//!    ├─── csv-source   (produces RowSequence from CSV)
//!    └─── json-sink    (serializes RowSequence to JSON)
//! ```
//!
//! # Example
//!
//! ```rust
//! use row_core::Row;
//!
//! let mut row = Row::new();
//! row.push("a", "1");
//! row.push("b", "2");
//! assert_eq!(row.get("b"), Some("2"));
//! ```

pub mod row;

pub use row::{Row, RowSequence};
