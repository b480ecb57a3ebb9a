//! CSV loading module for csv-to-json
//!
//! This module reads a CSV file (or any reader) into a [`RowSequence`], one
//! [`Row`] per data record, with cell values kept as text.

mod error;
mod load;

pub use error::LoadError;
pub use load::{load_data, load_rows, FieldCountPolicy, InputEncoding, LoadConfig};

// Re-export row types for convenience
pub use row_core::{Row, RowSequence};
